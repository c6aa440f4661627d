use chrono::{Datelike, Duration, NaiveDateTime, Weekday};

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub mod serializer {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::DATE_FMT;

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        time_to_json(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)?;
        Ok(time)
    }

    fn time_to_json(t: NaiveDateTime) -> String {
        DateTime::<Utc>::from_utc(t, Utc).to_rfc3339()
    }
}

fn is_weekend(day: NaiveDateTime) -> bool {
    matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advances from `borrowed_at` by `loan_days` valid days. With
/// `skip_weekends`, Saturday and Sunday do not count toward the total; the
/// walk continues day by day until enough countable days have passed.
pub fn due_date(borrowed_at: NaiveDateTime, loan_days: i64, skip_weekends: bool) -> NaiveDateTime {
    let mut due = borrowed_at;
    let mut counted = 0;
    while counted < loan_days {
        due += Duration::days(1);
        if !skip_weekends || !is_weekend(due) {
            counted += 1;
        }
    }
    due
}

/// Whole days `at` is past `due`, floored at zero.
pub fn whole_days_late(due_at: NaiveDateTime, at: NaiveDateTime) -> i64 {
    let days = (at - due_at).num_days();
    days.max(0)
}

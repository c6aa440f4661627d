use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::HoldStatus;
use crate::utils::date::serializer;

// HoldEntity abstracts a reserved copy; at most one Held record exists per
// member/book pair at a time.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HoldEntity {
    pub hold_id: String,
    pub version: i64,
    pub book_id: String,
    pub member_id: String,
    pub status: HoldStatus,
    #[serde(with = "serializer")]
    pub held_at: NaiveDateTime,
    pub canceled_at: Option<NaiveDateTime>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl HoldEntity {
    pub fn new(book_id: &str, member_id: &str) -> Self {
        Self {
            hold_id: Uuid::new_v4().to_string(),
            version: 0,
            book_id: book_id.to_string(),
            member_id: member_id.to_string(),
            status: HoldStatus::Held,
            held_at: Utc::now().naive_utc(),
            canceled_at: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == HoldStatus::Held
    }
}

impl Identifiable for HoldEntity {
    fn id(&self) -> String {
        self.hold_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::HoldStatus;
    use crate::hold::domain::model::HoldEntity;

    #[tokio::test]
    async fn test_should_build_active_hold() {
        let hold = HoldEntity::new("book-1", "member-1");
        assert_eq!(HoldStatus::Held, hold.status);
        assert!(hold.is_active());
        assert_eq!(0, hold.version);
    }

    #[tokio::test]
    async fn test_should_deactivate_on_cancel() {
        let mut hold = HoldEntity::new("book-1", "member-1");
        hold.status = HoldStatus::Canceled;
        assert!(!hold.is_active());
    }
}

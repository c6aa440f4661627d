use std::collections::HashMap;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// RatingEntity aggregates the per-member scores for one book, keyed by the
// book id; `average` is the arithmetic mean rounded to two decimals.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RatingEntity {
    pub book_id: String,
    pub version: i64,
    pub scores: HashMap<String, i32>,
    pub average: f64,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl RatingEntity {
    pub fn new(book_id: &str) -> Self {
        Self {
            book_id: book_id.to_string(),
            version: 0,
            scores: HashMap::new(),
            average: 0.0,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    // overwrites any prior score from the same member and refreshes the
    // average; returns true when this member had not rated the book before
    pub fn record(&mut self, member_id: &str, rating: i32) -> bool {
        let created = self.scores.insert(member_id.to_string(), rating).is_none();
        let sum: i32 = self.scores.values().sum();
        self.average = ((sum as f64 / self.scores.len() as f64) * 100.0).round() / 100.0;
        created
    }
}

impl Identifiable for RatingEntity {
    fn id(&self) -> String {
        self.book_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use crate::ratings::domain::model::RatingEntity;

    #[tokio::test]
    async fn test_should_average_scores_to_two_decimals() {
        let mut rating = RatingEntity::new("book-1");
        assert!(rating.record("m1", 5));
        assert!(rating.record("m2", 3));
        assert_eq!(4.0, rating.average);
        assert!(rating.record("m3", 4));
        assert_eq!(4.0, rating.average);
        rating.record("m4", 4);
        assert_eq!(4.0, rating.average);
        rating.record("m5", 2);
        assert_eq!(3.6, rating.average);
    }

    #[tokio::test]
    async fn test_should_round_repeating_average() {
        let mut rating = RatingEntity::new("book-1");
        rating.record("m1", 5);
        rating.record("m2", 4);
        rating.record("m3", 4);
        assert_eq!(4.33, rating.average);
    }

    #[tokio::test]
    async fn test_should_overwrite_prior_score() {
        let mut rating = RatingEntity::new("book-1");
        assert!(rating.record("m1", 2));
        assert!(!rating.record("m1", 5));
        assert_eq!(1, rating.scores.len());
        assert_eq!(5.0, rating.average);
    }
}

use serde::{Deserialize, Serialize};
use crate::core::library::RatingOutcome;

// RatingDto reports the outcome of a rating write together with the fresh
// aggregate for the book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingDto {
    pub book_id: String,
    pub member_id: String,
    pub outcome: RatingOutcome,
    pub rating: i32,
    pub average: f64,
    pub score_count: usize,
}

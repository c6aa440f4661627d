use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationDto {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub score: f64,
}

pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::CirculationResult;
use crate::ratings::dto::RatingDto;

// RatingService keeps one score per member per book, last write wins, and
// the running two-decimal average.
#[async_trait]
pub trait RatingService: Sync + Send {
    async fn rate_book(&self, member_id: &str, book_id: &str, rating: i32) -> CirculationResult<RatingDto>;

    async fn average_rating(&self, book_id: &str) -> CirculationResult<Option<f64>>;
}

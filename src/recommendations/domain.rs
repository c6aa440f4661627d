pub mod service;

use async_trait::async_trait;
use crate::core::library::CirculationResult;
use crate::recommendations::dto::RecommendationDto;

// RecommendationService scores un-borrowed books against a member's
// declared preferences and borrowing history.
#[async_trait]
pub trait RecommendationService: Sync + Send {
    async fn recommend(&self, member_id: &str, limit: usize) -> CirculationResult<Vec<RecommendationDto>>;
}

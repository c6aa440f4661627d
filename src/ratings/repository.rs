pub mod memory_rating_repository;

use async_trait::async_trait;
use crate::core::library::CirculationResult;
use crate::core::repository::Repository;
use crate::ratings::domain::model::RatingEntity;

#[async_trait]
pub trait RatingRepository: Repository<RatingEntity> {
    async fn find_by_book(&self, book_id: &str) -> CirculationResult<Option<RatingEntity>>;

    async fn find_all(&self) -> CirculationResult<Vec<RatingEntity>>;
}

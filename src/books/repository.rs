pub mod memory_book_repository;

use async_trait::async_trait;
use crate::books::domain::model::BookEntity;
use crate::core::library::CirculationResult;
use crate::core::repository::Repository;

#[async_trait]
pub trait BookRepository: Repository<BookEntity> {
    // applies delta to copies_available, failing with OutOfRange when the
    // result would leave [0, copies_total]
    async fn adjust_copies(&self, id: &str, delta: i64) -> CirculationResult<BookEntity>;

    async fn find_all(&self) -> CirculationResult<Vec<BookEntity>>;
}

pub mod memory_hold_repository;

use async_trait::async_trait;
use crate::core::library::CirculationResult;
use crate::core::repository::Repository;
use crate::hold::domain::model::HoldEntity;

#[async_trait]
pub trait HoldRepository: Repository<HoldEntity> {
    async fn find_active(&self, member_id: &str, book_id: &str) -> CirculationResult<Option<HoldEntity>>;

    async fn find_all(&self) -> CirculationResult<Vec<HoldEntity>>;
}

// WaitlistRepository keeps one FIFO queue of member ids per book. It is not
// an entity store, so it does not extend Repository.
#[async_trait]
pub trait WaitlistRepository: Sync + Send {
    async fn queue(&self, book_id: &str) -> CirculationResult<Vec<String>>;

    async fn contains(&self, book_id: &str, member_id: &str) -> CirculationResult<bool>;

    // no-op when the member is already queued
    async fn enqueue(&self, book_id: &str, member_id: &str) -> CirculationResult<Vec<String>>;

    async fn dequeue(&self, book_id: &str) -> CirculationResult<Option<String>>;

    async fn remove(&self, book_id: &str, member_id: &str) -> CirculationResult<bool>;
}

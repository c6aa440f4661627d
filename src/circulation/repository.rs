pub mod memory_loan_repository;

use async_trait::async_trait;
use crate::circulation::domain::model::LoanEntity;
use crate::core::library::CirculationResult;
use crate::core::repository::Repository;

#[async_trait]
pub trait LoanRepository: Repository<LoanEntity> {
    // at most one Active loan exists per (member, book) pair
    async fn find_active(&self, member_id: &str, book_id: &str) -> CirculationResult<Option<LoanEntity>>;

    async fn find_by_member(&self, member_id: &str) -> CirculationResult<Vec<LoanEntity>>;

    async fn find_all(&self) -> CirculationResult<Vec<LoanEntity>>;
}

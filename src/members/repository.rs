pub mod memory_member_repository;

use async_trait::async_trait;
use crate::core::library::CirculationResult;
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;

#[async_trait]
pub trait MemberRepository: Repository<MemberEntity> {
    async fn find_all(&self) -> CirculationResult<Vec<MemberEntity>>;

    async fn count(&self, active_only: bool) -> CirculationResult<usize>;
}

pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::CirculationResult;
use crate::members::dto::MemberDto;

#[async_trait]
pub trait MemberService: Sync + Send {
    async fn add_member(&self, member: &MemberDto) -> CirculationResult<MemberDto>;
    async fn update_member(&self, member: &MemberDto) -> CirculationResult<MemberDto>;
    async fn find_member_by_id(&self, id: &str) -> CirculationResult<MemberDto>;
    async fn member_count(&self, active_only: bool) -> CirculationResult<usize>;
}

use std::sync::Arc;
use crate::gateway::events::EventPublisher;
use crate::members::domain::MemberService;
use crate::members::domain::service::MemberServiceImpl;
use crate::members::repository::MemberRepository;
use crate::members::repository::memory_member_repository::MemoryMemberRepository;

pub fn create_member_repository() -> Arc<dyn MemberRepository> {
    Arc::new(MemoryMemberRepository::new())
}

pub fn create_member_service(member_repository: Arc<dyn MemberRepository>,
                             events_publisher: Arc<dyn EventPublisher>) -> Arc<dyn MemberService> {
    Arc::new(MemberServiceImpl::new(member_repository, events_publisher))
}

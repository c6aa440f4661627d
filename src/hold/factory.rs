use std::sync::Arc;
use crate::books::repository::BookRepository;
use crate::core::locks::EngineLocks;
use crate::gateway::events::EventPublisher;
use crate::hold::domain::ReservationService;
use crate::hold::domain::service::ReservationServiceImpl;
use crate::hold::repository::{HoldRepository, WaitlistRepository};
use crate::hold::repository::memory_hold_repository::{MemoryHoldRepository, MemoryWaitlistRepository};
use crate::members::repository::MemberRepository;

pub fn create_hold_repository() -> Arc<dyn HoldRepository> {
    Arc::new(MemoryHoldRepository::new())
}

pub fn create_waitlist_repository() -> Arc<dyn WaitlistRepository> {
    Arc::new(MemoryWaitlistRepository::new())
}

pub fn create_reservation_service(hold_repository: Arc<dyn HoldRepository>,
                                  waitlist_repository: Arc<dyn WaitlistRepository>,
                                  book_repository: Arc<dyn BookRepository>,
                                  member_repository: Arc<dyn MemberRepository>,
                                  locks: Arc<EngineLocks>,
                                  events_publisher: Arc<dyn EventPublisher>) -> Arc<dyn ReservationService> {
    Arc::new(ReservationServiceImpl::new(hold_repository, waitlist_repository,
                                         book_repository, member_repository,
                                         locks, events_publisher))
}

#[cfg(test)]
mod tests {
    use crate::hold::factory::{create_hold_repository, create_waitlist_repository};

    #[tokio::test]
    async fn test_should_create_empty_hold_stores() {
        let holds = create_hold_repository();
        assert!(holds.find_all().await.expect("list").is_empty());
        let waitlists = create_waitlist_repository();
        assert!(waitlists.queue("book-1").await.expect("queue").is_empty());
    }
}

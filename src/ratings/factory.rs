use std::sync::Arc;
use crate::books::repository::BookRepository;
use crate::core::locks::EngineLocks;
use crate::gateway::events::EventPublisher;
use crate::members::repository::MemberRepository;
use crate::ratings::domain::RatingService;
use crate::ratings::domain::service::RatingServiceImpl;
use crate::ratings::repository::RatingRepository;
use crate::ratings::repository::memory_rating_repository::MemoryRatingRepository;

pub fn create_rating_repository() -> Arc<dyn RatingRepository> {
    Arc::new(MemoryRatingRepository::new())
}

pub fn create_rating_service(rating_repository: Arc<dyn RatingRepository>,
                             book_repository: Arc<dyn BookRepository>,
                             member_repository: Arc<dyn MemberRepository>,
                             locks: Arc<EngineLocks>,
                             events_publisher: Arc<dyn EventPublisher>) -> Arc<dyn RatingService> {
    Arc::new(RatingServiceImpl::new(rating_repository, book_repository,
                                    member_repository, locks, events_publisher))
}

#[cfg(test)]
mod tests {
    use crate::ratings::factory::create_rating_repository;

    #[tokio::test]
    async fn test_should_create_empty_rating_repository() {
        let repo = create_rating_repository();
        assert!(repo.find_all().await.expect("list").is_empty());
    }
}

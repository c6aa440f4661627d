use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use tracing::info;
use crate::books::repository::BookRepository;
use crate::core::events::DomainEvent;
use crate::core::library::{CirculationError, CirculationResult, RatingOutcome};
use crate::core::locks::EngineLocks;
use crate::gateway::events::EventPublisher;
use crate::members::repository::MemberRepository;
use crate::ratings::domain::RatingService;
use crate::ratings::domain::model::RatingEntity;
use crate::ratings::dto::RatingDto;
use crate::ratings::repository::RatingRepository;

pub struct RatingServiceImpl {
    rating_repository: Arc<dyn RatingRepository>,
    book_repository: Arc<dyn BookRepository>,
    member_repository: Arc<dyn MemberRepository>,
    locks: Arc<EngineLocks>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl RatingServiceImpl {
    pub fn new(rating_repository: Arc<dyn RatingRepository>,
               book_repository: Arc<dyn BookRepository>,
               member_repository: Arc<dyn MemberRepository>,
               locks: Arc<EngineLocks>,
               events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            rating_repository,
            book_repository,
            member_repository,
            locks,
            events_publisher,
        }
    }
}

#[async_trait]
impl RatingService for RatingServiceImpl {
    async fn rate_book(&self, member_id: &str, book_id: &str, rating: i32) -> CirculationResult<RatingDto> {
        if !(1..=5).contains(&rating) {
            return Err(CirculationError::out_of_range(
                format!("rating {} outside [1, 5]", rating).as_str()));
        }
        let _guards = self.locks.book_then_member(book_id, member_id).await;
        let _ = self.book_repository.get(book_id).await?;
        let _ = self.member_repository.get(member_id).await?;

        let (entity, created) = match self.rating_repository.find_by_book(book_id).await? {
            Some(mut existing) => {
                let created = existing.record(member_id, rating);
                self.rating_repository.update(&existing).await?;
                (existing, created)
            }
            None => {
                let mut fresh = RatingEntity::new(book_id);
                fresh.record(member_id, rating);
                self.rating_repository.create(&fresh).await?;
                (fresh, true)
            }
        };

        info!(member_id, book_id, rating, average = entity.average, "book rated");
        let dto = RatingDto {
            book_id: book_id.to_string(),
            member_id: member_id.to_string(),
            outcome: if created { RatingOutcome::Created } else { RatingOutcome::Updated },
            rating,
            average: entity.average,
            score_count: entity.scores.len(),
        };
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "book_rated", "ratings", book_id, &HashMap::new(), &dto.clone())?).await?;
        Ok(dto)
    }

    async fn average_rating(&self, book_id: &str) -> CirculationResult<Option<f64>> {
        Ok(self.rating_repository.find_by_book(book_id).await?.map(|r| r.average))
    }
}

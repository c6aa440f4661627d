use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;
use crate::books::repository::BookRepository;
use crate::core::events::DomainEvent;
use crate::core::library::{CirculationError, CirculationResult, HoldStatus,
                           ReservationOutcome, WaitlistAction, WaitlistOutcome};
use crate::core::locks::EngineLocks;
use crate::gateway::events::EventPublisher;
use crate::hold::domain::ReservationService;
use crate::hold::domain::model::HoldEntity;
use crate::hold::dto::{HoldDto, ReservationDto, WaitlistDto};
use crate::hold::repository::{HoldRepository, WaitlistRepository};
use crate::members::repository::MemberRepository;

pub struct ReservationServiceImpl {
    hold_repository: Arc<dyn HoldRepository>,
    waitlist_repository: Arc<dyn WaitlistRepository>,
    book_repository: Arc<dyn BookRepository>,
    member_repository: Arc<dyn MemberRepository>,
    locks: Arc<EngineLocks>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl ReservationServiceImpl {
    pub fn new(hold_repository: Arc<dyn HoldRepository>,
               waitlist_repository: Arc<dyn WaitlistRepository>,
               book_repository: Arc<dyn BookRepository>,
               member_repository: Arc<dyn MemberRepository>,
               locks: Arc<EngineLocks>,
               events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            hold_repository,
            waitlist_repository,
            book_repository,
            member_repository,
            locks,
            events_publisher,
        }
    }

    fn reservation(outcome: ReservationOutcome, book_id: &str, member_id: &str,
                   hold: Option<HoldDto>) -> ReservationDto {
        ReservationDto {
            outcome,
            book_id: book_id.to_string(),
            member_id: member_id.to_string(),
            hold,
        }
    }
}

#[async_trait]
impl ReservationService for ReservationServiceImpl {
    async fn reserve(&self, member_id: &str, book_id: &str) -> CirculationResult<ReservationDto> {
        let _guards = self.locks.book_then_member(book_id, member_id).await;

        let book = self.book_repository.get(book_id).await?;
        let _ = self.member_repository.get(member_id).await?;

        if let Some(hold) = self.hold_repository.find_active(member_id, book_id).await? {
            return Ok(Self::reservation(ReservationOutcome::AlreadyReserved,
                                        book_id, member_id, Some(HoldDto::from(&hold))));
        }
        if book.copies_available > 0 {
            self.book_repository.adjust_copies(book_id, -1).await?;
            let hold = HoldEntity::new(book_id, member_id);
            self.hold_repository.create(&hold).await?;
            // a member who queued while no copy was free now holds one, so
            // their waitlist entry must not surface in a later notify
            let _ = self.waitlist_repository.remove(book_id, member_id).await?;
            info!(member_id, book_id, "copy held");
            let dto = HoldDto::from(&hold);
            let _ = self.events_publisher.publish(&DomainEvent::added(
                "copy_held", "hold", hold.hold_id.as_str(), &HashMap::new(), &dto.clone())?).await?;
            return Ok(Self::reservation(ReservationOutcome::Reserved, book_id, member_id, Some(dto)));
        }
        if self.waitlist_repository.contains(book_id, member_id).await? {
            return Ok(Self::reservation(ReservationOutcome::AlreadyWaitlisted, book_id, member_id, None));
        }
        self.waitlist_repository.enqueue(book_id, member_id).await?;
        info!(member_id, book_id, "member waitlisted");
        Ok(Self::reservation(ReservationOutcome::Waitlisted, book_id, member_id, None))
    }

    async fn manage_waitlist(&self, book_id: &str, member_id: Option<&str>,
                             action: WaitlistAction) -> CirculationResult<WaitlistDto> {
        let _guard = self.locks.book(book_id).await;
        let book = self.book_repository.get(book_id).await?;

        match action {
            WaitlistAction::Add => {
                let member_id = member_id.ok_or_else(|| CirculationError::validation(
                    "waitlist add requires a member id", Some("400".to_string())))?;
                let _ = self.member_repository.get(member_id).await?;
                if book.copies_available > 0 {
                    return Ok(WaitlistDto {
                        outcome: WaitlistOutcome::NotNeeded,
                        book_id: book_id.to_string(),
                        queue: self.waitlist_repository.queue(book_id).await?,
                        notified: None,
                    });
                }
                if self.waitlist_repository.contains(book_id, member_id).await? {
                    return Ok(WaitlistDto {
                        outcome: WaitlistOutcome::AlreadyWaitlisted,
                        book_id: book_id.to_string(),
                        queue: self.waitlist_repository.queue(book_id).await?,
                        notified: None,
                    });
                }
                let queue = self.waitlist_repository.enqueue(book_id, member_id).await?;
                info!(member_id, book_id, depth = queue.len(), "member waitlisted");
                Ok(WaitlistDto {
                    outcome: WaitlistOutcome::Added,
                    book_id: book_id.to_string(),
                    queue,
                    notified: None,
                })
            }
            WaitlistAction::Notify => {
                // notifying never grants the copy; the member still has to
                // reserve or borrow on their own
                match self.waitlist_repository.dequeue(book_id).await? {
                    Some(next) => {
                        info!(member_id = next.as_str(), book_id, "waitlisted member notified");
                        Ok(WaitlistDto {
                            outcome: WaitlistOutcome::Notified,
                            book_id: book_id.to_string(),
                            queue: self.waitlist_repository.queue(book_id).await?,
                            notified: Some(next),
                        })
                    }
                    None => Ok(WaitlistDto {
                        outcome: WaitlistOutcome::NoneWaiting,
                        book_id: book_id.to_string(),
                        queue: Vec::new(),
                        notified: None,
                    }),
                }
            }
        }
    }

    async fn cancel(&self, member_id: &str, book_id: &str) -> CirculationResult<ReservationDto> {
        let _guards = self.locks.book_then_member(book_id, member_id).await;

        let removed = self.waitlist_repository.remove(book_id, member_id).await?;
        match self.hold_repository.find_active(member_id, book_id).await? {
            Some(mut hold) => {
                hold.status = HoldStatus::Canceled;
                hold.canceled_at = Some(Utc::now().naive_utc());
                self.hold_repository.update(&hold).await?;
                // release the held copy, clamped at copies_total
                let book = self.book_repository.get(book_id).await?;
                if book.copies_available < book.copies_total {
                    self.book_repository.adjust_copies(book_id, 1).await?;
                }
                info!(member_id, book_id, "hold canceled");
                let dto = HoldDto::from(&hold);
                let _ = self.events_publisher.publish(&DomainEvent::updated(
                    "hold_canceled", "hold", hold.hold_id.as_str(), &HashMap::new(), &dto.clone())?).await?;
                Ok(Self::reservation(ReservationOutcome::Canceled, book_id, member_id, Some(dto)))
            }
            None if removed => {
                info!(member_id, book_id, "waitlist entry canceled");
                Ok(Self::reservation(ReservationOutcome::Canceled, book_id, member_id, None))
            }
            None => Err(CirculationError::not_found(
                format!("no hold or waitlist entry for member {} and book {}",
                        member_id, book_id).as_str())),
        }
    }
}

impl From<&HoldEntity> for HoldDto {
    fn from(other: &HoldEntity) -> HoldDto {
        HoldDto {
            hold_id: other.hold_id.to_string(),
            version: other.version,
            book_id: other.book_id.to_string(),
            member_id: other.member_id.to_string(),
            status: other.status,
            held_at: other.held_at,
            canceled_at: other.canceled_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::books::domain::model::BookEntity;
    use crate::books::factory::create_book_repository;
    use crate::books::repository::BookRepository;
    use crate::core::library::{CirculationError, ReservationOutcome, WaitlistAction, WaitlistOutcome};
    use crate::core::locks::EngineLocks;
    use crate::core::repository::Repository;
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;
    use crate::hold::domain::ReservationService;
    use crate::hold::domain::service::ReservationServiceImpl;
    use crate::hold::factory::{create_hold_repository, create_waitlist_repository};
    use crate::members::domain::model::MemberEntity;
    use crate::members::factory::create_member_repository;
    use crate::members::repository::MemberRepository;

    struct Fixture {
        svc: ReservationServiceImpl,
        book_repo: Arc<dyn BookRepository>,
        book_id: String,
        member_ids: Vec<String>,
    }

    async fn build_fixture(copies: i64, members: usize) -> Fixture {
        let book_repo = create_book_repository();
        let member_repo = create_member_repository();
        let svc = ReservationServiceImpl::new(
            create_hold_repository(), create_waitlist_repository(),
            book_repo.clone(), member_repo.clone(),
            Arc::new(EngineLocks::new()), create_publisher(GatewayPublisherVia::Logs));

        let book = BookEntity::new("0306406152", "Dune", "Frank Herbert", "sci-fi", copies);
        book_repo.create(&book).await.expect("create book");
        let mut member_ids = Vec::new();
        for n in 0..members {
            let member = MemberEntity::new(format!("Member {}", n).as_str(),
                                           format!("m{}@example.com", n).as_str());
            member_repo.create(&member).await.expect("create member");
            member_ids.push(member.member_id);
        }
        Fixture {
            svc,
            book_repo,
            book_id: book.book_id,
            member_ids,
        }
    }

    #[tokio::test]
    async fn test_should_hold_copy_when_available() {
        let f = build_fixture(1, 1).await;
        let res = f.svc.reserve(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("reserve");
        assert_eq!(ReservationOutcome::Reserved, res.outcome);
        assert!(res.hold.is_some());
        let book = f.book_repo.get(f.book_id.as_str()).await.expect("get book");
        assert_eq!(0, book.copies_available);
    }

    #[tokio::test]
    async fn test_should_make_repeat_reserve_idempotent() {
        let f = build_fixture(2, 1).await;
        f.svc.reserve(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("reserve");
        let res = f.svc.reserve(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("reserve");
        assert_eq!(ReservationOutcome::AlreadyReserved, res.outcome);
        let book = f.book_repo.get(f.book_id.as_str()).await.expect("get book");
        assert_eq!(1, book.copies_available);
    }

    #[tokio::test]
    async fn test_should_waitlist_when_no_copies() {
        let f = build_fixture(1, 3).await;
        f.svc.reserve(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("reserve");
        let second = f.svc.reserve(f.member_ids[1].as_str(), f.book_id.as_str()).await.expect("reserve");
        assert_eq!(ReservationOutcome::Waitlisted, second.outcome);
        let repeat = f.svc.reserve(f.member_ids[1].as_str(), f.book_id.as_str()).await.expect("reserve");
        assert_eq!(ReservationOutcome::AlreadyWaitlisted, repeat.outcome);
        let third = f.svc.reserve(f.member_ids[2].as_str(), f.book_id.as_str()).await.expect("reserve");
        assert_eq!(ReservationOutcome::Waitlisted, third.outcome);
    }

    #[tokio::test]
    async fn test_should_reject_reserve_for_unknown_book() {
        let f = build_fixture(1, 1).await;
        assert!(matches!(
            f.svc.reserve(f.member_ids[0].as_str(), "missing").await,
            Err(CirculationError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_skip_waitlist_add_when_copies_free() {
        let f = build_fixture(1, 1).await;
        let dto = f.svc.manage_waitlist(f.book_id.as_str(), Some(f.member_ids[0].as_str()),
                                        WaitlistAction::Add).await.expect("add");
        assert_eq!(WaitlistOutcome::NotNeeded, dto.outcome);
        assert!(dto.queue.is_empty());
    }

    #[tokio::test]
    async fn test_should_add_and_notify_in_fifo_order() {
        let f = build_fixture(1, 3).await;
        f.svc.reserve(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("reserve");
        for idx in [1, 2] {
            let dto = f.svc.manage_waitlist(f.book_id.as_str(), Some(f.member_ids[idx].as_str()),
                                            WaitlistAction::Add).await.expect("add");
            assert_eq!(WaitlistOutcome::Added, dto.outcome);
        }
        let repeat = f.svc.manage_waitlist(f.book_id.as_str(), Some(f.member_ids[1].as_str()),
                                           WaitlistAction::Add).await.expect("add");
        assert_eq!(WaitlistOutcome::AlreadyWaitlisted, repeat.outcome);

        let first = f.svc.manage_waitlist(f.book_id.as_str(), None, WaitlistAction::Notify).await.expect("notify");
        assert_eq!(WaitlistOutcome::Notified, first.outcome);
        assert_eq!(Some(f.member_ids[1].to_string()), first.notified);
        // notify does not free or grant a copy
        let book = f.book_repo.get(f.book_id.as_str()).await.expect("get book");
        assert_eq!(0, book.copies_available);

        let second = f.svc.manage_waitlist(f.book_id.as_str(), None, WaitlistAction::Notify).await.expect("notify");
        assert_eq!(Some(f.member_ids[2].to_string()), second.notified);
        let drained = f.svc.manage_waitlist(f.book_id.as_str(), None, WaitlistAction::Notify).await.expect("notify");
        assert_eq!(WaitlistOutcome::NoneWaiting, drained.outcome);
    }

    #[tokio::test]
    async fn test_should_require_member_for_waitlist_add() {
        let f = build_fixture(0, 1).await;
        assert!(matches!(
            f.svc.manage_waitlist(f.book_id.as_str(), None, WaitlistAction::Add).await,
            Err(CirculationError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_release_copy_on_cancel() {
        let f = build_fixture(1, 2).await;
        f.svc.reserve(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("reserve");
        f.svc.reserve(f.member_ids[1].as_str(), f.book_id.as_str()).await.expect("reserve");

        let res = f.svc.cancel(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("cancel");
        assert_eq!(ReservationOutcome::Canceled, res.outcome);
        let book = f.book_repo.get(f.book_id.as_str()).await.expect("get book");
        assert_eq!(1, book.copies_available);

        // waitlisted member cancels too, no copy movement
        let res = f.svc.cancel(f.member_ids[1].as_str(), f.book_id.as_str()).await.expect("cancel");
        assert_eq!(ReservationOutcome::Canceled, res.outcome);
        assert!(res.hold.is_none());
        let book = f.book_repo.get(f.book_id.as_str()).await.expect("get book");
        assert_eq!(1, book.copies_available);

        assert!(matches!(
            f.svc.cancel(f.member_ids[0].as_str(), f.book_id.as_str()).await,
            Err(CirculationError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_drop_waitlist_entry_once_member_holds_copy() {
        let f = build_fixture(1, 3).await;
        f.svc.reserve(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("reserve");
        // two members queue behind the held copy
        for idx in [1, 2] {
            let res = f.svc.reserve(f.member_ids[idx].as_str(), f.book_id.as_str()).await.expect("reserve");
            assert_eq!(ReservationOutcome::Waitlisted, res.outcome);
        }
        // the copy frees up and the front of the queue reserves it directly
        f.svc.cancel(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("cancel");
        let res = f.svc.reserve(f.member_ids[1].as_str(), f.book_id.as_str()).await.expect("reserve");
        assert_eq!(ReservationOutcome::Reserved, res.outcome);

        // notify must name the still-waiting member, not the new holder
        let notified = f.svc.manage_waitlist(f.book_id.as_str(), None, WaitlistAction::Notify)
            .await.expect("notify");
        assert_eq!(WaitlistOutcome::Notified, notified.outcome);
        assert_eq!(Some(f.member_ids[2].to_string()), notified.notified);
        let drained = f.svc.manage_waitlist(f.book_id.as_str(), None, WaitlistAction::Notify)
            .await.expect("notify");
        assert_eq!(WaitlistOutcome::NoneWaiting, drained.outcome);
    }

    #[tokio::test]
    async fn test_should_allow_fresh_reserve_after_cancel() {
        let f = build_fixture(1, 1).await;
        f.svc.reserve(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("reserve");
        f.svc.cancel(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("cancel");
        let res = f.svc.reserve(f.member_ids[0].as_str(), f.book_id.as_str()).await.expect("reserve");
        assert_eq!(ReservationOutcome::Reserved, res.outcome);
    }
}

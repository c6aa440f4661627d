use std::sync::Arc;
use chrono::NaiveDateTime;
use crate::books::factory::create_book_repository;
use crate::books::repository::BookRepository;
use crate::catalog::domain::CatalogService;
use crate::catalog::factory::create_catalog_service;
use crate::circulation::domain::LoanService;
use crate::circulation::dto::{LoanDto, PaymentReceipt, ReturnReceipt};
use crate::circulation::factory::{create_loan_repository, create_loan_service};
use crate::circulation::repository::LoanRepository;
use crate::core::domain::Configuration;
use crate::core::library::{CirculationResult, WaitlistAction};
use crate::core::locks::EngineLocks;
use crate::core::money::Money;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::factory::create_publisher;
use crate::hold::domain::ReservationService;
use crate::hold::dto::{ReservationDto, WaitlistDto};
use crate::hold::factory::{create_hold_repository, create_reservation_service, create_waitlist_repository};
use crate::members::domain::MemberService;
use crate::members::factory::{create_member_repository, create_member_service};
use crate::members::repository::MemberRepository;
use crate::ratings::domain::RatingService;
use crate::ratings::dto::RatingDto;
use crate::ratings::factory::{create_rating_repository, create_rating_service};
use crate::recommendations::domain::RecommendationService;
use crate::recommendations::dto::RecommendationDto;
use crate::recommendations::factory::create_recommendation_service;
use crate::reports::domain::ReportService;
use crate::reports::dto::BorrowingReport;
use crate::reports::factory::create_report_service;

// CirculationEngine is the single context object owning every store and
// service; nothing in the crate holds ambient global state. The stores are
// shared between services through Arc, so e.g. a reserve and a borrow see
// the same copy counts.
pub struct CirculationEngine {
    config: Configuration,
    pub catalog: Arc<dyn CatalogService>,
    pub members: Arc<dyn MemberService>,
    pub loans: Arc<dyn LoanService>,
    pub reservations: Arc<dyn ReservationService>,
    pub ratings: Arc<dyn RatingService>,
    pub reports: Arc<dyn ReportService>,
    pub recommendations: Arc<dyn RecommendationService>,
    pub book_repository: Arc<dyn BookRepository>,
    pub member_repository: Arc<dyn MemberRepository>,
    pub loan_repository: Arc<dyn LoanRepository>,
}

impl CirculationEngine {
    pub fn new(config: Configuration) -> Self {
        let locks = Arc::new(EngineLocks::new());
        let publisher = create_publisher(GatewayPublisherVia::Logs);
        let book_repository = create_book_repository();
        let member_repository = create_member_repository();
        let loan_repository = create_loan_repository();
        let hold_repository = create_hold_repository();
        let waitlist_repository = create_waitlist_repository();
        let rating_repository = create_rating_repository();

        Self {
            catalog: create_catalog_service(book_repository.clone(), publisher.clone()),
            members: create_member_service(member_repository.clone(), publisher.clone()),
            loans: create_loan_service(loan_repository.clone(), book_repository.clone(),
                                       member_repository.clone(), locks.clone(), publisher.clone()),
            reservations: create_reservation_service(hold_repository, waitlist_repository,
                                                     book_repository.clone(), member_repository.clone(),
                                                     locks.clone(), publisher.clone()),
            ratings: create_rating_service(rating_repository, book_repository.clone(),
                                           member_repository.clone(), locks, publisher),
            reports: create_report_service(loan_repository.clone()),
            recommendations: create_recommendation_service(book_repository.clone(),
                                                           member_repository.clone(),
                                                           loan_repository.clone()),
            config,
            book_repository,
            member_repository,
            loan_repository,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    // policy-default conveniences; the underlying services accept explicit
    // overrides per call

    pub async fn borrow_book(&self, member_id: &str, book_id: &str) -> CirculationResult<LoanDto> {
        self.loans.borrow_book(member_id, book_id,
                               self.config.loan_days, self.config.skip_weekends).await
    }

    pub async fn return_book(&self, member_id: &str, book_id: &str) -> CirculationResult<ReturnReceipt> {
        self.loans.return_book(member_id, book_id,
                               self.config.daily_fine_rate, self.config.grace_days).await
    }

    pub async fn pay_balance(&self, member_id: &str, amount: Money) -> CirculationResult<PaymentReceipt> {
        self.loans.pay_balance(member_id, amount).await
    }

    pub async fn overdue_notifications(&self, as_of: NaiveDateTime) -> CirculationResult<Vec<String>> {
        self.loans.overdue_notifications(as_of).await
    }

    pub async fn reserve(&self, member_id: &str, book_id: &str) -> CirculationResult<ReservationDto> {
        self.reservations.reserve(member_id, book_id).await
    }

    pub async fn manage_waitlist(&self, book_id: &str, member_id: Option<&str>,
                                 action: WaitlistAction) -> CirculationResult<WaitlistDto> {
        self.reservations.manage_waitlist(book_id, member_id, action).await
    }

    pub async fn cancel_reservation(&self, member_id: &str, book_id: &str) -> CirculationResult<ReservationDto> {
        self.reservations.cancel(member_id, book_id).await
    }

    pub async fn rate_book(&self, member_id: &str, book_id: &str, rating: i32) -> CirculationResult<RatingDto> {
        self.ratings.rate_book(member_id, book_id, rating).await
    }

    pub async fn generate_borrowing_report(&self) -> CirculationResult<BorrowingReport> {
        self.reports.generate_borrowing_report(self.config.daily_fine_rate).await
    }

    pub async fn recommend(&self, member_id: &str) -> CirculationResult<Vec<RecommendationDto>> {
        self.recommendations.recommend(member_id, self.config.max_recommendations).await
    }
}

impl Default for CirculationEngine {
    fn default() -> Self {
        CirculationEngine::new(Configuration::new())
    }
}

#[cfg(test)]
mod tests {
    use crate::books::dto::BookDto;
    use crate::core::domain::Configuration;
    use crate::core::library::{CirculationError, RatingOutcome, ReservationOutcome, WaitlistAction, WaitlistOutcome};
    use crate::core::money::Money;
    use crate::engine::CirculationEngine;
    use crate::members::dto::MemberDto;

    async fn seed_book(engine: &CirculationEngine, title: &str, copies: i64) -> String {
        let book = BookDto::new("9780306406157", title, "Frank Herbert", "sci-fi", copies);
        engine.catalog.add_book(&book).await.expect("add book").book_id
    }

    async fn seed_member(engine: &CirculationEngine, name: &str) -> String {
        let member = MemberDto::new(name, format!("{}@example.com", name.to_lowercase()).as_str());
        engine.members.add_member(&member).await.expect("add member").member_id
    }

    #[tokio::test]
    async fn test_should_share_copy_counts_between_services() {
        let engine = CirculationEngine::default();
        let book_id = seed_book(&engine, "Dune", 1).await;
        let m1 = seed_member(&engine, "Matthew").await;
        let m2 = seed_member(&engine, "Rood").await;

        engine.borrow_book(m1.as_str(), book_id.as_str()).await.expect("borrow");
        // the reservation service sees the borrowed-out copy
        let res = engine.reserve(m2.as_str(), book_id.as_str()).await.expect("reserve");
        assert_eq!(ReservationOutcome::Waitlisted, res.outcome);
    }

    #[tokio::test]
    async fn test_should_run_reserve_waitlist_notify_scenario() {
        let engine = CirculationEngine::default();
        let book_id = seed_book(&engine, "Dune", 3).await;
        let m1 = seed_member(&engine, "Matthew").await;
        let m2 = seed_member(&engine, "Rood").await;
        let m3 = seed_member(&engine, "Eliza").await;

        // two copies out on loan leave exactly one free
        engine.borrow_book(m1.as_str(), book_id.as_str()).await.expect("borrow");
        let second = seed_member(&engine, "Abi").await;
        engine.borrow_book(second.as_str(), book_id.as_str()).await.expect("borrow");

        let res = engine.reserve(m2.as_str(), book_id.as_str()).await.expect("reserve");
        assert_eq!(ReservationOutcome::Reserved, res.outcome);
        let book = engine.catalog.find_book_by_id(book_id.as_str()).await.expect("find");
        assert_eq!(0, book.copies_available);

        let res = engine.reserve(m3.as_str(), book_id.as_str()).await.expect("reserve");
        assert_eq!(ReservationOutcome::Waitlisted, res.outcome);

        let notified = engine.manage_waitlist(book_id.as_str(), None, WaitlistAction::Notify)
            .await.expect("notify");
        assert_eq!(WaitlistOutcome::Notified, notified.outcome);
        assert_eq!(Some(m3.to_string()), notified.notified);
        assert!(notified.queue.is_empty());

        let drained = engine.manage_waitlist(book_id.as_str(), None, WaitlistAction::Notify)
            .await.expect("notify");
        assert_eq!(WaitlistOutcome::NoneWaiting, drained.outcome);
    }

    #[tokio::test]
    async fn test_should_keep_copies_within_bounds_through_round_trips() {
        let engine = CirculationEngine::default();
        let book_id = seed_book(&engine, "Dune", 2).await;
        let m1 = seed_member(&engine, "Matthew").await;
        let m2 = seed_member(&engine, "Rood").await;

        engine.borrow_book(m1.as_str(), book_id.as_str()).await.expect("borrow");
        engine.borrow_book(m2.as_str(), book_id.as_str()).await.expect("borrow");
        assert!(matches!(
            engine.reserve(seed_member(&engine, "Eliza").await.as_str(), book_id.as_str()).await,
            Ok(res) if res.outcome == ReservationOutcome::Waitlisted));

        engine.return_book(m1.as_str(), book_id.as_str()).await.expect("return");
        engine.return_book(m2.as_str(), book_id.as_str()).await.expect("return");
        let book = engine.catalog.find_book_by_id(book_id.as_str()).await.expect("find");
        assert_eq!(2, book.copies_available);
        assert_eq!(2, book.copies_total);
    }

    #[tokio::test]
    async fn test_should_aggregate_ratings_through_engine() {
        let engine = CirculationEngine::default();
        let book_id = seed_book(&engine, "Dune", 1).await;
        let m1 = seed_member(&engine, "Matthew").await;
        let m2 = seed_member(&engine, "Rood").await;

        let first = engine.rate_book(m1.as_str(), book_id.as_str(), 5).await.expect("rate");
        assert_eq!(RatingOutcome::Created, first.outcome);
        let second = engine.rate_book(m2.as_str(), book_id.as_str(), 3).await.expect("rate");
        assert_eq!(4.0, second.average);
    }

    #[tokio::test]
    async fn test_should_report_and_recommend_from_shared_ledger() {
        let engine = CirculationEngine::default();
        let dune = seed_book(&engine, "Dune", 2).await;
        let messiah = seed_book(&engine, "Dune Messiah", 2).await;
        let m1 = seed_member(&engine, "Matthew").await;

        engine.borrow_book(m1.as_str(), dune.as_str()).await.expect("borrow");
        let report = engine.generate_borrowing_report().await.expect("report");
        assert_eq!(1, report.total_loans);
        assert_eq!(1, report.active_loans);
        assert_eq!(Some(m1.to_string()), report.most_active_member);

        let recs = engine.recommend(m1.as_str()).await.expect("recommend");
        assert_eq!(1, recs.len());
        assert_eq!(messiah, recs[0].book_id);
    }

    #[tokio::test]
    async fn test_should_apply_configured_policy_defaults() {
        let mut config = Configuration::new();
        config.loan_days = 7;
        let engine = CirculationEngine::new(config);
        assert_eq!(7, engine.config().loan_days);

        let book_id = seed_book(&engine, "Dune", 1).await;
        let m1 = seed_member(&engine, "Matthew").await;
        let loan = engine.borrow_book(m1.as_str(), book_id.as_str()).await.expect("borrow");
        assert_eq!(7, (loan.due_at - loan.borrowed_at).num_days());
    }

    #[tokio::test]
    async fn test_should_propagate_not_found_through_engine() {
        let engine = CirculationEngine::default();
        assert!(matches!(engine.borrow_book("missing", "missing").await,
                         Err(CirculationError::NotFound { message: _ })));
        assert!(matches!(engine.pay_balance("missing", Money::from_cents(100)).await,
                         Err(CirculationError::NotFound { message: _ })));
    }
}

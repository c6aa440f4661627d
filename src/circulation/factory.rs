use std::sync::Arc;
use crate::books::repository::BookRepository;
use crate::circulation::domain::LoanService;
use crate::circulation::domain::service::LoanServiceImpl;
use crate::circulation::repository::LoanRepository;
use crate::circulation::repository::memory_loan_repository::MemoryLoanRepository;
use crate::core::locks::EngineLocks;
use crate::gateway::events::EventPublisher;
use crate::members::repository::MemberRepository;

pub fn create_loan_repository() -> Arc<dyn LoanRepository> {
    Arc::new(MemoryLoanRepository::new())
}

pub fn create_loan_service(loan_repository: Arc<dyn LoanRepository>,
                           book_repository: Arc<dyn BookRepository>,
                           member_repository: Arc<dyn MemberRepository>,
                           locks: Arc<EngineLocks>,
                           events_publisher: Arc<dyn EventPublisher>) -> Arc<dyn LoanService> {
    Arc::new(LoanServiceImpl::new(loan_repository, book_repository,
                                  member_repository, locks, events_publisher))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::books::factory::create_book_repository;
    use crate::circulation::factory::{create_loan_repository, create_loan_service};
    use crate::core::locks::EngineLocks;
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;
    use crate::members::factory::create_member_repository;

    #[tokio::test]
    async fn test_should_create_loan_service() {
        let svc = create_loan_service(
            create_loan_repository(), create_book_repository(), create_member_repository(),
            Arc::new(EngineLocks::new()), create_publisher(GatewayPublisherVia::Logs));
        let messages = svc.overdue_notifications(chrono::Utc::now().naive_utc()).await.expect("notify");
        assert!(messages.is_empty());
    }
}

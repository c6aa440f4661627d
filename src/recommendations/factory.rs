use std::sync::Arc;
use crate::books::repository::BookRepository;
use crate::circulation::repository::LoanRepository;
use crate::members::repository::MemberRepository;
use crate::recommendations::domain::RecommendationService;
use crate::recommendations::domain::service::RecommendationServiceImpl;

pub fn create_recommendation_service(book_repository: Arc<dyn BookRepository>,
                                     member_repository: Arc<dyn MemberRepository>,
                                     loan_repository: Arc<dyn LoanRepository>) -> Arc<dyn RecommendationService> {
    Arc::new(RecommendationServiceImpl::new(book_repository, member_repository, loan_repository))
}

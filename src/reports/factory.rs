use std::sync::Arc;
use crate::circulation::repository::LoanRepository;
use crate::reports::domain::ReportService;
use crate::reports::domain::service::ReportServiceImpl;

pub fn create_report_service(loan_repository: Arc<dyn LoanRepository>) -> Arc<dyn ReportService> {
    Arc::new(ReportServiceImpl::new(loan_repository))
}

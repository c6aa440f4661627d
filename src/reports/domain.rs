pub mod service;

use async_trait::async_trait;
use crate::core::library::CirculationResult;
use crate::core::money::Money;
use crate::reports::dto::BorrowingReport;

// ReportService derives usage summaries from the loan ledger; it never
// mutates state, so no reported fine ever touches a member balance.
#[async_trait]
pub trait ReportService: Sync + Send {
    async fn generate_borrowing_report(&self, fee_per_day: Money) -> CirculationResult<BorrowingReport>;
}

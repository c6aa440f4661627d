pub mod model;
pub mod service;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crate::circulation::dto::{LoanDto, PaymentReceipt, ReturnReceipt};
use crate::core::library::CirculationResult;
use crate::core::money::Money;

// LoanService owns the loan state machine: NoLoan -> Active -> Returned,
// with a fresh Active loan for the same pair allowed only after return.
#[async_trait]
pub trait LoanService: Sync + Send {
    async fn borrow_book(&self, member_id: &str, book_id: &str,
                         loan_days: i64, skip_weekends: bool) -> CirculationResult<LoanDto>;

    async fn return_book(&self, member_id: &str, book_id: &str,
                         daily_rate: Money, grace_days: i64) -> CirculationResult<ReturnReceipt>;

    // payment is capped at the outstanding balance; excess is discarded
    async fn pay_balance(&self, member_id: &str, amount: Money) -> CirculationResult<PaymentReceipt>;

    async fn overdue_notifications(&self, as_of: NaiveDateTime) -> CirculationResult<Vec<String>>;
}

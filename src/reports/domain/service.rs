use std::collections::BTreeMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use crate::circulation::repository::LoanRepository;
use crate::core::library::{CirculationResult, LoanStatus};
use crate::core::money::Money;
use crate::reports::domain::ReportService;
use crate::reports::dto::{BorrowingReport, MemberUsage};
use crate::utils::date::whole_days_late;

pub struct ReportServiceImpl {
    loan_repository: Arc<dyn LoanRepository>,
}

impl ReportServiceImpl {
    pub fn new(loan_repository: Arc<dyn LoanRepository>) -> Self {
        Self {
            loan_repository,
        }
    }
}

// first strict maximum in key order wins ties
fn max_by_count<'a, I: Iterator<Item = (&'a String, i64)>>(entries: I) -> Option<String> {
    let mut best: Option<(&'a String, i64)> = None;
    for (key, count) in entries {
        if best.map(|(_, max)| count > max).unwrap_or(true) {
            best = Some((key, count));
        }
    }
    best.map(|(key, _)| key.to_string())
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    async fn generate_borrowing_report(&self, fee_per_day: Money) -> CirculationResult<BorrowingReport> {
        let now = Utc::now().naive_utc();
        let loans = self.loan_repository.find_all().await?;

        let mut members: BTreeMap<String, MemberUsage> = BTreeMap::new();
        let mut books: BTreeMap<String, i64> = BTreeMap::new();
        let mut active_loans = 0;
        let mut returned_loans = 0;
        let mut overdue_loans = 0;
        let mut total_fines = Money::zero();

        for loan in &loans {
            match loan.status {
                LoanStatus::Active => active_loans += 1,
                LoanStatus::Returned => returned_loans += 1,
            }
            let usage = members.entry(loan.member_id.to_string()).or_default();
            usage.borrowed += 1;
            *books.entry(loan.book_id.to_string()).or_default() += 1;

            // overdue means the effective return moment fell strictly
            // after the due date; report fines are uncapped and have no
            // grace period
            let effective = loan.effective_returned_at(now);
            if effective > loan.due_at {
                overdue_loans += 1;
                usage.overdue += 1;
                let fine = fee_per_day * whole_days_late(loan.due_at, effective);
                usage.fines += fine;
                total_fines += fine;
            }
        }

        let most_active_member = max_by_count(
            members.iter().map(|(id, usage)| (id, usage.borrowed)));
        let most_borrowed_book = max_by_count(
            books.iter().map(|(id, count)| (id, *count)));

        debug!(total = loans.len(), overdue = overdue_loans, "borrowing report generated");
        Ok(BorrowingReport {
            generated_at: now,
            fee_per_day,
            total_loans: loans.len() as i64,
            active_loans,
            returned_loans,
            overdue_loans,
            total_fines,
            members,
            books,
            most_active_member,
            most_borrowed_book,
        })
    }
}

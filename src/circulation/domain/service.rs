use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use tracing::{info, warn};
use crate::books::repository::BookRepository;
use crate::circulation::domain::LoanService;
use crate::circulation::domain::model::{LoanEntity, LoanRecord};
use crate::circulation::dto::{LoanDto, PaymentReceipt, ReturnReceipt};
use crate::circulation::repository::LoanRepository;
use crate::core::events::DomainEvent;
use crate::core::library::{CirculationError, CirculationResult, LoanStatus};
use crate::core::locks::EngineLocks;
use crate::core::money::Money;
use crate::gateway::events::EventPublisher;
use crate::members::repository::MemberRepository;
use crate::utils::date::{due_date, whole_days_late};

pub struct LoanServiceImpl {
    loan_repository: Arc<dyn LoanRepository>,
    book_repository: Arc<dyn BookRepository>,
    member_repository: Arc<dyn MemberRepository>,
    locks: Arc<EngineLocks>,
    events_publisher: Arc<dyn EventPublisher>,
}

impl LoanServiceImpl {
    pub fn new(loan_repository: Arc<dyn LoanRepository>,
               book_repository: Arc<dyn BookRepository>,
               member_repository: Arc<dyn MemberRepository>,
               locks: Arc<EngineLocks>,
               events_publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            loan_repository,
            book_repository,
            member_repository,
            locks,
            events_publisher,
        }
    }
}

#[async_trait]
impl LoanService for LoanServiceImpl {
    async fn borrow_book(&self, member_id: &str, book_id: &str,
                         loan_days: i64, skip_weekends: bool) -> CirculationResult<LoanDto> {
        let _guards = self.locks.book_then_member(book_id, member_id).await;

        let book = self.book_repository.get(book_id).await?;
        let mut member = self.member_repository.get(member_id).await?;
        if !member.active {
            warn!(member_id, book_id, "rejected borrow for inactive member");
            return Err(CirculationError::validation(
                format!("member {} account is inactive", member_id).as_str(), Some("400".to_string())));
        }
        if self.loan_repository.find_active(member_id, book_id).await?.is_some() {
            return Err(CirculationError::already_borrowed(
                format!("member {} already has an active loan for {}", member_id, book_id).as_str()));
        }
        if book.copies_available <= 0 {
            return Err(CirculationError::no_copies(
                format!("no copies available for {}", book_id).as_str()));
        }

        self.book_repository.adjust_copies(book_id, -1).await?;
        let now = Utc::now().naive_utc();
        let loan = LoanEntity::new(book_id, member_id, now, due_date(now, loan_days, skip_weekends));
        self.loan_repository.create(&loan).await?;
        // the member's loan map is the authoritative per-member history;
        // re-borrowing after return overwrites the entry for this book
        member.loans.insert(book_id.to_string(), LoanRecord::from(&loan));
        self.member_repository.update(&member).await?;

        info!(member_id, book_id, due_at = %loan.due_at, "book borrowed");
        let dto = LoanDto::from(&loan);
        let _ = self.events_publisher.publish(&DomainEvent::added(
            "book_borrowed", "circulation", loan.loan_id.as_str(), &HashMap::new(), &dto.clone())?).await?;
        Ok(dto)
    }

    async fn return_book(&self, member_id: &str, book_id: &str,
                         daily_rate: Money, grace_days: i64) -> CirculationResult<ReturnReceipt> {
        let _guards = self.locks.book_then_member(book_id, member_id).await;

        let mut loan = self.loan_repository.find_active(member_id, book_id).await?
            .ok_or_else(|| CirculationError::no_active_loan(
                format!("no active loan for member {} and book {}", member_id, book_id).as_str()))?;

        let now = Utc::now().naive_utc();
        loan.status = LoanStatus::Returned;
        loan.returned_at = Some(now);
        self.loan_repository.update(&loan).await?;

        // credit the copy back, never past copies_total
        let book = self.book_repository.get(book_id).await?;
        if book.copies_available < book.copies_total {
            self.book_repository.adjust_copies(book_id, 1).await?;
        }

        let days_late = whole_days_late(loan.due_at, now);
        let effective_late_days = (days_late - grace_days).max(0);
        let fine = daily_rate * effective_late_days;

        let mut member = self.member_repository.get(member_id).await?;
        if let Some(record) = member.loans.get_mut(book_id) {
            record.returned_at = Some(now);
        }
        member.balance += fine;
        self.member_repository.update(&member).await?;

        info!(member_id, book_id, days_late, fine = %fine, "book returned");
        let dto = LoanDto::from(&loan);
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "book_returned", "circulation", loan.loan_id.as_str(), &HashMap::new(), &dto.clone())?).await?;
        Ok(ReturnReceipt {
            loan: dto,
            days_late,
            effective_late_days,
            fine,
            balance: member.balance,
        })
    }

    async fn pay_balance(&self, member_id: &str, amount: Money) -> CirculationResult<PaymentReceipt> {
        if !amount.is_positive() {
            return Err(CirculationError::invalid_amount(
                format!("payment must be positive, got {}", amount).as_str()));
        }
        let _guard = self.locks.member(member_id).await;

        let mut member = self.member_repository.get(member_id).await?;
        // overpayment is capped; the excess is not tracked as credit
        let applied = amount.min(member.balance);
        member.balance -= applied;
        self.member_repository.update(&member).await?;

        info!(member_id, applied = %applied, balance = %member.balance, "balance payment");
        let receipt = PaymentReceipt {
            member_id: member_id.to_string(),
            applied,
            balance: member.balance,
        };
        let _ = self.events_publisher.publish(&DomainEvent::updated(
            "balance_paid", "circulation", member_id, &HashMap::new(), &receipt.clone())?).await?;
        Ok(receipt)
    }

    async fn overdue_notifications(&self, as_of: NaiveDateTime) -> CirculationResult<Vec<String>> {
        let loans = self.loan_repository.find_all().await?;
        let mut messages = Vec::new();
        for loan in loans.iter().filter(|l| l.is_active() && l.due_at < as_of) {
            let days_late = whole_days_late(loan.due_at, as_of);
            messages.push(format!(
                "[OVERDUE] member {}: book {} was due on {} and is {} day(s) late (loan {})",
                loan.member_id, loan.book_id, loan.due_at.date(), days_late, loan.loan_id));
        }
        Ok(messages)
    }
}

impl From<&LoanEntity> for LoanDto {
    fn from(other: &LoanEntity) -> LoanDto {
        LoanDto {
            loan_id: other.loan_id.to_string(),
            version: other.version,
            book_id: other.book_id.to_string(),
            member_id: other.member_id.to_string(),
            status: other.status,
            borrowed_at: other.borrowed_at,
            due_at: other.due_at,
            returned_at: other.returned_at,
        }
    }
}

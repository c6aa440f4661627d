use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::library::LoanStatus;
use crate::core::money::Money;
use crate::utils::date::serializer;

// LoanDto is a data transfer object for the loan service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDto {
    pub loan_id: String,
    pub version: i64,
    pub book_id: String,
    pub member_id: String,
    pub status: LoanStatus,
    #[serde(with = "serializer")]
    pub borrowed_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    pub returned_at: Option<NaiveDateTime>,
}

// ReturnReceipt reports the outcome of a return: the closed loan, the late
// days after grace, the assessed fine and the member's updated balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnReceipt {
    pub loan: LoanDto,
    pub days_late: i64,
    pub effective_late_days: i64,
    pub fine: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub member_id: String,
    pub applied: Money,
    pub balance: Money,
}

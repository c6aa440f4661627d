use std::collections::BTreeMap;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::money::Money;
use crate::utils::date::serializer;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberUsage {
    pub borrowed: i64,
    pub overdue: i64,
    pub fines: Money,
}

// BorrowingReport is a point-in-time summary of the ledger; per-member and
// per-book breakdowns are BTreeMaps so iteration order, and therefore the
// most-active tie break, is stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowingReport {
    #[serde(with = "serializer")]
    pub generated_at: NaiveDateTime,
    pub fee_per_day: Money,
    pub total_loans: i64,
    pub active_loans: i64,
    pub returned_loans: i64,
    pub overdue_loans: i64,
    pub total_fines: Money,
    pub members: BTreeMap<String, MemberUsage>,
    pub books: BTreeMap<String, i64>,
    pub most_active_member: Option<String>,
    pub most_borrowed_book: Option<String>,
}

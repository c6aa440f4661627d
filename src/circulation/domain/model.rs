use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::core::domain::Identifiable;
use crate::core::library::LoanStatus;
use crate::utils::date::serializer;

// LoanEntity abstracts a borrow transaction; created on borrow, mutated
// once on return, never deleted.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanEntity {
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
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl LoanEntity {
    pub fn new(book_id: &str, member_id: &str, borrowed_at: NaiveDateTime, due_at: NaiveDateTime) -> Self {
        Self {
            loan_id: Uuid::new_v4().to_string(),
            version: 0,
            book_id: book_id.to_string(),
            member_id: member_id.to_string(),
            status: LoanStatus::Active,
            borrowed_at,
            due_at,
            returned_at: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }

    // effective return moment for overdue accounting: the recorded return,
    // the due date itself when marked returned without one, or now while
    // the loan is still active
    pub fn effective_returned_at(&self, now: NaiveDateTime) -> NaiveDateTime {
        match self.returned_at {
            Some(at) => at,
            None if self.status == LoanStatus::Returned => self.due_at,
            None => now,
        }
    }
}

impl Identifiable for LoanEntity {
    fn id(&self) -> String {
        self.loan_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// LoanRecord is the compact per-member form mirrored into the member's
// loan map; an absent returned_at means the loan is still active.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanRecord {
    pub book_id: String,
    #[serde(with = "serializer")]
    pub borrowed_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub due_at: NaiveDateTime,
    pub returned_at: Option<NaiveDateTime>,
}

impl From<&LoanEntity> for LoanRecord {
    fn from(other: &LoanEntity) -> LoanRecord {
        LoanRecord {
            book_id: other.book_id.to_string(),
            borrowed_at: other.borrowed_at,
            due_at: other.due_at,
            returned_at: other.returned_at,
        }
    }
}

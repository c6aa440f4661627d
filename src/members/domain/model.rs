use std::collections::{HashMap, HashSet};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::circulation::domain::model::LoanRecord;
use crate::core::domain::Identifiable;
use crate::core::money::Money;
use crate::members::Member;
use crate::utils::date::serializer;

// MemberEntity abstracts a library account; `loans` is the authoritative
// per-member loan history keyed by book id, one entry per book ever
// borrowed, and the balance never drops below zero.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct MemberEntity {
    pub member_id: String,
    pub version: i64,
    pub name: String,
    pub email: String,
    pub active: bool,
    pub balance: Money,
    pub preference_tags: HashSet<String>,
    pub preference_authors: HashSet<String>,
    pub loans: HashMap<String, LoanRecord>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl MemberEntity {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            member_id: Uuid::new_v4().to_string(),
            version: 0,
            name: name.to_string(),
            email: email.to_string(),
            active: true,
            balance: Money::zero(),
            preference_tags: HashSet::new(),
            preference_authors: HashSet::new(),
            loans: HashMap::new(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    pub fn active_loan_count(&self) -> usize {
        self.loans.values().filter(|record| record.returned_at.is_none()).count()
    }
}

impl Identifiable for MemberEntity {
    fn id(&self) -> String {
        self.member_id.to_string()
    }

    fn version(&self) -> i64 {
        self.version
    }
}

impl Member for MemberEntity {
    fn is_active(&self) -> bool {
        self.active
    }
}

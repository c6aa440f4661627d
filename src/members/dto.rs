use std::collections::{HashMap, HashSet};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::circulation::domain::model::LoanRecord;
use crate::core::money::Money;
use crate::utils::date::serializer;

// MemberDto is a data transfer object for the member service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDto {
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

impl MemberDto {
    pub fn new(name: &str, email: &str) -> MemberDto {
        MemberDto {
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

    pub fn with_preferences(mut self, tags: &[&str], authors: &[&str]) -> Self {
        self.preference_tags = tags.iter().map(|t| t.to_string()).collect();
        self.preference_authors = authors.iter().map(|a| a.to_string()).collect();
        self
    }
}

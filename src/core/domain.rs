use serde::{Deserialize, Serialize};
use crate::core::money::Money;

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

// Configuration abstracts circulation policy defaults; individual operations
// accept explicit overrides per call.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub loan_days: i64,
    pub skip_weekends: bool,
    pub daily_fine_rate: Money,
    pub grace_days: i64,
    pub max_recommendations: usize,
}

impl Configuration {
    pub fn new() -> Self {
        Configuration {
            loan_days: 14,
            skip_weekends: false,
            daily_fine_rate: Money::from_cents(25),
            grace_days: 1,
            max_recommendations: 5,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}

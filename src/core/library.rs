use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum CirculationError {
    NotFound {
        message: String,
    },
    // Copy count or rating outside its valid bounds.
    OutOfRange {
        message: String,
    },
    NoCopiesAvailable {
        message: String,
    },
    AlreadyBorrowed {
        message: String,
    },
    NoActiveLoan {
        message: String,
    },
    InvalidAmount {
        message: String,
    },
    // Duplicate create or stale-version update against a store.
    Conflict {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl CirculationError {
    pub fn not_found(message: &str) -> CirculationError {
        CirculationError::NotFound { message: message.to_string() }
    }

    pub fn out_of_range(message: &str) -> CirculationError {
        CirculationError::OutOfRange { message: message.to_string() }
    }

    pub fn no_copies(message: &str) -> CirculationError {
        CirculationError::NoCopiesAvailable { message: message.to_string() }
    }

    pub fn already_borrowed(message: &str) -> CirculationError {
        CirculationError::AlreadyBorrowed { message: message.to_string() }
    }

    pub fn no_active_loan(message: &str) -> CirculationError {
        CirculationError::NoActiveLoan { message: message.to_string() }
    }

    pub fn invalid_amount(message: &str) -> CirculationError {
        CirculationError::InvalidAmount { message: message.to_string() }
    }

    pub fn conflict(message: &str) -> CirculationError {
        CirculationError::Conflict { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> CirculationError {
        CirculationError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> CirculationError {
        CirculationError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> CirculationError {
        CirculationError::Runtime { message: message.to_string(), reason_code }
    }

    // every engine error is local and recoverable; none aborts the process
    pub fn recoverable(&self) -> bool {
        true
    }
}

impl From<serde_json::Error> for CirculationError {
    fn from(err: serde_json::Error) -> Self {
        CirculationError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl Display for CirculationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CirculationError::NotFound { message } => {
                write!(f, "{}", message)
            }
            CirculationError::OutOfRange { message } => {
                write!(f, "{}", message)
            }
            CirculationError::NoCopiesAvailable { message } => {
                write!(f, "{}", message)
            }
            CirculationError::AlreadyBorrowed { message } => {
                write!(f, "{}", message)
            }
            CirculationError::NoActiveLoan { message } => {
                write!(f, "{}", message)
            }
            CirculationError::InvalidAmount { message } => {
                write!(f, "{}", message)
            }
            CirculationError::Conflict { message } => {
                write!(f, "{}", message)
            }
            CirculationError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            CirculationError::Serialization { message } => {
                write!(f, "{}", message)
            }
            CirculationError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

/// A specialized Result type for engine operations.
pub type CirculationResult<T> = Result<T, CirculationError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub fn new(page: Option<&str>, page_size: usize,
               next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Returned,
}

impl From<String> for LoanStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Returned" => LoanStatus::Returned,
            _ => LoanStatus::Active,
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LoanStatus::Active => write!(f, "Active"),
            LoanStatus::Returned => write!(f, "Returned"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum HoldStatus {
    Held,
    Canceled,
}

impl From<String> for HoldStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Canceled" => HoldStatus::Canceled,
            _ => HoldStatus::Held,
        }
    }
}

impl Display for HoldStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            HoldStatus::Held => write!(f, "Held"),
            HoldStatus::Canceled => write!(f, "Canceled"),
        }
    }
}

// Outcome of a reserve or cancel request; duplicates are idempotent
// informational results, not errors.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum ReservationOutcome {
    Reserved,
    AlreadyReserved,
    Waitlisted,
    AlreadyWaitlisted,
    Canceled,
}

impl Display for ReservationOutcome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ReservationOutcome::Reserved => write!(f, "Reserved"),
            ReservationOutcome::AlreadyReserved => write!(f, "AlreadyReserved"),
            ReservationOutcome::Waitlisted => write!(f, "Waitlisted"),
            ReservationOutcome::AlreadyWaitlisted => write!(f, "AlreadyWaitlisted"),
            ReservationOutcome::Canceled => write!(f, "Canceled"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum WaitlistAction {
    Add,
    Notify,
}

impl From<String> for WaitlistAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Notify" => WaitlistAction::Notify,
            _ => WaitlistAction::Add,
        }
    }
}

impl Display for WaitlistAction {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            WaitlistAction::Add => write!(f, "Add"),
            WaitlistAction::Notify => write!(f, "Notify"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum WaitlistOutcome {
    Added,
    AlreadyWaitlisted,
    NotNeeded,
    Notified,
    NoneWaiting,
}

impl Display for WaitlistOutcome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            WaitlistOutcome::Added => write!(f, "Added"),
            WaitlistOutcome::AlreadyWaitlisted => write!(f, "AlreadyWaitlisted"),
            WaitlistOutcome::NotNeeded => write!(f, "NotNeeded"),
            WaitlistOutcome::Notified => write!(f, "Notified"),
            WaitlistOutcome::NoneWaiting => write!(f, "NoneWaiting"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum RatingOutcome {
    Created,
    Updated,
}

impl Display for RatingOutcome {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            RatingOutcome::Created => write!(f, "Created"),
            RatingOutcome::Updated => write!(f, "Updated"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub enum Availability {
    Available,
    Unavailable,
}

impl From<String> for Availability {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Unavailable" => Availability::Unavailable,
            _ => Availability::Available,
        }
    }
}

impl Display for Availability {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Availability::Available => write!(f, "Available"),
            Availability::Unavailable => write!(f, "Unavailable"),
        }
    }
}

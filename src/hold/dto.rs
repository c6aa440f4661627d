use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::library::{HoldStatus, ReservationOutcome, WaitlistOutcome};
use crate::utils::date::serializer;

// HoldDto is a data transfer object for a recorded hold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldDto {
    pub hold_id: String,
    pub version: i64,
    pub book_id: String,
    pub member_id: String,
    pub status: HoldStatus,
    #[serde(with = "serializer")]
    pub held_at: NaiveDateTime,
    pub canceled_at: Option<NaiveDateTime>,
}

// ReservationDto reports the outcome of a reserve or cancel request; the
// hold is present only when a copy was actually held or released.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationDto {
    pub outcome: ReservationOutcome,
    pub book_id: String,
    pub member_id: String,
    pub hold: Option<HoldDto>,
}

// WaitlistDto reports a waitlist mutation together with the queue as it
// stands afterwards, front first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitlistDto {
    pub outcome: WaitlistOutcome,
    pub book_id: String,
    pub queue: Vec<String>,
    pub notified: Option<String>,
}

pub mod model;
pub mod service;

use async_trait::async_trait;
use crate::core::library::{CirculationResult, WaitlistAction};
use crate::hold::dto::{ReservationDto, WaitlistDto};

// ReservationService holds copies for members and queues them when no copy
// is free. Duplicate requests are idempotent outcomes, never errors.
#[async_trait]
pub trait ReservationService: Sync + Send {
    async fn reserve(&self, member_id: &str, book_id: &str) -> CirculationResult<ReservationDto>;

    // Add enqueues a member unless a copy is free; Notify pops the FIFO
    // front without granting a copy.
    async fn manage_waitlist(&self, book_id: &str, member_id: Option<&str>,
                             action: WaitlistAction) -> CirculationResult<WaitlistDto>;

    async fn cancel(&self, member_id: &str, book_id: &str) -> CirculationResult<ReservationDto>;
}

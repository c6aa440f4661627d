use async_trait::async_trait;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::CirculationError;
use crate::gateway::events::EventPublisher;

// LogPublisher emits domain events to the tracing pipeline; downstream
// consumers (durable outbox, message bus) plug in behind the same trait.
#[derive(Debug, Default)]
pub struct LogPublisher {}

impl LogPublisher {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), CirculationError> {
        info!(
            event_id = event.event_id.as_str(),
            name = event.name.as_str(),
            group = event.group.as_str(),
            key = event.key.as_str(),
            "published domain event"
        );
        Ok(())
    }
}

pub mod events;
pub mod factory;
pub mod logs;

#[derive(Debug, PartialEq)]
pub enum GatewayPublisherVia {
    Logs,
}

#[cfg(test)]
mod tests {
    use crate::gateway::GatewayPublisherVia;

    #[tokio::test]
    async fn test_should_create_logs_via() {
        let _ = GatewayPublisherVia::Logs;
    }
}

use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// LogPublisher forwards events to the tracing subscriber as structured records.
#[derive(Debug)]
pub struct LogPublisher {
    source: String,
}

impl LogPublisher {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_string(),
        }
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let json = serde_json::to_string(event)?;
        tracing::info!(source = self.source.as_str(), event_id = event.event_id.as_str(),
            name = event.name.as_str(), key = event.key.as_str(), event = json.as_str(), "domain event");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::events::EventPublisher;
    use crate::gateway::logs::publisher::LogPublisher;

    #[tokio::test]
    async fn test_should_publish_to_logs() {
        let data = HashMap::from([("a", 1), ("b", 2)]);
        let event = DomainEvent::updated("book_returned", "catalog", "key", &HashMap::new(), &data).expect("build event");
        let publisher = LogPublisher::new("test");
        let _ = publisher.publish(&event).await.expect("should publish");
        let _ = publisher.publish(&event).await.expect("should publish again");
    }
}

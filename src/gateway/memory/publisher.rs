use std::sync::RwLock;
use async_trait::async_trait;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

#[derive(Debug, Default)]
pub struct MemoryPublisher {
    events: RwLock<Vec<DomainEvent>>,
}

impl MemoryPublisher {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(vec![]),
        }
    }

    pub fn published(&self) -> Result<Vec<DomainEvent>, LibraryError> {
        Ok(self.events.read()?.clone())
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        self.events.write()?.push(event.clone());
        Ok(())
    }
}

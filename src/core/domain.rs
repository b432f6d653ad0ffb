use serde::{Deserialize, Serialize};
use crate::gateway::GatewayPublisherVia;

// Identifiable defines the lookup key shared by catalog entries
pub trait Identifiable : Sync + Send {
    fn id(&self) -> String;
}


// Configuration abstracts config options for library system
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub page_size: usize,
    pub publisher: GatewayPublisherVia,
    pub available_header: String,
    pub available_empty_message: String,
    pub catalog_header: String,
    pub catalog_empty_message: String,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            page_size: 100,
            publisher: GatewayPublisherVia::Memory,
            available_header: "Available books:".to_string(),
            available_empty_message: "No books are currently available.".to_string(),
            catalog_header: "Books in the library:".to_string(),
            catalog_empty_message: "The library is empty.".to_string(),
        }
    }

    pub fn with_publisher(mut self, publisher: GatewayPublisherVia) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        // a zero page would never advance the cursor
        self.page_size = page_size.max(1);
        self
    }
}

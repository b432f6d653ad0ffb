use serde::{Deserialize, Serialize};

pub mod events;
pub mod factory;
pub mod logs;
pub mod memory;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, clap::ValueEnum)]
pub enum GatewayPublisherVia {
    // keeps every event in process, in publish order
    Memory,
    // writes every event to the tracing subscriber
    Logs,
}

//! Network messages - communication between App and Network layers

use crate::models::{RequestSnapshot, ResponseOutcome};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Perform one HTTP exchange
    ExecuteRequest { id: u64, request: RequestSnapshot },
    /// Shutdown the network actor
    Shutdown,
}

/// Result of an `ExecuteRequest`, sent exactly once per id
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkResponse {
    pub id: u64,
    pub outcome: ResponseOutcome,
}

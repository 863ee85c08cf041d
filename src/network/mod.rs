//! Network layer - HTTP request execution
//!
//! The Network actor receives request commands and sends back one
//! outcome per command.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;

//! # Courier TUI
//!
//! A console request builder: pick a saved query, adjust its url, params,
//! headers and body, send it and read the response.
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - terminal input and drawing
//! - App Layer - single owner of state, folds events into it
//! - Network Layer (Tokio) - async HTTP execution

pub mod constants;
pub mod config;
pub mod models;
pub mod ui;
pub mod view;
pub mod messages;
pub mod app;
pub mod network;
pub mod mock_server;

// Re-export commonly used types
pub use config::Config;
pub use models::{HttpMethod, KeyValue, Query, RequestSnapshot, ResponseOutcome};
pub use messages::{AppEvent, NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use app::{AppActor, AppState};
pub use network::NetworkActor;

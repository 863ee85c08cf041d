//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Network layers.

pub mod ui_events;
pub mod network;
pub mod render;

pub use ui_events::{KeyPress, Mode, Tab, UiEvent};
pub use network::{NetworkCommand, NetworkResponse};
pub use render::RenderState;

/// Everything the App layer folds into its state, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Ui(UiEvent),
    Network(NetworkResponse),
}

impl From<UiEvent> for AppEvent {
    fn from(event: UiEvent) -> Self {
        AppEvent::Ui(event)
    }
}

impl From<NetworkResponse> for AppEvent {
    fn from(response: NetworkResponse) -> Self {
        AppEvent::Network(response)
    }
}

impl From<KeyPress> for AppEvent {
    fn from(key: KeyPress) -> Self {
        AppEvent::Ui(UiEvent::Key(key))
    }
}

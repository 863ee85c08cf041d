//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{Mode, Tab};
use crate::models::Query;

/// Complete state needed by the UI to render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub mode: Mode,
    pub current_tab: Tab,

    // Current query, copied out of the saved set
    pub query: Query,

    // Sidebar
    pub query_names: Vec<String>,
    pub focused_query: usize,

    // List focus
    pub focused_header: usize,
    pub focused_param: usize,

    // Single-line editor
    pub edit_buffer: String,
    pub edit_cursor: usize,

    // Body editor
    pub body_cursor: usize,

    pub response_scroll: u16,
    pub show_help: bool,
}

impl RenderState {
    /// The body editor has input focus whenever the Body tab is open
    pub fn body_focused(&self) -> bool {
        self.current_tab == Tab::Body
    }
}

impl Default for RenderState {
    fn default() -> Self {
        crate::app::AppState::default().to_render_state()
    }
}

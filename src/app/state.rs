//! App state - pure data structure with no I/O logic

use crate::messages::ui_events::{Mode, Tab};
use crate::messages::RenderState;
use crate::models::{seed_queries, KeyValue, Query};

/// Last known terminal size
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// The single send that may be outstanding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: u64,
    /// Query the outcome belongs to, even if the user selects another
    pub query_index: usize,
}

/// Main application state - pure data, no I/O
#[derive(Clone, Debug)]
pub struct AppState {
    // Saved set; never empty
    pub queries: Vec<Query>,
    /// Index of the current query, also the sidebar focus
    pub focused_query: usize,

    pub mode: Mode,
    pub current_tab: Tab,

    // List focus within the current query
    pub focused_header: usize,
    pub focused_param: usize,

    // Single-line editor for url/header/param text
    pub edit_buffer: String,
    pub edit_cursor: usize,

    // Byte offset into the current query's body
    pub body_cursor: usize,

    pub response_scroll: u16,
    pub show_help: bool,
    pub viewport: Viewport,

    pub next_request_id: u64,
    pub pending: Option<PendingRequest>,
}

impl Default for AppState {
    fn default() -> Self {
        use crate::constants::DEFAULT_BASE_URL;
        Self::with_queries(seed_queries(DEFAULT_BASE_URL))
    }
}

impl AppState {
    /// Start a session over `queries`; the first one becomes current
    pub fn with_queries(mut queries: Vec<Query>) -> Self {
        if queries.is_empty() {
            queries.push(Query::default());
        }
        let body_cursor = queries[0].body.len();
        AppState {
            queries,
            focused_query: 0,
            mode: Mode::SelectingQuery,
            current_tab: Tab::Headers,
            focused_header: 0,
            focused_param: 0,
            edit_buffer: String::new(),
            edit_cursor: 0,
            body_cursor,
            response_scroll: 0,
            show_help: true,
            viewport: Viewport::default(),
            next_request_id: 1,
            pending: None,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn current_query(&self) -> &Query {
        &self.queries[self.focused_query]
    }

    pub fn current_query_mut(&mut self) -> &mut Query {
        &mut self.queries[self.focused_query]
    }

    /// Header under focus, if the list is non-empty
    pub fn focused_header(&self) -> Option<&KeyValue> {
        self.current_query().headers.get(self.focused_header)
    }

    pub fn focused_param(&self) -> Option<&KeyValue> {
        self.current_query().query_params.get(self.focused_param)
    }

    pub fn is_quitting(&self) -> bool {
        self.mode == Mode::Quitting
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            mode: self.mode,
            current_tab: self.current_tab,
            query: self.current_query().clone(),
            query_names: self.queries.iter().map(|q| q.name.clone()).collect(),
            focused_query: self.focused_query,
            focused_header: self.focused_header,
            focused_param: self.focused_param,
            edit_buffer: self.edit_buffer.clone(),
            edit_cursor: self.edit_cursor,
            body_cursor: self.body_cursor,
            response_scroll: self.response_scroll,
            show_help: self.show_help,
        }
    }
}

//! Command handlers - the transition function over AppState
//!
//! Every event is folded into state by `AppState::update`. The only side
//! effect leaving this module is the returned `NetworkCommand`.

use crate::app::keymap::{action_for, Action};
use crate::app::state::{AppState, PendingRequest, Viewport};
use crate::messages::ui_events::{KeyPress, Mode, Tab, UiEvent};
use crate::messages::{AppEvent, NetworkCommand, NetworkResponse};
use crate::models::{KeyValue, ResponseOutcome};

/// Which list a single-line edit targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Headers,
    Params,
}

impl ListKind {
    fn for_tab(tab: Tab) -> Option<ListKind> {
        match tab {
            Tab::Headers => Some(ListKind::Headers),
            Tab::QueryParams => Some(ListKind::Params),
            _ => None,
        }
    }

    fn adding_mode(&self) -> Mode {
        match self {
            ListKind::Headers => Mode::AddingHeader,
            ListKind::Params => Mode::AddingQueryParam,
        }
    }

    fn editing_mode(&self) -> Mode {
        match self {
            ListKind::Headers => Mode::EditingHeader,
            ListKind::Params => Mode::EditingQueryParam,
        }
    }
}

impl AppState {
    /// Fold one event into state; returns the command to launch, if any
    pub fn update(&mut self, event: AppEvent) -> Option<NetworkCommand> {
        match event {
            AppEvent::Ui(UiEvent::Resize { width, height }) => {
                self.resize(width, height);
                None
            }
            AppEvent::Ui(UiEvent::Key(key)) => self.handle_key(key),
            AppEvent::Network(response) => {
                self.handle_response(response);
                None
            }
        }
    }

    fn handle_key(&mut self, key: KeyPress) -> Option<NetworkCommand> {
        if self.mode == Mode::Quitting {
            return None;
        }
        if self.mode.is_text_edit() {
            self.handle_text_edit_key(key);
            return None;
        }
        // The body editor owns the keyboard while its tab is open,
        // unless the query selector has been opened on top of it
        if self.current_tab == Tab::Body && self.mode != Mode::SelectingQuery {
            self.handle_body_key(key);
            return None;
        }

        let action = action_for(key)?;
        self.handle_action(action)
    }

    fn handle_action(&mut self, action: Action) -> Option<NetworkCommand> {
        let awaiting = self.mode == Mode::AwaitingResponse;

        match action {
            Action::TabRight => self.switch_tab(self.current_tab.next()),
            Action::TabLeft => self.switch_tab(self.current_tab.prev()),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::Quit => self.quit(),

            Action::ListNext if self.scrolls_response() => self.scroll_down(),
            Action::ListPrev if self.scrolls_response() => self.scroll_up(),

            // Anything below would change mode or the request model
            _ if awaiting => {}

            Action::ListNext => {
                if self.mode == Mode::SelectingQuery {
                    self.select_query(self.focused_query + 1);
                } else if let Some(kind) = ListKind::for_tab(self.current_tab) {
                    self.focus_next(kind);
                }
            }
            Action::ListPrev => {
                if self.mode == Mode::SelectingQuery {
                    self.select_query(self.focused_query.saturating_sub(1));
                } else if let Some(kind) = ListKind::for_tab(self.current_tab) {
                    self.focus_prev(kind);
                }
            }
            Action::ListAdd => {
                if let Some(kind) = ListKind::for_tab(self.current_tab) {
                    self.start_edit(kind.adding_mode(), String::new());
                }
            }
            Action::ListDelete => {
                if let Some(kind) = ListKind::for_tab(self.current_tab) {
                    self.delete_focused(kind);
                }
            }
            Action::EditUrl => {
                if self.current_tab == Tab::Headers {
                    let url = self.current_query().url.clone();
                    self.start_edit(Mode::EditingUrl, url);
                }
            }
            Action::Confirm => return self.confirm(),
            Action::ToggleQuerySelector => {
                self.mode = if self.mode == Mode::SelectingQuery {
                    Mode::Browsing
                } else {
                    Mode::SelectingQuery
                };
            }
            Action::Unfocus => {
                if self.mode == Mode::SelectingQuery {
                    self.mode = Mode::Browsing;
                }
            }
        }

        None
    }

    /// Up/down scroll the response viewer unless the selector is open
    fn scrolls_response(&self) -> bool {
        self.current_tab == Tab::Response && self.mode != Mode::SelectingQuery
    }

    fn confirm(&mut self) -> Option<NetworkCommand> {
        if self.mode == Mode::SelectingQuery {
            self.mode = Mode::Browsing;
            return None;
        }

        match ListKind::for_tab(self.current_tab) {
            Some(ListKind::Headers) if self.focused_header().is_some() => {
                let text = self.focused_header().map(KeyValue::to_edit_string).unwrap_or_default();
                self.start_edit(Mode::EditingHeader, text);
                None
            }
            Some(ListKind::Params) if self.focused_param().is_some() => {
                let text = self.focused_param().map(KeyValue::to_edit_string).unwrap_or_default();
                self.start_edit(Mode::EditingQueryParam, text);
                None
            }
            _ => self.send(),
        }
    }

    // ========================
    // Sending
    // ========================

    fn send(&mut self) -> Option<NetworkCommand> {
        if !matches!(self.mode, Mode::Browsing | Mode::ShowingResponse | Mode::ShowingError) {
            return None;
        }

        let id = self.next_id();
        self.pending = Some(PendingRequest {
            id,
            query_index: self.focused_query,
        });
        self.mode = Mode::AwaitingResponse;

        let query = self.current_query();
        tracing::info!(id, query = %query.name, url = %query.url, "Launching request");
        Some(NetworkCommand::ExecuteRequest {
            id,
            request: query.snapshot(),
        })
    }

    /// Apply an executor result to the query it was launched for
    pub fn handle_response(&mut self, response: NetworkResponse) {
        let pending = match self.pending {
            Some(pending) if pending.id == response.id => pending,
            _ => {
                tracing::warn!(id = response.id, "Ignoring response for a request that is not in flight");
                return;
            }
        };
        self.pending = None;

        let success = response.outcome.is_success();
        if let Some(query) = self.queries.get_mut(pending.query_index) {
            query.last_response = Some(response.outcome);
        }

        if self.mode == Mode::Quitting {
            return;
        }
        if success {
            self.mode = Mode::ShowingResponse;
            self.current_tab = Tab::Response;
            self.response_scroll = 0;
        } else {
            self.mode = Mode::ShowingError;
        }
    }

    // ========================
    // Navigation
    // ========================

    fn switch_tab(&mut self, tab: Tab) {
        if self.mode.is_text_edit() {
            return;
        }
        if tab == Tab::Body && self.current_tab != Tab::Body {
            self.body_cursor = self.current_query().body.len();
        }
        self.current_tab = tab;
    }

    fn select_query(&mut self, index: usize) {
        let index = index.min(self.queries.len() - 1);
        if index == self.focused_query {
            return;
        }
        self.focused_query = index;
        self.focused_header = 0;
        self.focused_param = 0;
        self.response_scroll = 0;
        self.body_cursor = self.current_query().body.len();
    }

    fn quit(&mut self) {
        if self.current_tab == Tab::Body || self.mode.is_text_edit() {
            return;
        }
        tracing::info!("Quit requested");
        self.mode = Mode::Quitting;
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport { width, height };
        self.response_scroll = self.response_scroll.min(self.max_response_scroll());
    }

    fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    fn scroll_down(&mut self) {
        self.response_scroll = self
            .response_scroll
            .saturating_add(1)
            .min(self.max_response_scroll());
    }

    /// Number of lines the Response tab shows for the current query
    fn max_response_scroll(&self) -> u16 {
        let lines = match &self.current_query().last_response {
            Some(ResponseOutcome::Success { headers, body_text, .. }) => {
                headers.len() + body_text.lines().count() + 1
            }
            Some(ResponseOutcome::Failure { .. }) | None => 1,
        };
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    }

    // ========================
    // Headers / params lists
    // ========================

    fn list_len(&self, kind: ListKind) -> usize {
        match kind {
            ListKind::Headers => self.current_query().headers.len(),
            ListKind::Params => self.current_query().query_params.len(),
        }
    }

    fn focus_mut(&mut self, kind: ListKind) -> &mut usize {
        match kind {
            ListKind::Headers => &mut self.focused_header,
            ListKind::Params => &mut self.focused_param,
        }
    }

    fn focus_next(&mut self, kind: ListKind) {
        let len = self.list_len(kind);
        let focus = self.focus_mut(kind);
        if *focus + 1 < len {
            *focus += 1;
        } else {
            // Walking off the end of the list starts a new entry
            self.start_edit(kind.adding_mode(), String::new());
        }
    }

    fn focus_prev(&mut self, kind: ListKind) {
        let focus = self.focus_mut(kind);
        *focus = focus.saturating_sub(1);
    }

    fn delete_focused(&mut self, kind: ListKind) {
        let query = &mut self.queries[self.focused_query];
        let (list, focus) = match kind {
            ListKind::Headers => (&mut query.headers, &mut self.focused_header),
            ListKind::Params => (&mut query.query_params, &mut self.focused_param),
        };
        if *focus < list.len() {
            list.remove(*focus);
        }
        if *focus >= list.len() {
            *focus = list.len().saturating_sub(1);
        }
    }

    // ========================
    // Single-line editing
    // ========================

    fn start_edit(&mut self, mode: Mode, text: String) {
        self.edit_cursor = text.len();
        self.edit_buffer = text;
        self.mode = mode;
    }

    fn handle_text_edit_key(&mut self, key: KeyPress) {
        match key {
            KeyPress::Enter => self.commit_edit(),
            KeyPress::Esc => self.cancel_edit(),
            KeyPress::Char(c) => insert_char(&mut self.edit_buffer, &mut self.edit_cursor, c),
            KeyPress::Backspace => delete_char(&mut self.edit_buffer, &mut self.edit_cursor),
            KeyPress::Left => move_cursor_left(&self.edit_buffer, &mut self.edit_cursor),
            KeyPress::Right => move_cursor_right(&self.edit_buffer, &mut self.edit_cursor),
            _ => {}
        }
    }

    fn commit_edit(&mut self) {
        let text = std::mem::take(&mut self.edit_buffer);
        self.edit_cursor = 0;

        let mode = self.mode;
        self.mode = Mode::Browsing;

        if mode == Mode::EditingUrl {
            self.current_query_mut().url = text;
            return;
        }

        let kind = match mode {
            Mode::AddingHeader | Mode::EditingHeader => ListKind::Headers,
            Mode::AddingQueryParam | Mode::EditingQueryParam => ListKind::Params,
            _ => return,
        };
        let Some(entry) = KeyValue::parse(&text) else {
            tracing::debug!(input = %text, "Discarding entry without a ':' separator");
            return;
        };

        let query = &mut self.queries[self.focused_query];
        let (list, focus) = match kind {
            ListKind::Headers => (&mut query.headers, &mut self.focused_header),
            ListKind::Params => (&mut query.query_params, &mut self.focused_param),
        };
        if mode == kind.editing_mode() {
            if let Some(slot) = list.get_mut(*focus) {
                *slot = entry;
            }
        } else {
            list.push(entry);
            *focus = list.len() - 1;
        }
    }

    fn cancel_edit(&mut self) {
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.mode = Mode::Browsing;
    }

    // ========================
    // Body editor
    // ========================

    fn handle_body_key(&mut self, key: KeyPress) {
        match key {
            KeyPress::Right => self.switch_tab(Tab::Response),
            KeyPress::Left => self.switch_tab(Tab::Headers),
            KeyPress::Esc => self.current_tab = Tab::Headers,
            KeyPress::Tab => {
                if self.mode != Mode::AwaitingResponse {
                    self.mode = Mode::SelectingQuery;
                }
            }
            KeyPress::Enter => self.body_insert('\n'),
            KeyPress::Char(c) => self.body_insert(c),
            KeyPress::Backspace => {
                let body = &mut self.queries[self.focused_query].body;
                delete_char(body, &mut self.body_cursor);
            }
            KeyPress::Up => {
                let body = &self.queries[self.focused_query].body;
                self.body_cursor = line_up(body, self.body_cursor);
            }
            KeyPress::Down => {
                let body = &self.queries[self.focused_query].body;
                self.body_cursor = line_down(body, self.body_cursor);
            }
            KeyPress::CtrlC => {}
        }
    }

    fn body_insert(&mut self, c: char) {
        let body = &mut self.queries[self.focused_query].body;
        insert_char(body, &mut self.body_cursor, c);
    }
}

// ========================
// Cursor helpers (byte offsets on char boundaries)
// ========================

fn insert_char(text: &mut String, cursor: &mut usize, c: char) {
    let pos = (*cursor).min(text.len());
    text.insert(pos, c);
    *cursor = pos + c.len_utf8();
}

fn delete_char(text: &mut String, cursor: &mut usize) {
    let pos = (*cursor).min(text.len());
    if pos == 0 {
        return;
    }
    let prev = text[..pos].char_indices().last().map(|(i, _)| i).unwrap_or(0);
    text.remove(prev);
    *cursor = prev;
}

fn move_cursor_left(text: &str, cursor: &mut usize) {
    let pos = (*cursor).min(text.len());
    *cursor = text[..pos].char_indices().last().map(|(i, _)| i).unwrap_or(0);
}

fn move_cursor_right(text: &str, cursor: &mut usize) {
    let pos = (*cursor).min(text.len());
    *cursor = text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len());
}

fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len())
}

/// Byte offset `column` chars into the line starting at `start`, clamped to the line
fn offset_in_line(text: &str, start: usize, column: usize) -> usize {
    let end = line_end(text, start);
    text[start..end]
        .char_indices()
        .nth(column)
        .map(|(i, _)| start + i)
        .unwrap_or(end)
}

fn line_up(text: &str, cursor: usize) -> usize {
    let pos = cursor.min(text.len());
    let start = line_start(text, pos);
    if start == 0 {
        return 0;
    }
    let column = text[start..pos].chars().count();
    let prev_start = line_start(text, start - 1);
    offset_in_line(text, prev_start, column)
}

fn line_down(text: &str, cursor: usize) -> usize {
    let pos = cursor.min(text.len());
    let end = line_end(text, pos);
    if end == text.len() {
        return text.len();
    }
    let column = text[line_start(text, pos)..pos].chars().count();
    offset_in_line(text, end + 1, column)
}

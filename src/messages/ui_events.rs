//! UI events - messages from UI layer to App layer

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys the app reacts to, decoded from the terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    Enter,
    Esc,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    CtrlC,
}

/// Events generated from terminal input in the UI layer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Key(KeyPress),
    Resize { width: u16, height: u16 },
}

/// Request editor tabs, cycled left/right
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    QueryParams,
    Headers,
    Body,
    Response,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::QueryParams, Tab::Headers, Tab::Body, Tab::Response];

    pub fn next(&self) -> Tab {
        match self {
            Tab::QueryParams => Tab::Headers,
            Tab::Headers => Tab::Body,
            Tab::Body => Tab::Response,
            Tab::Response => Tab::QueryParams,
        }
    }

    pub fn prev(&self) -> Tab {
        match self {
            Tab::QueryParams => Tab::Response,
            Tab::Headers => Tab::QueryParams,
            Tab::Body => Tab::Headers,
            Tab::Response => Tab::Body,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::QueryParams => "Params",
            Tab::Headers => "Headers",
            Tab::Body => "Body",
            Tab::Response => "Response",
        }
    }
}

/// Interaction mode - decides how the next key is interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Browsing,
    SelectingQuery,
    EditingUrl,
    AddingHeader,
    EditingHeader,
    AddingQueryParam,
    EditingQueryParam,
    AwaitingResponse,
    ShowingResponse,
    ShowingError,
    Quitting,
}

impl Mode {
    /// Modes where keystrokes go into the single-line edit buffer
    pub fn is_text_edit(&self) -> bool {
        matches!(
            self,
            Mode::EditingUrl
                | Mode::AddingHeader
                | Mode::EditingHeader
                | Mode::AddingQueryParam
                | Mode::EditingQueryParam
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Browsing => "Waiting for user input",
            Mode::SelectingQuery => "Selecting query to use",
            Mode::EditingUrl => "Editing URL to send request to",
            Mode::AddingQueryParam => "Adding request query parameter",
            Mode::EditingQueryParam => "Editing request query parameter",
            Mode::EditingHeader => "Editing request header",
            Mode::AddingHeader => "Adding request header",
            Mode::AwaitingResponse => "Sent HTTP request, waiting for HTTP response",
            Mode::ShowingResponse => "Received HTTP response",
            Mode::ShowingError => "Received error sending HTTP request",
            Mode::Quitting => "Exiting program...",
        }
    }
}

/// Decode a key event; releases and unmapped keys give `None`
pub fn key_to_press(key: KeyEvent) -> Option<KeyPress> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(KeyPress::CtrlC),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c) => Some(KeyPress::Char(c)),
        KeyCode::Enter => Some(KeyPress::Enter),
        KeyCode::Esc => Some(KeyPress::Esc),
        KeyCode::Tab => Some(KeyPress::Tab),
        KeyCode::Backspace => Some(KeyPress::Backspace),
        KeyCode::Up => Some(KeyPress::Up),
        KeyCode::Down => Some(KeyPress::Down),
        KeyCode::Left => Some(KeyPress::Left),
        KeyCode::Right => Some(KeyPress::Right),
        _ => None,
    }
}

/// Convert a terminal event into a UiEvent
pub fn terminal_to_ui_event(event: Event) -> Option<UiEvent> {
    match event {
        Event::Key(key) => key_to_press(key).map(UiEvent::Key),
        Event::Resize(width, height) => Some(UiEvent::Resize { width, height }),
        _ => None,
    }
}

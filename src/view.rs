//! Presentation - draws a `RenderState` into a ratatui frame
//!
//! Layout, top to bottom: request bar, tab bar, tab content, mode line and
//! help footer, with the saved queries column on the right.

use ratatui::{prelude::*, widgets::*};

use crate::app::keymap::{binding, Binding, BINDINGS, SHORT_HELP};
use crate::constants::QUERY_SIDEBAR_WIDTH;
use crate::messages::{Mode, RenderState, Tab};
use crate::models::{KeyValue, ResponseOutcome};
use crate::ui::{
    closed_style, error_style, header_line, highlight_json, input_line, method_color, open_style,
    pane_style, render_tabs, status_style,
};

/// Draw the whole screen
pub fn draw(f: &mut Frame, state: &RenderState) {
    let area = f.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let sidebar_width = QUERY_SIDEBAR_WIDTH.min(area.width / 2);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(sidebar_width),
        ])
        .split(area);

    let help_height = if state.show_help { 2 } else { 1 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Request bar
            Constraint::Length(1),           // Tabs
            Constraint::Min(0),              // Tab content
            Constraint::Length(1),           // Mode
            Constraint::Length(help_height), // Help
        ])
        .split(columns[0]);

    draw_request_bar(f, state, rows[0]);
    f.render_widget(render_tabs(state.current_tab), rows[1]);

    match state.current_tab {
        Tab::QueryParams => draw_params(f, state, rows[2]),
        Tab::Headers => draw_headers(f, state, rows[2]),
        Tab::Body => draw_body(f, state, rows[2]),
        Tab::Response => draw_response(f, state, rows[2]),
    }

    let mode_line = Paragraph::new(format!(" {}", state.mode.label())).style(closed_style());
    f.render_widget(mode_line, rows[3]);
    draw_help(f, state, rows[4]);

    draw_sidebar(f, state, columns[2]);
}

fn draw_request_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let method = state.query.method.as_str();
    let mut spans = vec![
        Span::styled(" ", closed_style()),
        Span::styled(method, closed_style().fg(method_color(method)).bold()),
        Span::styled(" ", closed_style()),
    ];

    if state.mode == Mode::EditingUrl {
        spans.extend(input_line(&state.edit_buffer, state.edit_cursor).spans);
    } else {
        spans.push(Span::styled(state.query.url.clone(), closed_style()));
    }

    match &state.query.last_response {
        Some(ResponseOutcome::Success { status_line, status_code, elapsed, .. }) => {
            spans.push(Span::styled(" -> ", closed_style()));
            spans.push(Span::styled(status_line.clone(), status_style(*status_code)));
            spans.push(Span::styled(format!(" {:?}", elapsed), closed_style()));
        }
        Some(ResponseOutcome::Failure { .. }) => {
            spans.push(Span::styled(" -> ", closed_style()));
            spans.push(Span::styled("ERROR", error_style()));
        }
        None => {}
    }

    f.render_widget(Paragraph::new(Line::from(spans)).style(closed_style()), area);
}

/// Focused entries lose their highlight while the query selector has focus
fn focused_style(state: &RenderState) -> Style {
    if state.mode == Mode::SelectingQuery {
        pane_style()
    } else {
        open_style()
    }
}

fn list_lines(
    state: &RenderState,
    items: &[KeyValue],
    focus: usize,
    editing: Mode,
    adding: Mode,
    render: fn(&KeyValue) -> String,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (i, item) in items.iter().enumerate() {
        if i != focus {
            lines.push(Line::from(render(item)));
        } else if state.mode == editing {
            lines.push(input_line(&state.edit_buffer, state.edit_cursor));
        } else {
            lines.push(Line::from(Span::styled(render(item), focused_style(state))));
        }
    }

    if state.mode == adding {
        lines.push(input_line(&state.edit_buffer, state.edit_cursor));
    }

    lines
}

fn param_line(param: &KeyValue) -> String {
    format!(" {}: {}", param.name, param.value)
}

fn draw_params(f: &mut Frame, state: &RenderState, area: Rect) {
    let params = &state.query.query_params;
    let mut lines = Vec::new();
    if params.is_empty() {
        lines.push(Line::from("(no query params will be sent, press z/↓ to add one)"));
    }
    lines.extend(list_lines(
        state,
        params,
        state.focused_param,
        Mode::EditingQueryParam,
        Mode::AddingQueryParam,
        param_line,
    ));

    f.render_widget(Paragraph::new(lines).style(pane_style()), area);
}

fn draw_headers(f: &mut Frame, state: &RenderState, area: Rect) {
    let headers = &state.query.headers;
    let mut lines = Vec::new();
    if headers.is_empty() {
        lines.push(Line::from("(no headers will be sent)"));
    }
    lines.extend(list_lines(
        state,
        headers,
        state.focused_header,
        Mode::EditingHeader,
        Mode::AddingHeader,
        header_line,
    ));

    f.render_widget(Paragraph::new(lines).style(pane_style()), area);
}

fn draw_body(f: &mut Frame, state: &RenderState, area: Rect) {
    let body = &state.query.body;
    let lines: Vec<Line> = body.split('\n').map(|l| Line::from(l.to_string())).collect();
    f.render_widget(Paragraph::new(lines).style(pane_style()), area);

    if state.body_focused() && area.width > 0 && area.height > 0 {
        let cursor = state.body_cursor.min(body.len());
        let before = &body[..cursor];
        let row = before.matches('\n').count();
        let column = before.rsplit('\n').next().map(|l| l.chars().count()).unwrap_or(0);

        let max_x = area.x + area.width - 1;
        let max_y = area.y + area.height - 1;
        let x = area.x.saturating_add(u16::try_from(column).unwrap_or(u16::MAX)).min(max_x);
        let y = area.y.saturating_add(u16::try_from(row).unwrap_or(u16::MAX)).min(max_y);
        f.set_cursor_position(Position::new(x, y));
    }
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let lines = match &state.query.last_response {
        None if state.mode == Mode::AwaitingResponse => vec![Line::from("waiting for response...")],
        None => vec![Line::from("response not yet sent")],
        Some(ResponseOutcome::Failure { message }) => {
            vec![Line::from(format!("error occurred sending request: {}", message))]
        }
        Some(ResponseOutcome::Success { headers, body_text, .. }) => {
            let mut lines: Vec<Line> = headers
                .iter()
                .map(|h| Line::from(format!("{}: {}", h.name, h.value)))
                .collect();
            lines.push(Line::default());
            lines.extend(highlight_json(body_text));
            lines
        }
    };

    let paragraph = Paragraph::new(lines)
        .style(pane_style())
        .scroll((state.response_scroll, 0));
    f.render_widget(paragraph, area);
}

fn help_entry(b: &Binding) -> Vec<Span<'static>> {
    vec![
        Span::styled(b.key, Style::default().fg(Color::Gray).bold()),
        Span::raw(" "),
        Span::styled(b.help, Style::default().fg(Color::DarkGray)),
    ]
}

fn help_line(bindings: &[&'static Binding]) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, b) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" • ", Style::default().fg(Color::DarkGray)));
        }
        spans.extend(help_entry(b));
    }
    Line::from(spans)
}

fn draw_help(f: &mut Frame, state: &RenderState, area: Rect) {
    let lines = if state.show_help {
        let all: Vec<&'static Binding> = BINDINGS.iter().collect();
        let (first, second) = all.split_at(all.len() / 2);
        vec![help_line(first), help_line(second)]
    } else {
        let short: Vec<&'static Binding> = SHORT_HELP.iter().filter_map(|a| binding(*a)).collect();
        vec![help_line(&short)]
    };

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_sidebar(f: &mut Frame, state: &RenderState, area: Rect) {
    if area.width == 0 {
        return;
    }

    let selected = if state.mode == Mode::SelectingQuery {
        open_style()
    } else {
        pane_style()
    };

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled("saved queries", closed_style())).alignment(Alignment::Right),
    ];
    for (i, name) in state.query_names.iter().enumerate() {
        let span = if i == state.focused_query {
            Span::styled(name.clone(), selected)
        } else {
            Span::raw(name.clone())
        };
        lines.push(Line::from(span).alignment(Alignment::Right));
    }

    f.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::models::seed_queries;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn render(state: &RenderState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, state)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn browsing_state(query: usize, tab: Tab) -> AppState {
        let mut state = AppState::with_queries(seed_queries("http://localhost:8090"));
        state.focused_query = query;
        state.mode = Mode::Browsing;
        state.current_tab = tab;
        state
    }

    #[test]
    fn test_authorization_value_is_never_drawn() {
        let index = seed_queries("http://localhost:8090")
            .iter()
            .position(|q| q.headers.iter().any(|h| h.name == "Authorization"))
            .unwrap();
        let mut state = browsing_state(index, Tab::Headers);
        let screen = render(&state.to_render_state(), 120, 20);
        assert!(screen.contains("Authorization: Bearer ********"));
        assert!(!screen.contains("not-a-real-token"));

        // Focused too
        state.focused_header = state.current_query().headers.iter().position(|h| h.name == "Authorization").unwrap();
        let screen = render(&state.to_render_state(), 120, 20);
        assert!(!screen.contains("not-a-real-token"));
    }

    #[test]
    fn test_zero_and_tiny_screens_do_not_panic() {
        let state = RenderState::default();
        render(&state, 0, 0);
        render(&state, 1, 1);
        render(&state, 4, 3);
    }

    #[test]
    fn test_mode_label_and_tabs_are_shown() {
        let screen = render(&RenderState::default(), 120, 20);
        assert!(screen.contains("Selecting query to use"));
        assert!(screen.contains(" Params  Headers  Body  Response "));
        assert!(screen.contains("saved queries"));
        assert!(screen.contains("mock server hello"));
    }

    #[test]
    fn test_empty_lists_show_hints() {
        let mut state = browsing_state(0, Tab::QueryParams);
        state.current_query_mut().query_params.clear();
        let screen = render(&state.to_render_state(), 120, 20);
        assert!(screen.contains("(no query params will be sent, press z/↓ to add one)"));

        state.current_tab = Tab::Headers;
        state.current_query_mut().headers.clear();
        let screen = render(&state.to_render_state(), 120, 20);
        assert!(screen.contains("(no headers will be sent)"));
    }

    #[test]
    fn test_editing_url_shows_buffer() {
        let mut state = browsing_state(0, Tab::Headers);
        state.mode = Mode::EditingUrl;
        state.edit_buffer = "http://example.test/x".to_string();
        state.edit_cursor = state.edit_buffer.len();
        let screen = render(&state.to_render_state(), 120, 20);
        assert!(screen.contains(" GET http://example.test/x"));
        assert!(screen.contains("Editing URL to send request to"));
    }

    #[test]
    fn test_response_tab_texts() {
        let mut state = browsing_state(0, Tab::Response);
        let screen = render(&state.to_render_state(), 120, 20);
        assert!(screen.contains("response not yet sent"));

        state.mode = Mode::AwaitingResponse;
        let screen = render(&state.to_render_state(), 120, 20);
        assert!(screen.contains("waiting for response..."));

        state.mode = Mode::ShowingError;
        state.current_query_mut().last_response = Some(ResponseOutcome::Failure {
            message: "Connection failed: refused".to_string(),
        });
        let screen = render(&state.to_render_state(), 120, 20);
        assert!(screen.contains("error occurred sending request: Connection failed: refused"));
        assert!(screen.contains(" -> ERROR"));
    }

    #[test]
    fn test_success_shows_status_headers_and_body() {
        let mut state = browsing_state(0, Tab::Response);
        state.mode = Mode::ShowingResponse;
        state.current_query_mut().last_response = Some(ResponseOutcome::Success {
            status_line: "200 OK".to_string(),
            status_code: 200,
            headers: vec![KeyValue::new("content-type", "application/json")],
            body_text: "\"hello\"".to_string(),
            elapsed: Duration::from_millis(1500),
        });

        let screen = render(&state.to_render_state(), 120, 20);
        assert!(screen.contains(" -> 200 OK 1.5s"));
        assert!(screen.contains("content-type: application/json"));
        assert!(screen.contains("\"hello\""));

        // Scrolled past the headers and the blank line
        state.response_scroll = 2;
        let screen = render(&state.to_render_state(), 120, 20);
        assert!(!screen.contains("content-type: application/json"));
        assert!(screen.contains("\"hello\""));
    }

    #[test]
    fn test_help_toggle_changes_footer() {
        let mut state = browsing_state(0, Tab::Headers);
        let full = render(&state.to_render_state(), 140, 20);
        assert!(full.contains("add new item"));

        state.show_help = false;
        let short = render(&state.to_render_state(), 140, 20);
        assert!(!short.contains("add new item"));
        assert!(short.contains("toggle help"));
    }
}

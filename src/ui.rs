use ratatui::{prelude::*, widgets::*};

use crate::constants::{MASKED_HEADER, MASKED_VALUE};
use crate::messages::Tab;
use crate::models::KeyValue;

/// Open tab and focused items
pub fn open_style() -> Style {
    Style::default().fg(Color::Rgb(0x22, 0x22, 0x22)).bg(Color::Rgb(0xcc, 0xdb, 0xdc))
}

/// Bars and closed tabs
pub fn closed_style() -> Style {
    Style::default().fg(Color::Rgb(0xdd, 0xdd, 0xdd)).bg(Color::Rgb(0x00, 0x7e, 0xa7))
}

/// Content panes
pub fn pane_style() -> Style {
    Style::default().fg(Color::Rgb(0xdd, 0xdd, 0xdd)).bg(Color::Rgb(0x00, 0x32, 0x49))
}

/// Status code style: green for success, yellow for 4xx, red for 5xx
pub fn status_style(code: u16) -> Style {
    match code {
        400..=499 => Style::default().fg(Color::Rgb(0x22, 0x22, 0x22)).bg(Color::Rgb(0xff, 0xd2, 0x3f)),
        500..=599 => error_style(),
        _ => Style::default().fg(Color::Rgb(0xdd, 0xdd, 0xdd)).bg(Color::Rgb(0x0e, 0xad, 0x69)),
    }
}

pub fn error_style() -> Style {
    Style::default().fg(Color::Rgb(0x22, 0x22, 0x22)).bg(Color::Rgb(0xcb, 0x0b, 0x0a))
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method {
        "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "PATCH" => Color::Cyan,
        "DELETE" => Color::Red,
        _ => Color::White,
    }
}

/// ` name: value`, hiding the Authorization value
pub fn header_line(header: &KeyValue) -> String {
    if header.name == MASKED_HEADER {
        format!(" {}: {}", MASKED_HEADER, MASKED_VALUE)
    } else {
        format!(" {}: {}", header.name, header.value)
    }
}

/// Renders tabs
pub fn render_tabs(selected: Tab) -> Tabs<'static> {
    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(format!(" {} ", t.title()))).collect();
    let index = Tab::ALL.iter().position(|t| *t == selected).unwrap_or(0);

    Tabs::new(titles)
        .select(index)
        .style(closed_style())
        .highlight_style(open_style())
        .padding("", "")
        .divider("")
}

/// Edit buffer with a visible block cursor at `cursor` (byte offset)
pub fn input_line(text: &str, cursor: usize) -> Line<'static> {
    let cursor = cursor.min(text.len());
    let (before, rest) = text.split_at(cursor);
    let mut chars = rest.chars();
    let under = chars.next().map(String::from).unwrap_or_else(|| String::from(" "));
    let after: String = chars.collect();

    Line::from(vec![
        Span::styled(before.to_string(), open_style()),
        Span::styled(under, open_style().add_modifier(Modifier::REVERSED)),
        Span::styled(after, open_style()),
    ])
}

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for line in text.lines() {
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut in_string = false;
        let mut escaped = false;

        for (i, c) in line.char_indices() {
            if in_string {
                current.push(c);
                if escaped {
                    escaped = false;
                } else if c == '\\' {
                    escaped = true;
                } else if c == '"' {
                    // A string directly followed by ':' is a key
                    let is_key = line[i + 1..].trim_start().starts_with(':');
                    let color = if is_key { Color::Cyan } else { Color::Green };
                    spans.push(Span::styled(std::mem::take(&mut current), Style::default().fg(color)));
                    in_string = false;
                }
                continue;
            }

            match c {
                '"' => {
                    if !current.is_empty() {
                        spans.push(literal_span(std::mem::take(&mut current)));
                    }
                    in_string = true;
                    current.push(c);
                }
                '{' | '}' | '[' | ']' => {
                    if !current.is_empty() {
                        spans.push(literal_span(std::mem::take(&mut current)));
                    }
                    spans.push(Span::styled(c.to_string(), Style::default().fg(Color::Yellow)));
                }
                ':' | ',' => {
                    if !current.is_empty() {
                        spans.push(literal_span(std::mem::take(&mut current)));
                    }
                    spans.push(Span::raw(c.to_string()));
                }
                _ => current.push(c),
            }
        }

        if !current.is_empty() {
            spans.push(if in_string {
                Span::raw(current)
            } else {
                literal_span(current)
            });
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// Numbers and keywords outside strings
fn literal_span(text: String) -> Span<'static> {
    let trimmed = text.trim();
    let style = match trimmed {
        "true" | "false" | "null" => Style::default().fg(Color::Magenta),
        t if !t.is_empty() && t.parse::<f64>().is_ok() => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    };
    Span::styled(text, style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_line_masks_authorization() {
        let line = header_line(&KeyValue::new("Authorization", "Bearer s3cr3t"));
        assert_eq!(line, " Authorization: Bearer ********");
        assert!(!line.contains("s3cr3t"));

        // Only the exact name is masked
        assert_eq!(header_line(&KeyValue::new("authorization", "x")), " authorization: x");
    }

    #[test]
    fn test_highlight_json_keeps_text() {
        let text = "{\n  \"name\": \"a:b\",\n  \"n\": -1.5,\n  \"ok\": true\n}";
        let lines = highlight_json(text);
        let rebuilt: Vec<String> = lines.iter().map(line_text).collect();
        assert_eq!(rebuilt.join("\n"), text);

        let key = &lines[1].spans[1];
        assert_eq!(key.content, "\"name\"");
        assert_eq!(key.style.fg, Some(Color::Cyan));
        let value = lines[1].spans.iter().find(|s| s.content == "\"a:b\"").unwrap();
        assert_eq!(value.style.fg, Some(Color::Green));
    }

    #[test]
    fn test_input_line_marks_cursor() {
        let line = input_line("abc", 1);
        assert_eq!(line.spans[0].content, "a");
        assert_eq!(line.spans[1].content, "b");
        assert_eq!(line.spans[2].content, "c");

        let at_end = input_line("abc", 3);
        assert_eq!(at_end.spans[1].content, " ");
    }

    #[test]
    fn test_status_style_buckets() {
        assert_eq!(status_style(404).bg, Some(Color::Rgb(0xff, 0xd2, 0x3f)));
        assert_eq!(status_style(503), error_style());
        assert_eq!(status_style(201).bg, Some(Color::Rgb(0x0e, 0xad, 0x69)));
    }
}

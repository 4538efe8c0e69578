//! Text input widget
//!
//! A single-line text field. The cursor counts characters, not bytes, so
//! accented input edits correctly.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A simple text input widget
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    /// Current text content
    pub content: String,
    /// Cursor position in characters
    pub cursor: usize,
    /// Whether the input is focused
    pub focused: bool,
    /// Placeholder text
    pub placeholder: String,
    /// Label
    pub label: String,
}

impl TextInput {
    /// Create a new text input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set focused state
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set content, cursor at the end
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.set_value(content);
        self
    }

    /// Replace the content in place
    pub fn set_value(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.content
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Get the current content
    pub fn value(&self) -> &str {
        &self.content
    }

    /// Spans for the value with a block cursor when focused
    pub fn spans(&self) -> Vec<Span<'static>> {
        if self.content.is_empty() && !self.focused {
            return vec![Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            )];
        }

        let value_style = if self.focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Yellow)
        };
        if !self.focused {
            return vec![Span::styled(self.content.clone(), value_style)];
        }

        let before: String = self.content.chars().take(self.cursor).collect();
        let mut rest = self.content.chars().skip(self.cursor);
        let under = rest.next().unwrap_or(' ');
        let after: String = rest.collect();

        vec![
            Span::styled(before, value_style),
            Span::styled(
                under.to_string(),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ),
            Span::styled(after, value_style),
        ]
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();
        if !self.label.is_empty() {
            spans.push(Span::styled(
                format!("{:>12}: ", self.label),
                Style::default().fg(Color::Cyan),
            ));
        }
        spans.extend(self.spans());
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

//! Save/export dialog
//!
//! Pick a format and a destination. The destination starts as the current
//! file; its extension follows the chosen format so the file can be read back.

use std::path::{Path, PathBuf};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::storage::FileFormat;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveField {
    #[default]
    Format,
    Path,
}

/// State for the save dialog
#[derive(Debug, Clone, Default)]
pub struct SaveFormState {
    pub focused_field: SaveField,
    pub format: FileFormat,
    pub path_input: TextInput,
    pub error_message: Option<String>,
}

impl SaveFormState {
    /// Start from the current data file
    pub fn new(current: &Path) -> Self {
        let format = FileFormat::from_path(current).unwrap_or_default();
        let mut state = Self {
            focused_field: SaveField::Format,
            format,
            path_input: TextInput::new()
                .label("Archivo")
                .content(current.display().to_string()),
            error_message: None,
        };
        state.update_focus();
        state
    }

    pub fn toggle_field(&mut self) {
        self.focused_field = match self.focused_field {
            SaveField::Format => SaveField::Path,
            SaveField::Path => SaveField::Format,
        };
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.path_input.focused = self.focused_field == SaveField::Path;
    }

    pub fn next_format(&mut self) {
        let index = FileFormat::ALL
            .iter()
            .position(|f| *f == self.format)
            .unwrap_or(0);
        self.set_format(FileFormat::ALL[(index + 1) % FileFormat::ALL.len()]);
    }

    pub fn prev_format(&mut self) {
        let index = FileFormat::ALL
            .iter()
            .position(|f| *f == self.format)
            .unwrap_or(0);
        let len = FileFormat::ALL.len();
        self.set_format(FileFormat::ALL[(index + len - 1) % len]);
    }

    fn set_format(&mut self, format: FileFormat) {
        self.format = format;
        let value = self.path_input.value().trim();
        if !value.is_empty() {
            let path = PathBuf::from(value).with_extension(format.extension());
            self.path_input.set_value(path.display().to_string());
        }
    }

    /// Destination with the extension of the chosen format
    pub fn destination(&self) -> Option<PathBuf> {
        let value = self.path_input.value().trim();
        if value.is_empty() {
            return None;
        }
        Some(PathBuf::from(value).with_extension(self.format.extension()))
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }
}

/// Render the save dialog
pub fn render(frame: &mut Frame, form: &SaveFormState) {
    let area = centered_rect_fixed(64, 10, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Guardar / Exportar ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Format
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Path
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let mut format_spans = vec![Span::styled(
        format!("{:>12}: ", "Formato"),
        Style::default().fg(Color::Cyan),
    )];
    for format in FileFormat::ALL {
        let style = if format == form.format {
            let style = Style::default().fg(Color::Black).bg(Color::Cyan);
            if form.focused_field == SaveField::Format {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            }
        } else {
            Style::default().fg(Color::White)
        };
        format_spans.push(Span::styled(format!(" {} ", format), style));
        format_spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(format_spans)), chunks[0]);
    frame.render_widget(&form.path_input, chunks[2]);

    if let Some(ref error) = form.error_message {
        let line = Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)));
        frame.render_widget(Paragraph::new(line), chunks[4]);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Campo  "),
        Span::styled("[←→]", Style::default().fg(Color::Yellow)),
        Span::raw(" Formato  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Guardar  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancelar"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[5]);
}

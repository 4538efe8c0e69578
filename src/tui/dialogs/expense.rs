//! Expense entry/edit dialog
//!
//! Modal form with tab navigation and a category dropdown that filters as
//! you type. Validation happens in the service layer; its message is shown
//! inline and the form stays open.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::{CategoryList, Expense, ExpenseDate};
use crate::services::{CreateExpenseInput, UpdateExpenseInput};
use crate::tui::layout::centered_rect;
use crate::tui::widgets::TextInput;

/// Rows shown in the category dropdown
const DROPDOWN_ROWS: usize = 5;

/// Which field is currently focused in the expense form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExpenseField {
    #[default]
    Category,
    Description,
    Amount,
    Date,
}

impl ExpenseField {
    /// Get the next field (for Tab navigation)
    pub fn next(self) -> Self {
        match self {
            Self::Category => Self::Description,
            Self::Description => Self::Amount,
            Self::Amount => Self::Date,
            Self::Date => Self::Category,
        }
    }

    /// Get the previous field (for Shift+Tab navigation)
    pub fn prev(self) -> Self {
        match self {
            Self::Category => Self::Date,
            Self::Description => Self::Category,
            Self::Amount => Self::Description,
            Self::Date => Self::Amount,
        }
    }
}

/// State for the expense form dialog
#[derive(Debug, Clone, Default)]
pub struct ExpenseFormState {
    pub focused_field: ExpenseField,
    pub category_input: TextInput,
    pub description_input: TextInput,
    pub amount_input: TextInput,
    pub date_input: TextInput,

    /// Known category labels offered in the dropdown
    pub categories: Vec<String>,

    /// Highlighted row of the filtered dropdown
    pub category_list_index: usize,

    /// Whether this edits an existing expense
    pub is_edit: bool,

    pub error_message: Option<String>,
}

impl ExpenseFormState {
    /// Empty form dated today
    pub fn new(categories: &CategoryList) -> Self {
        let mut state = Self {
            focused_field: ExpenseField::Category,
            category_input: TextInput::new()
                .label("Categoría")
                .placeholder("Escriba para filtrar..."),
            description_input: TextInput::new()
                .label("Descripción")
                .placeholder("Opcional"),
            amount_input: TextInput::new().label("Monto").placeholder("0.00"),
            date_input: TextInput::new()
                .label("Fecha")
                .placeholder("dd/mm/aaaa")
                .content(ExpenseDate::today().to_string()),
            categories: categories.iter().map(str::to_string).collect(),
            category_list_index: 0,
            is_edit: false,
            error_message: None,
        };
        state.update_focus();
        state
    }

    /// Form pre-filled from an existing expense
    pub fn from_expense(expense: &Expense, categories: &CategoryList) -> Self {
        let mut state = Self::new(categories);
        state.is_edit = true;
        state.category_input.set_value(expense.category.as_str());
        state.description_input.set_value(expense.description.as_str());
        state.amount_input.set_value(expense.amount.to_plain_string());
        state.date_input.set_value(expense.date.to_string());
        state
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
        self.update_focus();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
        self.update_focus();
    }

    pub fn set_focus(&mut self, field: ExpenseField) {
        self.focused_field = field;
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.category_input.focused = self.focused_field == ExpenseField::Category;
        self.description_input.focused = self.focused_field == ExpenseField::Description;
        self.amount_input.focused = self.focused_field == ExpenseField::Amount;
        self.date_input.focused = self.focused_field == ExpenseField::Date;
    }

    /// Get the currently focused input
    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            ExpenseField::Category => &mut self.category_input,
            ExpenseField::Description => &mut self.description_input,
            ExpenseField::Amount => &mut self.amount_input,
            ExpenseField::Date => &mut self.date_input,
        }
    }

    /// Categories containing the typed text, ignoring case
    pub fn filtered_categories(&self) -> Vec<&str> {
        let needle = self.category_input.value().trim().to_lowercase();
        self.categories
            .iter()
            .map(String::as_str)
            .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Whether the dropdown is visible
    pub fn show_dropdown(&self) -> bool {
        self.focused_field == ExpenseField::Category && !self.filtered_categories().is_empty()
    }

    pub fn dropdown_down(&mut self) {
        let count = self.filtered_categories().len();
        if self.category_list_index + 1 < count {
            self.category_list_index += 1;
        }
    }

    pub fn dropdown_up(&mut self) {
        self.category_list_index = self.category_list_index.saturating_sub(1);
    }

    /// Typing changes the filter, so the highlight starts over
    pub fn category_edited(&mut self) {
        self.category_list_index = 0;
    }

    /// Copy the highlighted dropdown entry into the category field
    pub fn accept_dropdown(&mut self) -> bool {
        let choice = self
            .filtered_categories()
            .get(self.category_list_index)
            .map(|s| s.to_string());
        match choice {
            Some(name) => {
                self.category_input.set_value(name);
                self.category_list_index = 0;
                true
            }
            None => false,
        }
    }

    pub fn create_input(&self) -> CreateExpenseInput {
        CreateExpenseInput {
            date: self.date_input.value().to_string(),
            category: self.category_input.value().to_string(),
            description: self.description_input.value().to_string(),
            amount: self.amount_input.value().to_string(),
        }
    }

    /// Every field; blank ones are kept unchanged by the service
    pub fn update_input(&self) -> UpdateExpenseInput {
        UpdateExpenseInput {
            date: Some(self.date_input.value().to_string()),
            category: Some(self.category_input.value().to_string()),
            description: Some(self.description_input.value().to_string()),
            amount: Some(self.amount_input.value().to_string()),
        }
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error_message = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

/// Render the expense dialog
pub fn render(frame: &mut Frame, form: &ExpenseFormState) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let title = if form.is_edit {
        " Editar gasto "
    } else {
        " Nuevo gasto "
    };
    let block = Block::default()
        .title(title)
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
            Constraint::Length(1),                         // Category
            Constraint::Length(DROPDOWN_ROWS as u16 + 2), // Dropdown
            Constraint::Length(1),                         // Description
            Constraint::Length(1),                         // Amount
            Constraint::Length(1),                         // Date
            Constraint::Length(1),                         // Spacer
            Constraint::Length(1),                         // Error
            Constraint::Length(1),                         // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(&form.category_input, chunks[0]);
    if form.show_dropdown() {
        render_dropdown(frame, form, chunks[1]);
    }
    frame.render_widget(&form.description_input, chunks[2]);
    frame.render_widget(&form.amount_input, chunks[3]);
    frame.render_widget(&form.date_input, chunks[4]);

    if let Some(ref error) = form.error_message {
        let line = Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)));
        frame.render_widget(Paragraph::new(line), chunks[6]);
    }

    let hints = Line::from(vec![
        Span::styled("[Tab]", Style::default().fg(Color::Yellow)),
        Span::raw(" Siguiente  "),
        Span::styled("[↑↓]", Style::default().fg(Color::Yellow)),
        Span::raw(" Categoría  "),
        Span::styled("[Enter]", Style::default().fg(Color::Green)),
        Span::raw(" Guardar  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" Cancelar"),
    ]);
    frame.render_widget(Paragraph::new(hints), chunks[7]);
}

fn render_dropdown(frame: &mut Frame, form: &ExpenseFormState, area: Rect) {
    let area = Rect {
        x: area.x + 14,
        width: area.width.saturating_sub(14).min(30),
        ..area
    };
    let items: Vec<ListItem> = form
        .filtered_categories()
        .into_iter()
        .map(|name| ListItem::new(name.to_string()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(form.category_list_index));
    frame.render_stateful_widget(list, area, &mut state);
}

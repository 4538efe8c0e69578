//! Event handler for the TUI
//!
//! Routes keyboard events to the appropriate handlers based on the current
//! application state: an open dialog takes every key, then the chart view,
//! then the focused panel.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{ActiveDialog, ActiveView, App, FocusedPanel, SidebarAction};
use super::dialogs::expense::ExpenseField;
use super::dialogs::save::SaveField;
use super::event::Event;
use super::widgets::TextInput;
use crate::reports::ChartKind;

/// Handle an incoming event
pub fn handle_event(app: &mut App, event: Event) -> Result<()> {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Resize(_, _) => Ok(()),
    }
}

/// Handle a key event
fn handle_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('s') => {
                app.save();
                return Ok(());
            }
            KeyCode::Char('c') => {
                app.request_quit();
                return Ok(());
            }
            _ => {}
        }
    }

    if app.has_dialog() {
        return handle_dialog_key(app, key);
    }

    if let ActiveView::Chart(_) = app.active_view {
        handle_chart_key(app, key);
        return Ok(());
    }

    match app.focused_panel {
        FocusedPanel::Search => handle_search_key(app, key),
        FocusedPanel::Sidebar | FocusedPanel::Table => handle_normal_key(app, key),
    }
    Ok(())
}

/// Handle keys in normal mode
fn handle_normal_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('?') => {
            app.open_dialog(ActiveDialog::Help);
            return;
        }
        KeyCode::Char('/') => {
            app.focus_search();
            return;
        }
        KeyCode::Tab => {
            app.toggle_panel_focus();
            return;
        }
        KeyCode::Char('h') | KeyCode::Left => {
            app.focused_panel = FocusedPanel::Sidebar;
            return;
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.focused_panel = FocusedPanel::Table;
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_down();
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_up();
            return;
        }
        KeyCode::Esc => {
            app.clear_status();
            return;
        }
        _ => {}
    }

    match (app.focused_panel, key.code) {
        (FocusedPanel::Sidebar, KeyCode::Enter) => {
            let action = app.sidebar_action();
            app.run_action(action);
        }
        (FocusedPanel::Table, KeyCode::Enter) => app.run_action(SidebarAction::Edit),
        (FocusedPanel::Table, KeyCode::Delete) => app.run_action(SidebarAction::Delete),
        (_, KeyCode::Char(c)) => {
            if let Some(action) = SidebarAction::from_key(c) {
                app.run_action(action);
            }
        }
        _ => {}
    }
}

/// Typing in the search box re-filters the table
fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => app.leave_search(),
        KeyCode::Down => app.move_down(),
        KeyCode::Up => app.move_up(),
        _ => {
            if edit_input(&mut app.search_input, key) {
                app.search_changed();
            }
        }
    }
}

/// Handle keys in the chart view
fn handle_chart_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_chart(),
        KeyCode::Char('e') => app.export_chart(),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => app.cycle_chart(true),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => app.cycle_chart(false),
        KeyCode::Char('?') => app.open_dialog(ActiveDialog::Help),
        _ => {}
    }
}

/// Handle keys when a dialog is active
fn handle_dialog_key(app: &mut App, key: KeyEvent) -> Result<()> {
    match app.active_dialog.clone() {
        ActiveDialog::None => {}
        ActiveDialog::Help => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                app.close_dialog();
            }
        }
        ActiveDialog::ExpenseForm(_) => handle_expense_form_key(app, key),
        ActiveDialog::ConfirmDelete(_) => match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.confirm_delete()
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.close_dialog();
                app.set_status("Eliminación cancelada");
            }
            _ => {}
        },
        ActiveDialog::ConfirmQuit => match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.close_dialog();
                if app.save() {
                    app.quit();
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') => app.quit(),
            KeyCode::Esc => app.close_dialog(),
            _ => {}
        },
        ActiveDialog::Generate => match key.code {
            KeyCode::Esc => app.close_dialog(),
            KeyCode::Enter => app.submit_generate(),
            _ => {
                if let KeyCode::Char(c) = key.code {
                    if !c.is_ascii_digit() {
                        return Ok(());
                    }
                }
                edit_input(&mut app.generate_input, key);
            }
        },
        ActiveDialog::Import => match key.code {
            KeyCode::Esc => app.close_dialog(),
            KeyCode::Enter => app.submit_import(),
            _ => {
                edit_input(&mut app.import_input, key);
            }
        },
        ActiveDialog::ChartSelect => match key.code {
            KeyCode::Esc => app.close_dialog(),
            KeyCode::Enter => app.select_chart(),
            KeyCode::Char('j') | KeyCode::Down => {
                if app.chart_select_index + 1 < ChartKind::ALL_KINDS.len() {
                    app.chart_select_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.chart_select_index = app.chart_select_index.saturating_sub(1);
            }
            _ => {}
        },
        ActiveDialog::SaveFormat => handle_save_key(app, key),
    }
    Ok(())
}

fn handle_expense_form_key(app: &mut App, key: KeyEvent) {
    let form = &mut app.expense_form;
    let on_category = form.focused_field == ExpenseField::Category;

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
        }
        KeyCode::Tab => {
            form.clear_error();
            form.next_field();
        }
        KeyCode::BackTab => {
            form.clear_error();
            form.prev_field();
        }
        KeyCode::Down if on_category => form.dropdown_down(),
        KeyCode::Up if on_category => form.dropdown_up(),
        KeyCode::Enter if on_category && form.show_dropdown() && !category_is_exact(form) => {
            form.accept_dropdown();
            form.next_field();
        }
        KeyCode::Enter => {
            form.clear_error();
            app.submit_expense_form();
        }
        _ => {
            if edit_input(form.focused_input(), key) && on_category {
                form.category_edited();
            }
        }
    }
}

/// The typed category already is the highlighted entry
fn category_is_exact(form: &super::dialogs::expense::ExpenseFormState) -> bool {
    form.filtered_categories()
        .get(form.category_list_index)
        .map(|name| *name == form.category_input.value())
        .unwrap_or(false)
}

fn handle_save_key(app: &mut App, key: KeyEvent) {
    let form = &mut app.save_form;
    match key.code {
        KeyCode::Esc => app.close_dialog(),
        KeyCode::Enter => app.submit_save(),
        KeyCode::Tab | KeyCode::BackTab => form.toggle_field(),
        KeyCode::Right if form.focused_field == SaveField::Format => form.next_format(),
        KeyCode::Left if form.focused_field == SaveField::Format => form.prev_format(),
        _ if form.focused_field == SaveField::Path => {
            edit_input(&mut form.path_input, key);
        }
        _ => {}
    }
}

/// Apply an editing key to a text input; true when the content changed
fn edit_input(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            input.insert(c);
            true
        }
        KeyCode::Backspace => {
            input.backspace();
            true
        }
        KeyCode::Delete => {
            input.delete();
            true
        }
        KeyCode::Left => {
            input.move_left();
            false
        }
        KeyCode::Right => {
            input.move_right();
            false
        }
        KeyCode::Home => {
            input.move_start();
            false
        }
        KeyCode::End => {
            input.move_end();
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::IdScheme;
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn press(app: &mut App, code: KeyCode) {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE))).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_add_expense_with_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);
        let settings = Settings::default();
        let mut app = App::new(&mut storage, &settings);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.active_dialog, ActiveDialog::ExpenseForm(None));

        // "tra" narrows the dropdown to Transporte, Enter picks it
        type_text(&mut app, "tra");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.expense_form.category_input.value(), "Transporte");
        assert_eq!(app.expense_form.focused_field, ExpenseField::Description);

        type_text(&mut app, "Taxi");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "7.25");
        press(&mut app, KeyCode::Enter);

        assert!(!app.has_dialog());
        let rows = app.visible_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.category.as_str(), "Transporte");
        assert_eq!(rows[0].1.amount.cents(), 725);
    }

    #[test]
    fn test_sidebar_enter_runs_action() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);
        let settings = Settings::default();
        let mut app = App::new(&mut storage, &settings);

        // Import, Save, Create, Edit, Delete, Generate
        for _ in 0..5 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.sidebar_action(), SidebarAction::Generate);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.active_dialog, ActiveDialog::Generate);

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('x'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.visible_rows().len(), 1);
    }

    #[test]
    fn test_search_as_you_type() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);
        let settings = Settings::default();
        let mut app = App::new(&mut storage, &settings);
        for (category, amount) in [("Comida", "1"), ("Salud", "2")] {
            app.run_action(SidebarAction::Create);
            app.expense_form.category_input.set_value(category);
            app.expense_form.amount_input.set_value(amount);
            app.submit_expense_form();
        }

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.focused_panel, FocusedPanel::Search);
        type_text(&mut app, "sal");
        assert_eq!(app.visible_rows().len(), 1);
        // Typed letters go to the search box, not to shortcuts
        assert!(!app.has_dialog());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.focused_panel, FocusedPanel::Table);
        assert_eq!(app.search_input.value(), "sal");
    }

    #[test]
    fn test_quit_confirmation_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);
        let settings = Settings::default();
        let mut app = App::new(&mut storage, &settings);
        app.run_action(SidebarAction::Create);
        app.expense_form.amount_input.set_value("3");
        app.submit_expense_form();

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.active_dialog, ActiveDialog::ConfirmQuit);
        press(&mut app, KeyCode::Esc);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Char('s'));
        assert!(app.should_quit);
        assert!(temp_dir.path().join("gastos.json").exists());
    }

    #[test]
    fn test_ctrl_s_saves() {
        let temp_dir = TempDir::new().unwrap();
        let mut storage =
            Storage::in_memory(temp_dir.path().join("gastos.json"), IdScheme::Sequential);
        let settings = Settings::default();
        let mut app = App::new(&mut storage, &settings);

        handle_event(
            &mut app,
            Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
        )
        .unwrap();

        assert!(temp_dir.path().join("gastos.json").exists());
        assert!(!app.status_is_error);
    }
}

//! Screen regions for the TUI
//!
//! Sidebar on the left, expense list or chart on the right, one status line
//! at the bottom. Dialogs float centered over everything.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Sidebar width in columns
pub const SIDEBAR_WIDTH: u16 = 26;

/// Layout regions for the TUI
pub struct AppLayout {
    /// Header, actions and totals
    pub sidebar: Rect,
    /// Expense table or chart
    pub main: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let [body, status_bar] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);
        let [sidebar, main] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
                .areas(body);

        Self {
            sidebar,
            main,
            status_bar,
        }
    }
}

/// Regions inside the sidebar
pub struct SidebarLayout {
    pub header: Rect,
    pub actions: Rect,
    pub totals: Rect,
}

impl SidebarLayout {
    pub fn new(area: Rect) -> Self {
        // one row per action plus borders
        let actions_height = crate::tui::app::SidebarAction::ALL.len() as u16 + 2;
        let [header, actions, totals] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(actions_height),
            Constraint::Min(4),
        ])
        .areas(area);

        Self {
            header,
            actions,
            totals,
        }
    }
}

/// Search box over the expense table
pub struct MainPanelLayout {
    pub search: Rect,
    pub table: Rect,
}

impl MainPanelLayout {
    pub fn new(area: Rect) -> Self {
        let [search, table] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);
        Self { search, table }
    }
}

/// Split an area into a 2x2 grid, row by row
pub fn grid_2x2(area: Rect) -> [Rect; 4] {
    let halves = [Constraint::Percentage(50), Constraint::Percentage(50)];
    let [top, bottom] = Layout::vertical(halves).areas(area);
    let [top_left, top_right] = Layout::horizontal(halves).areas(top);
    let [bottom_left, bottom_right] = Layout::horizontal(halves).areas(bottom);
    [top_left, top_right, bottom_left, bottom_right]
}

/// Centered rect sized as a percentage of `r`
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)])
        .flex(Flex::Center)
        .areas(r);
    let [cell] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

/// Centered rect of a fixed size, clamped to `r`
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_layout_regions() {
        let layout = AppLayout::new(Rect::new(0, 0, 100, 30));
        assert_eq!(layout.sidebar.width, SIDEBAR_WIDTH);
        assert_eq!(layout.main.width, 100 - SIDEBAR_WIDTH);
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.status_bar.y, 29);
    }

    #[test]
    fn test_sidebar_fits_every_action() {
        let layout = SidebarLayout::new(Rect::new(0, 0, 26, 29));
        assert_eq!(
            layout.actions.height as usize,
            crate::tui::app::SidebarAction::ALL.len() + 2
        );
    }

    #[test]
    fn test_grid_covers_area() {
        let cells = grid_2x2(Rect::new(0, 0, 80, 40));
        assert_eq!(cells[0], Rect::new(0, 0, 40, 20));
        assert_eq!(cells[3], Rect::new(40, 20, 40, 20));
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(60, 50, area);
        assert_eq!(r.width, 60);
        assert_eq!(r.height, 20);
        assert_eq!(r.x, 20);
        assert_eq!(r.y, 10);
    }

    #[test]
    fn test_centered_rect_fixed_clamps() {
        let r = centered_rect_fixed(50, 10, Rect::new(0, 0, 30, 8));
        assert_eq!(r, Rect::new(0, 0, 30, 8));
    }
}

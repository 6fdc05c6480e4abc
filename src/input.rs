//! Shared input handling: coordinate conversion, click targets, and event types.
//!
//! Browser events arrive in pixels; `main.rs` turns them into terminal cells
//! before anything here sees them. The render pass records where the
//! buttons, menu items and the minigame play area ended up, so input for the
//! next frame can be hit-tested against exactly what was drawn.

use ratzilla::ratatui::layout::Rect;

/// Action ID for the start screen button.
pub const START_BUTTON: u16 = 0xF000;
/// Action ID for the end screen "Start Over" button.
pub const RESTART_BUTTON: u16 = 0xF001;

/// Keys the arcade distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Tab,
    Esc,
    Up,
    Down,
    Left,
    Right,
    Space,
    Char(char),
}

/// All possible input events, normalized from keyboard, mouse, and touch sources.
/// Pointer positions are terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key),
    PointerDown { col: u16, row: u16 },
    PointerUp { col: u16, row: u16 },
    PointerMove { col: u16, row: u16 },
}

impl InputEvent {
    pub fn position(&self) -> Option<(u16, u16)> {
        match *self {
            InputEvent::Key(_) => None,
            InputEvent::PointerDown { col, row }
            | InputEvent::PointerUp { col, row }
            | InputEvent::PointerMove { col, row } => Some((col, row)),
        }
    }
}

/// A region on screen that can be tapped/clicked to trigger an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared state between the render loop and the input handlers.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    /// Menu item rectangles in catalog order, filled by the menu screen.
    pub menu_items: Vec<Rect>,
    /// Where the active minigame was drawn last frame.
    pub play_area: Rect,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            menu_items: Vec::new(),
            play_area: Rect::default(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Forget everything registered by the previous frame.
    pub fn clear_targets(&mut self) {
        self.targets.clear();
        self.menu_items.clear();
        self.play_area = Rect::default();
    }

    /// Register a click target with a rectangular hit region and a semantic action ID.
    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Hit-test a terminal cell coordinate against all registered targets.
    /// Later-registered (topmost) targets win when they overlap.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| rect_contains(t.rect, col, row))
            .map(|t| t.action_id)
    }
}

impl Default for ClickState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn rect_contains(r: Rect, col: u16, row: u16) -> bool {
    col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
}

/// Convert a pixel Y coordinate to a terminal row index.
///
/// `click_y` is relative to the grid container's top edge.
/// `grid_height` is the total pixel height of the grid container.
/// Returns `None` if the click is outside the grid or inputs are invalid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }

    let cell_height = grid_height / terminal_rows as f64;
    let row = (click_y / cell_height) as u16;

    if row >= terminal_rows {
        return None;
    }

    Some(row)
}

/// Convert a pixel X coordinate to a terminal column index.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let cell_width = grid_width / terminal_cols as f64;
    let col = (click_x / cell_width) as u16;
    if col >= terminal_cols {
        None
    } else {
        Some(col)
    }
}

/// Map a pixel to the nearest cell, clamping points outside the grid onto its edge.
pub fn pixel_to_nearest_cell(
    x: f64,
    y: f64,
    grid_width: f64,
    grid_height: f64,
    terminal_cols: u16,
    terminal_rows: u16,
) -> Option<(u16, u16)> {
    if grid_width <= 0.0 || grid_height <= 0.0 || terminal_cols == 0 || terminal_rows == 0 {
        return None;
    }
    let col = pixel_x_to_col(x.clamp(0.0, grid_width - 1e-6), grid_width, terminal_cols)?;
    let row = pixel_y_to_row(y.clamp(0.0, grid_height - 1e-6), grid_height, terminal_rows)?;
    Some((col, row))
}

//! Developer menu: a two-column grid of every minigame for direct jumps.

use ratzilla::ratatui::layout::Rect;

use crate::input::rect_contains;
use crate::registry::{Catalog, MinigameId};

/// Columns in the menu grid.
pub const MENU_COLUMNS: usize = 2;

/// Cursor state, only meaningful while the menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub selected: usize,
    pub hover: Option<usize>,
}

impl MenuState {
    /// Open the menu with `current` preselected.
    pub fn enter(catalog: &Catalog, current: MinigameId) -> Self {
        Self {
            selected: catalog.index_of(current).unwrap_or(0),
            hover: None,
        }
    }

    /// Move by `delta` entries, wrapping in either direction.
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            return;
        }
        let len = len as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    pub fn set_hover(&mut self, col: u16, row: u16, hitboxes: &[Rect]) {
        self.hover = hover_index(col, row, hitboxes);
    }

    pub fn confirm(&self, catalog: &Catalog) -> MinigameId {
        catalog.get(self.selected).unwrap_or_else(|| catalog.first())
    }
}

/// Grid position of catalog entry `index`: `(column, row)`, filled row-major.
pub fn grid_cell(index: usize, columns: usize) -> (usize, usize) {
    (index % columns, index / columns)
}

/// Which hitbox, if any, contains the pointer.
pub fn hover_index(col: u16, row: u16, hitboxes: &[Rect]) -> Option<usize> {
    hitboxes.iter().position(|&r| rect_contains(r, col, row))
}

/// Lay out `count` items in `area`, one rect per item in catalog order.
///
/// Items are `item_height` rows tall with a one-row gap; rows that would fall
/// below `area` are dropped.
pub fn layout_hitboxes(area: Rect, count: usize, columns: usize, item_height: u16) -> Vec<Rect> {
    if columns == 0 || area.width == 0 {
        return Vec::new();
    }
    let gap: u16 = 2;
    let cols = columns as u16;
    let item_width = area.width.saturating_sub(gap * (cols - 1)) / cols;
    (0..count)
        .map(|i| {
            let (c, r) = grid_cell(i, columns);
            Rect::new(
                area.x + c as u16 * (item_width + gap),
                area.y + r as u16 * (item_height + 1),
                item_width,
                item_height,
            )
        })
        .take_while(|r| r.y + r.height <= area.y + area.height)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn catalog() -> Catalog {
        Catalog::from_raw(&(1..=16).collect::<Vec<u8>>()).unwrap()
    }

    #[test]
    fn enter_preselects_current() {
        let c = catalog();
        let m = MenuState::enter(&c, MinigameId::new(2).unwrap());
        assert_eq!(m.selected, 1);
        assert_eq!(m.hover, None);
    }

    #[test]
    fn enter_falls_back_to_zero() {
        let c = Catalog::from_raw(&[3, 4]).unwrap();
        let m = MenuState::enter(&c, MinigameId::new(9).unwrap());
        assert_eq!(m.selected, 0);
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut m = MenuState::default();
        m.move_selection(-1, 16);
        assert_eq!(m.selected, 15);
        m.move_selection(1, 16);
        assert_eq!(m.selected, 0);
    }

    #[test]
    fn confirm_returns_selected_entry() {
        let c = catalog();
        let m = MenuState {
            selected: 9,
            hover: None,
        };
        assert_eq!(m.confirm(&c).get(), 10);
    }

    #[test]
    fn grid_is_row_major() {
        assert_eq!(grid_cell(0, 2), (0, 0));
        assert_eq!(grid_cell(1, 2), (1, 0));
        assert_eq!(grid_cell(2, 2), (0, 1));
        assert_eq!(grid_cell(15, 2), (1, 7));
    }

    #[test]
    fn layout_places_columns_side_by_side() {
        let boxes = layout_hitboxes(Rect::new(10, 5, 62, 40), 4, 2, 2);
        assert_eq!(boxes.len(), 4);
        assert_eq!(boxes[0], Rect::new(10, 5, 30, 2));
        assert_eq!(boxes[1], Rect::new(42, 5, 30, 2));
        assert_eq!(boxes[2], Rect::new(10, 8, 30, 2));
        assert_eq!(boxes[3], Rect::new(42, 8, 30, 2));
    }

    #[test]
    fn layout_drops_rows_that_do_not_fit() {
        let boxes = layout_hitboxes(Rect::new(0, 0, 40, 5), 16, 2, 2);
        // Two rows of two fit in five lines (2 + gap + 2).
        assert_eq!(boxes.len(), 4);
    }

    #[test]
    fn hover_follows_pointer() {
        let boxes = layout_hitboxes(Rect::new(0, 0, 62, 40), 16, 2, 2);
        let mut m = MenuState::default();
        m.set_hover(45, 3, &boxes);
        assert_eq!(m.hover, Some(3));
        m.set_hover(31, 3, &boxes); // in the gap
        assert_eq!(m.hover, None);
    }

    proptest! {
        #[test]
        fn prop_selection_stays_in_range(start in 0usize..16, moves in proptest::collection::vec(-40isize..40, 0..50)) {
            let mut m = MenuState { selected: start, hover: None };
            for d in moves {
                m.move_selection(d, 16);
                prop_assert!(m.selected < 16);
            }
        }

        #[test]
        fn prop_down_then_up_is_identity(start in 0usize..16, n in 0isize..64) {
            let mut m = MenuState { selected: start, hover: None };
            m.move_selection(n, 16);
            m.move_selection(-n, 16);
            prop_assert_eq!(m.selected, start);
        }
    }
}

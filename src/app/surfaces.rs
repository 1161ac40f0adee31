use crate::scroll::ScrollableContent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViewMode {
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }
}

/// Multi-column card surface. The rendering pass records the geometry it
/// actually used (columns, visible card rows) so centering works against
/// the layout the user last saw.
#[derive(Debug, Default)]
pub(crate) struct GridSurface {
    pub offset_row: usize,
    pub columns: usize,
    pub viewport_rows: usize,
    pub item_ids: Vec<String>,
}

impl GridSurface {
    pub fn row_count(&self) -> usize {
        let columns = self.columns.max(1);
        self.item_ids.len().div_ceil(columns)
    }

    pub fn clamp_offset(&mut self) {
        let max = self.row_count().saturating_sub(self.viewport_rows.max(1));
        if self.offset_row > max {
            self.offset_row = max;
        }
    }

    /// Nudge the offset so the given card row stays on screen.
    pub fn ensure_row_visible(&mut self, row: usize) {
        let rows = self.viewport_rows.max(1);
        if row < self.offset_row {
            self.offset_row = row;
        } else if row >= self.offset_row + rows {
            self.offset_row = row + 1 - rows;
        }
    }
}

impl ScrollableContent for GridSurface {
    fn scroll_to_user(&mut self, user_id: &str) -> bool {
        let Some(index) = self.item_ids.iter().position(|id| id == user_id) else {
            return false;
        };
        let row = index / self.columns.max(1);
        self.offset_row = row.saturating_sub(self.viewport_rows.max(1) / 2);
        self.clamp_offset();
        true
    }
}

/// One-row-per-user table surface.
#[derive(Debug, Default)]
pub(crate) struct ListSurface {
    pub offset: usize,
    pub viewport_rows: usize,
    pub item_ids: Vec<String>,
}

impl ListSurface {
    pub fn clamp_offset(&mut self) {
        let max = self
            .item_ids
            .len()
            .saturating_sub(self.viewport_rows.max(1));
        if self.offset > max {
            self.offset = max;
        }
    }

    /// Nudge the offset so the given row stays on screen.
    pub fn ensure_visible(&mut self, index: usize) {
        let rows = self.viewport_rows.max(1);
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + rows {
            self.offset = index + 1 - rows;
        }
    }
}

impl ScrollableContent for ListSurface {
    fn scroll_to_user(&mut self, user_id: &str) -> bool {
        let Some(index) = self.item_ids.iter().position(|id| id == user_id) else {
            return false;
        };
        self.offset = index.saturating_sub(self.viewport_rows.max(1) / 2);
        self.clamp_offset();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("u{i}")).collect()
    }

    #[test]
    fn list_centers_the_target_row() {
        let mut list = ListSurface {
            offset: 0,
            viewport_rows: 10,
            item_ids: ids(50),
        };
        assert!(list.scroll_to_user("u30"));
        assert_eq!(list.offset, 25);
    }

    #[test]
    fn grid_centers_by_card_row() {
        let mut grid = GridSurface {
            offset_row: 0,
            columns: 3,
            viewport_rows: 4,
            item_ids: ids(30),
        };
        assert!(grid.scroll_to_user("u15"));
        // u15 sits on card row 5; centered in a 4-row viewport.
        assert_eq!(grid.offset_row, 3);
    }

    #[test]
    fn missing_target_is_a_noop() {
        let mut list = ListSurface {
            offset: 3,
            viewport_rows: 10,
            item_ids: ids(5),
        };
        assert!(!list.scroll_to_user("unknown"));
        assert_eq!(list.offset, 3);
    }
}

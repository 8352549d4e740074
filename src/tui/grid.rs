use crate::model::ItemKey;
use crate::pager::{overlap_fraction, VisibilitySource};

/// Terminal rows taken by one card, borders included
pub const CARD_HEIGHT: u16 = 6;
/// Narrowest a card column may get
pub const CARD_MIN_WIDTH: u16 = 30;

/// Card grid selection and scroll state
pub struct GridState {
    pub selected: Option<usize>,
    /// First card row on screen
    pub scroll_row: usize,
    pub columns: usize,
    /// Card rows that fit completely
    pub visible_rows: usize,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            selected: None,
            scroll_row: 0,
            columns: 1,
            visible_rows: 3,
        }
    }
}

impl GridState {
    pub fn reset(&mut self) {
        self.selected = None;
        self.scroll_row = 0;
    }

    /// Fit the grid to a new area size
    pub fn resize(&mut self, width: u16, height: u16, total: usize) {
        self.columns = usize::from((width / CARD_MIN_WIDTH).max(1));
        self.visible_rows = usize::from((height / CARD_HEIGHT).max(1));
        self.scroll_row = self.scroll_row.min(self.max_scroll(total));
        if let Some(i) = self.selected {
            if i >= total {
                self.selected = total.checked_sub(1);
            }
        }
    }

    pub fn total_rows(&self, total: usize) -> usize {
        total.div_ceil(self.columns.max(1))
    }

    fn max_scroll(&self, total: usize) -> usize {
        self.total_rows(total).saturating_sub(self.visible_rows)
    }

    pub fn select_next(&mut self, total: usize) {
        self.step(total, 1);
    }

    pub fn select_prev(&mut self, total: usize) {
        self.step(total, -1);
    }

    pub fn select_down(&mut self, total: usize) {
        self.step(total, self.columns as isize);
    }

    pub fn select_up(&mut self, total: usize) {
        self.step(total, -(self.columns as isize));
    }

    pub fn page_down(&mut self, total: usize) {
        let jump = self.columns * self.visible_rows.saturating_sub(1).max(1);
        self.step(total, jump as isize);
    }

    pub fn page_up(&mut self, total: usize) {
        let jump = self.columns * self.visible_rows.saturating_sub(1).max(1);
        self.step(total, -(jump as isize));
    }

    pub fn select_first(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(0);
        self.scroll_row = 0;
    }

    pub fn select_last(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(total - 1);
        self.ensure_visible(total - 1);
    }

    /// Mouse wheel: move the viewport without touching the selection
    pub fn scroll_by(&mut self, delta: isize, total: usize) {
        let max = self.max_scroll(total) as isize;
        self.scroll_row = (self.scroll_row as isize + delta).clamp(0, max.max(0)) as usize;
    }

    fn step(&mut self, total: usize, delta: isize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => (i as isize + delta).clamp(0, total as isize - 1) as usize,
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    fn ensure_visible(&mut self, index: usize) {
        let row = index / self.columns.max(1);
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if self.visible_rows > 0 && row >= self.scroll_row + self.visible_rows {
            self.scroll_row = row + 1 - self.visible_rows;
        }
    }

    pub fn viewport(&self, height: u16) -> GridViewport {
        GridViewport {
            columns: self.columns.max(1),
            scroll_row: self.scroll_row,
            height,
        }
    }
}

/// Geometry of the last drawn grid, answering visibility queries
#[derive(Debug, Clone, Copy, Default)]
pub struct GridViewport {
    pub columns: usize,
    pub scroll_row: usize,
    /// Lines available to the grid
    pub height: u16,
}

impl VisibilitySource<ItemKey> for GridViewport {
    fn visible_fraction(&self, target: &ItemKey) -> Option<f32> {
        if self.columns == 0 || self.height == 0 {
            return None;
        }
        let row = target.position / self.columns;
        let card = f32::from(CARD_HEIGHT);
        let top = (row as f32 - self.scroll_row as f32) * card;
        Some(overlap_fraction(top, top + card, 0.0, f32::from(self.height)))
    }
}

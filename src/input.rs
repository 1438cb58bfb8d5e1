//! Input plumbing between the DOM and the game: normalized events, click
//! targets registered during rendering, and pixel-to-cell conversion.

use ratzilla::ratatui::layout::Rect;

/// Keyboard and pointer input, after the DOM specifics are stripped off.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    /// A press on a registered target. The ID is one of the click constants
    /// in `mansion::actions`.
    Click(u16),
}

#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Terminal cells, not pixels.
    pub rect: Rect,
    pub action_id: u16,
}

/// Rebuilt on every frame by the renderer, read by the mouse handler.
#[derive(Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Full-width target on one row of `area`. Rows outside the area are dropped.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if (area.y..area.y + area.height).contains(&row) {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Targets for a one-row bar of labels separated by `separator_width`
    /// columns. `labels` holds `(display_width, action_id)` per label.
    ///
    /// Each separator is split down the middle between its neighbours, and
    /// the outer labels stretch to the edges of `total_width`, so every
    /// column of the bar hits something.
    pub fn register_tab_targets(
        &mut self,
        labels: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        if labels.is_empty() || total_width == 0 {
            return;
        }

        // Column where each label ends, relative to `x`.
        let ends: Vec<u16> = labels
            .iter()
            .scan(0u16, |cursor, &(width, _)| {
                let end = *cursor + width;
                *cursor = end + separator_width;
                Some(end)
            })
            .collect();
        let half_gap = separator_width / 2;

        let mut left = 0;
        for (i, &(_, action_id)) in labels.iter().enumerate() {
            let right = if i + 1 == labels.len() {
                total_width
            } else {
                (ends[i] + half_gap).min(total_width)
            };
            if right > left {
                self.add_click_target(Rect::new(x + left, y, right - left, height), action_id);
            }
            left = right.max(left);
        }
    }

    /// The topmost target under a cell. Later registrations sit on top.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Stack the panels instead of placing them side by side.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Pixel offset inside the grid container to a terminal row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Pixel offset inside the grid container to a terminal column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

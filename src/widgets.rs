//! Clickable widgets. Each one draws itself and registers its own click
//! targets in the same call, so the hit areas cannot drift from the text.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// One row of labelled buttons.
///
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("[Enter] Start", start_style, START_GAME)
///     .tab("[R] Restart", restart_style, RESTART_GAME)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Targets are placed inside the block's borders.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Click IDs in display order.
    pub fn ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.tabs.iter().map(|(_, _, id)| *id)
    }

    fn padded_labels(&self) -> Vec<(String, Style, u16)> {
        self.tabs
            .iter()
            .map(|(label, style, id)| (format!(" {label} "), *style, *id))
            .collect()
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let padded = self.padded_labels();
        let separator_width = Line::from(self.separator).width() as u16;
        let widths: Vec<(u16, u16)> = padded
            .iter()
            .map(|(text, _, id)| (Line::from(text.as_str()).width() as u16, *id))
            .collect();

        let mut spans: Vec<Span> = Vec::new();
        for (i, (text, style, _)) in padded.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            spans.push(Span::styled(text, style));
        }

        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        let paragraph = Paragraph::new(Line::from(spans));
        let paragraph = match self.block {
            Some(block) => paragraph.block(block),
            None => paragraph,
        };
        f.render_widget(paragraph, area);

        // Full outer height so taps on the border still count.
        cs.register_tab_targets(
            &widths,
            separator_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines for a `Paragraph`, some of them bound to click actions.
///
/// A clickable line keeps its action whatever gets pushed before it, so
/// rows never need to be counted by hand.
#[derive(Default)]
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// One row per line, no wrapping. `top_offset` and `bottom_offset` are
    /// the border rows of the surrounding block; lines past the bottom are
    /// not registered.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let first_row = area.y + top_offset;
        let end_row = area.y + area.height.saturating_sub(bottom_offset);
        for &(index, action_id) in &self.actions {
            let row = first_row + index;
            if row < end_row {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

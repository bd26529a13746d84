use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{border_style, Component, InlineView, Outcome};

/// Width a cell gets when the row is wide enough, brackets excluded.
pub const IDEAL_CELL_WIDTH: u16 = 35;
/// The `[` and `]` around a cell.
pub const CELL_BORDER: u16 = 2;
/// Gap between the two cells.
pub const COLUMN_SPACING: u16 = 1;

/// Outer widths of the left and right cells for a row `width` wide. Both get
/// the ideal width when it fits; otherwise the space is split evenly.
pub(crate) fn split_columns(width: u16) -> (u16, u16) {
    let available = width.saturating_sub(COLUMN_SPACING);
    let ideal = IDEAL_CELL_WIDTH + CELL_BORDER;
    if available >= ideal * 2 {
        (ideal, ideal)
    } else {
        let left = available / 2;
        (left, available - left)
    }
}

/// Two cells side by side. At most one of them is active at a time, chosen
/// by the row's column pointer.
#[derive(Debug, Clone)]
pub struct RowPair<A, B> {
    first: A,
    second: B,
    column: usize,
    widths: (u16, u16),
    active: bool,
}

impl<A, B> RowPair<A, B>
where
    A: Component + InlineView,
    B: Component + InlineView,
{
    pub fn new(first: A, second: B) -> Self {
        Self {
            first,
            second,
            column: 0,
            widths: (0, 0),
            active: false,
        }
    }

    pub fn first(&self) -> &A {
        &self.first
    }

    pub fn second(&self) -> &B {
        &self.second
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Points the row at column 0 or 1 and re-derives which cell is active.
    pub(crate) fn set_column(&mut self, column: usize) {
        self.column = column.min(1);
        self.set_active(self.active);
    }

    /// Outer widths of the two cells, brackets included.
    pub fn widths(&self) -> (u16, u16) {
        self.widths
    }

    fn cell_spans(&self, column: usize) -> Vec<Span<'static>> {
        let width = if column == 0 { self.widths.0 } else { self.widths.1 };
        let inner = width.saturating_sub(CELL_BORDER);
        let bracket = if self.active && column == self.column {
            border_style(true).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut line = if column == 0 {
            self.first.inline(inner)
        } else {
            self.second.inline(inner)
        };
        let pad = (inner as usize).saturating_sub(line.width());
        let mut spans = vec![Span::styled("[", bracket)];
        spans.append(&mut line.spans);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled("]", bracket));
        spans
    }

    pub(crate) fn cell_overlay(&self) -> Option<super::Overlay> {
        self.first.overlay().or_else(|| self.second.overlay())
    }
}

impl<A, B> Component for RowPair<A, B>
where
    A: Component + InlineView,
    B: Component + InlineView,
{
    fn set_active(&mut self, active: bool) {
        self.first.set_active(false);
        self.second.set_active(false);
        self.active = active;
        if active {
            if self.column == 0 {
                self.first.set_active(true);
            } else {
                self.second.set_active(true);
            }
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_size(&mut self, width: u16, _height: u16) {
        self.widths = split_columns(width);
        self.first.set_size(self.widths.0.saturating_sub(CELL_BORDER), 1);
        self.second.set_size(self.widths.1.saturating_sub(CELL_BORDER), 1);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if !self.active {
            return Outcome::Ignored;
        }
        if self.column == 0 {
            self.first.handle_key(key)
        } else {
            self.second.handle_key(key)
        }
    }

    fn active_leaves(&self) -> usize {
        self.first.active_leaves() + self.second.active_leaves()
    }

    fn captures_input(&self) -> bool {
        self.first.captures_input() || self.second.captures_input()
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        let mut spans = self.cell_spans(0);
        spans.push(Span::raw(" ".repeat(COLUMN_SPACING as usize)));
        spans.extend(self.cell_spans(1));
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

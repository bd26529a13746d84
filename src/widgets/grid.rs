use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{
    draw_overlay,
    row::{split_columns, COLUMN_SPACING},
    Component, InlineView, Outcome, RowPair, Selector, TextField,
};

pub const PARAM_ROWS: usize = 6;
pub const HEADER_ROWS: usize = 9;

/// Header names offered by the header grid. The first entry means "no header".
pub const HEADER_NAMES: [&str; 16] = [
    "(empty)",
    "Accept",
    "Accept-Encoding",
    "Accept-Language",
    "Authorization",
    "Cache-Control",
    "Connection",
    "Content-Type",
    "Cookie",
    "Host",
    "Origin",
    "Referer",
    "User-Agent",
    "X-Api-Key",
    "X-Requested-With",
    "X-Request-Id",
];

/// Label row plus separator row.
const CHROME_LINES: u16 = 2;

pub type ParamGrid = RowGrid<TextField, TextField>;
pub type HeaderGrid = RowGrid<Selector, TextField>;

/// A fixed number of two-cell rows with a focus cursor and a vertical
/// scroll window that always contains the focused row.
#[derive(Debug, Clone)]
pub struct RowGrid<A, B> {
    rows: Vec<RowPair<A, B>>,
    labels: (&'static str, &'static str),
    row: usize,
    column: usize,
    offset: usize,
    width: u16,
    height: u16,
    active: bool,
}

impl<A, B> RowGrid<A, B>
where
    A: Component + InlineView,
    B: Component + InlineView,
{
    pub fn new(rows: Vec<RowPair<A, B>>, labels: (&'static str, &'static str)) -> Self {
        Self {
            rows,
            labels,
            row: 0,
            column: 0,
            offset: 0,
            width: 0,
            height: 0,
            active: false,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&RowPair<A, B>> {
        self.rows.get(index)
    }

    /// Focused `(row, column)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn scroll_offset(&self) -> usize {
        self.offset
    }

    /// Rows that fit in the current height. One line is reserved for the
    /// scroll indicator when not every row fits.
    pub fn visible_rows(&self) -> usize {
        let total = self.rows.len();
        let fit = self.height.saturating_sub(CHROME_LINES) as usize;
        let visible = if total > fit {
            fit.saturating_sub(1)
        } else {
            fit
        };
        visible.min(total)
    }

    pub fn has_more_rows(&self) -> bool {
        self.rows.len() > self.visible_rows()
    }

    /// Outer widths of the left and right cells, borders included.
    pub fn column_widths(&self) -> (u16, u16) {
        split_columns(self.width)
    }

    /// Adjusts the scroll offset so the focused row is inside the window.
    pub fn ensure_focused_visible(&mut self) {
        let visible = self.visible_rows();
        if visible == 0 {
            self.offset = 0;
            return;
        }
        if self.row < self.offset {
            self.offset = self.row;
        } else if self.row >= self.offset + visible {
            self.offset = self.row + 1 - visible;
        }
        self.offset = self.offset.min(self.rows.len().saturating_sub(visible));
    }

    fn move_to(&mut self, row: usize, column: usize) {
        if (row, column) == (self.row, self.column) {
            return;
        }
        self.row = row;
        self.column = column;
        self.ensure_focused_visible();
        self.refocus();
    }

    fn refocus(&mut self) {
        for row in &mut self.rows {
            row.set_active(false);
        }
        if self.active {
            if let Some(row) = self.rows.get_mut(self.row) {
                row.set_column(self.column);
                row.set_active(true);
            }
        }
    }
}

impl<A, B> Component for RowGrid<A, B>
where
    A: Component + InlineView,
    B: Component + InlineView,
{
    fn set_active(&mut self, active: bool) {
        self.active = active;
        if active {
            self.ensure_focused_visible();
        }
        self.refocus();
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        for row in &mut self.rows {
            row.set_size(width, 1);
        }
        self.ensure_focused_visible();
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if !self.active || self.rows.is_empty() {
            return Outcome::Ignored;
        }
        // An open cell keeps the arrows for itself.
        if self.rows[self.row].captures_input() {
            return self.rows[self.row].handle_key(key);
        }
        let last = self.rows.len() - 1;
        match key.code {
            KeyCode::Up => self.move_to(self.row.saturating_sub(1), self.column),
            KeyCode::Down => self.move_to((self.row + 1).min(last), self.column),
            KeyCode::Left => match (self.row, self.column) {
                (row, 1) => self.move_to(row, 0),
                (0, _) => {}
                (row, _) => self.move_to(row - 1, 1),
            },
            KeyCode::Right => match (self.row, self.column) {
                (row, 0) => self.move_to(row, 1),
                (row, _) if row == last => {}
                (row, _) => self.move_to(row + 1, 0),
            },
            _ => return self.rows[self.row].handle_key(key),
        }
        Outcome::Consumed
    }

    fn active_leaves(&self) -> usize {
        self.rows.iter().map(|row| row.active_leaves()).sum()
    }

    fn captures_input(&self) -> bool {
        self.active
            && self
                .rows
                .get(self.row)
                .is_some_and(|row| row.captures_input())
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        let (left, right) = self.column_widths();
        let label_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(vec![
                Span::styled(format!("{:<w$}", self.labels.0, w = left as usize), label_style),
                Span::raw(" ".repeat(COLUMN_SPACING as usize)),
                Span::styled(format!("{:<w$}", self.labels.1, w = right as usize), label_style),
            ]),
            Line::from(Span::styled(
                "─".repeat(area.width as usize),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        let visible = self.visible_rows();
        let shown = self.offset..(self.offset + visible).min(self.rows.len());
        // Rows draw themselves over these blank lines.
        lines.extend(shown.clone().map(|_| Line::default()));

        if self.has_more_rows() && visible > 0 {
            let up = if self.offset > 0 { "↑" } else { " " };
            let down = if self.offset + visible < self.rows.len() {
                "↓"
            } else {
                " "
            };
            lines.push(Line::from(Span::styled(
                format!("{up} {down}  {}/{}", self.row + 1, self.rows.len()),
                Style::default().fg(Color::DarkGray),
            )));
        }

        f.render_widget(Paragraph::new(lines), area);
        for (i, row) in shown.enumerate() {
            let y = area.y.saturating_add(CHROME_LINES + i as u16);
            let row_area = crate::layout::clip(Rect::new(area.x, y, area.width, 1), area);
            self.rows[row].draw(f, row_area);
        }

        if let Some(overlay) = self.rows.get(self.row).and_then(|row| row.cell_overlay()) {
            let x = if self.column == 0 {
                area.x
            } else {
                area.x.saturating_add(left + COLUMN_SPACING)
            };
            let y = area
                .y
                .saturating_add(CHROME_LINES)
                .saturating_add(self.row.saturating_sub(self.offset) as u16);
            let width = if self.column == 0 { left } else { right };
            draw_overlay(f, Rect::new(x, y, width, 1), area, overlay);
        }
    }
}

impl RowGrid<TextField, TextField> {
    pub fn params() -> Self {
        let rows = (0..PARAM_ROWS)
            .map(|_| {
                RowPair::new(
                    TextField::new("key").with_char_limit(100),
                    TextField::new("value").with_char_limit(100),
                )
            })
            .collect();
        Self::new(rows, ("Key", "Value"))
    }

    /// Rows with a non-blank key, keys and values trimmed. A repeated key
    /// keeps its last value.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.rows
            .iter()
            .filter_map(|row| {
                let key = row.first().value().trim();
                (!key.is_empty())
                    .then(|| (key.to_string(), row.second().value().trim().to_string()))
            })
            .collect()
    }
}

impl RowGrid<Selector, TextField> {
    pub fn headers() -> Self {
        let rows = (0..HEADER_ROWS)
            .map(|_| {
                RowPair::new(
                    Selector::new(HEADER_NAMES),
                    TextField::new("value").with_char_limit(200),
                )
            })
            .collect();
        Self::new(rows, ("Header", "Value"))
    }

    /// Rows whose selected name is a real header, values taken verbatim.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.rows
            .iter()
            .filter_map(|row| {
                let name = row.first().selected().trim();
                (!name.is_empty() && name != HEADER_NAMES[0])
                    .then(|| (name.to_string(), row.second().value().to_string()))
            })
            .collect()
    }
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{Component, Outcome};

/// Multi-line editor with a scroll window that follows the cursor.
#[derive(Debug, Clone)]
pub struct TextArea {
    lines: Vec<String>,
    row: usize,
    column: usize,
    offset: usize,
    placeholder: String,
    height: u16,
    active: bool,
}

impl TextArea {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            column: 0,
            offset: 0,
            placeholder: placeholder.into(),
            height: 0,
            active: false,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn set_text(&mut self, text: &str) {
        self.lines = text.split('\n').map(str::to_string).collect();
        self.row = self.lines.len() - 1;
        self.column = self.line_len(self.row);
        self.scroll_to_cursor();
    }

    /// `(row, column)` of the cursor, column counted in chars.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| l.chars().count()).unwrap_or(0)
    }

    fn byte_index(line: &str, column: usize) -> usize {
        line.char_indices()
            .nth(column)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    fn scroll_to_cursor(&mut self) {
        let height = self.height as usize;
        if height == 0 {
            self.offset = 0;
            return;
        }
        if self.row < self.offset {
            self.offset = self.row;
        } else if self.row >= self.offset + height {
            self.offset = self.row + 1 - height;
        }
    }

    fn insert_char(&mut self, c: char) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.column);
        line.insert(at, c);
        self.column += 1;
    }

    fn newline(&mut self) {
        let line = &mut self.lines[self.row];
        let at = Self::byte_index(line, self.column);
        let rest = line.split_off(at);
        self.lines.insert(self.row + 1, rest);
        self.row += 1;
        self.column = 0;
    }

    fn backspace(&mut self) {
        if self.column > 0 {
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.column - 1);
            line.remove(at);
            self.column -= 1;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.column = self.line_len(self.row);
            self.lines[self.row].push_str(&line);
        }
    }

    fn delete(&mut self) {
        if self.column < self.line_len(self.row) {
            let line = &mut self.lines[self.row];
            let at = Self::byte_index(line, self.column);
            line.remove(at);
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    fn left(&mut self) {
        if self.column > 0 {
            self.column -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.column = self.line_len(self.row);
        }
    }

    fn right(&mut self) {
        if self.column < self.line_len(self.row) {
            self.column += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.column = 0;
        }
    }

    fn up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.column = self.column.min(self.line_len(self.row));
        }
    }

    fn down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.column = self.column.min(self.line_len(self.row));
        }
    }

    fn render_line(&self, row: usize, width: usize) -> Line<'static> {
        let chars: Vec<char> = self.lines[row].chars().collect();
        let style = Style::default().fg(Color::White);
        if !(self.active && row == self.row) {
            let shown: String = chars.iter().take(width).collect();
            return Line::from(Span::styled(shown, style));
        }
        let start = if self.column + 1 > width {
            self.column + 1 - width
        } else {
            0
        };
        let end = (start + width).min(chars.len());
        let before: String = chars[start..self.column.min(end)].iter().collect();
        let at = chars
            .get(self.column)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = if self.column < end {
            chars[self.column + 1..end].iter().collect()
        } else {
            String::new()
        };
        Line::from(vec![
            Span::styled(before, style),
            Span::styled(at, style.add_modifier(Modifier::REVERSED)),
            Span::styled(after, style),
        ])
    }
}

impl Component for TextArea {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_size(&mut self, _width: u16, height: u16) {
        self.height = height;
        self.scroll_to_cursor();
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if !self.active {
            return Outcome::Ignored;
        }
        match key.code {
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.insert_char(c)
            }
            KeyCode::Enter => self.newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.left(),
            KeyCode::Right => self.right(),
            KeyCode::Up => self.up(),
            KeyCode::Down => self.down(),
            KeyCode::Home => self.column = 0,
            KeyCode::End => self.column = self.line_len(self.row),
            _ => return Outcome::Ignored,
        }
        self.scroll_to_cursor();
        Outcome::Consumed
    }

    fn active_leaves(&self) -> usize {
        usize::from(self.active)
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.lines.len() == 1 && self.lines[0].is_empty() {
            let hint = Style::default().fg(Color::DarkGray);
            let mut chars = self.placeholder.chars();
            let line = if self.active {
                let first = chars.next().map(String::from).unwrap_or_else(|| " ".to_string());
                Line::from(vec![
                    Span::styled(first, hint.add_modifier(Modifier::REVERSED)),
                    Span::styled(chars.collect::<String>(), hint),
                ])
            } else {
                Line::from(Span::styled(self.placeholder.clone(), hint))
            };
            f.render_widget(Paragraph::new(line), area);
            return;
        }
        let lines: Vec<Line> = (self.offset..self.lines.len())
            .take(area.height as usize)
            .map(|row| self.render_line(row, area.width as usize))
            .collect();
        f.render_widget(Paragraph::new(lines), area);
    }
}

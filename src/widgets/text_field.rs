use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{Component, InlineView, Outcome};

/// Single-line text input with a char-indexed cursor.
#[derive(Debug, Clone)]
pub struct TextField {
    value: String,
    cursor: usize,
    placeholder: String,
    char_limit: Option<usize>,
    masked: bool,
    width: u16,
    active: bool,
}

impl TextField {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            placeholder: placeholder.into(),
            char_limit: None,
            masked: false,
            width: 0,
            active: false,
        }
    }

    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = Some(limit);
        self
    }

    /// Renders every character as `*`.
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    /// Replaces the value and parks the cursor at its end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        let value: String = value.into();
        self.value = match self.char_limit {
            Some(limit) => value.chars().take(limit).collect(),
            None => value,
        };
        self.cursor_end();
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.value.len())
    }

    fn insert(&mut self, c: char) {
        if self.char_limit.is_some_and(|limit| self.len() >= limit) {
            return;
        }
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.value.remove(at);
    }

    fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    fn display(&self) -> String {
        if self.masked {
            "*".repeat(self.len())
        } else {
            self.value.clone()
        }
    }
}

impl Component for TextField {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_size(&mut self, width: u16, _height: u16) {
        self.width = width;
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
                self.insert(c);
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor_end(),
            _ => return Outcome::Ignored,
        }
        Outcome::Consumed
    }

    fn active_leaves(&self) -> usize {
        usize::from(self.active)
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        f.render_widget(Paragraph::new(self.inline(area.width)), area);
    }
}

impl InlineView for TextField {
    fn inline(&self, width: u16) -> Line<'static> {
        let width = width as usize;
        if width == 0 {
            return Line::default();
        }
        if self.value.is_empty() && !self.active {
            let hint: String = self.placeholder.chars().take(width).collect();
            return Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        }

        let chars: Vec<char> = self.display().chars().collect();
        // Keep the cursor cell inside the window.
        let start = if self.active && self.cursor + 1 > width {
            self.cursor + 1 - width
        } else {
            0
        };
        let end = (start + width).min(chars.len());
        let text_style = Style::default().fg(Color::White);

        if !self.active {
            let shown: String = chars[start..end].iter().collect();
            return Line::from(Span::styled(shown, text_style));
        }

        let before: String = chars[start..self.cursor.min(end)].iter().collect();
        let at: String = chars
            .get(self.cursor)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = if self.cursor < end {
            chars[self.cursor + 1..end].iter().collect()
        } else {
            String::new()
        };
        Line::from(vec![
            Span::styled(before, text_style),
            Span::styled(at, text_style.add_modifier(Modifier::REVERSED)),
            Span::styled(after, text_style),
        ])
    }
}

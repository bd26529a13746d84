use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

use super::{Component, Outcome};

/// Hard-wraps every line of `content` to at most `width` characters.
///
/// Existing line breaks are kept, so wrapping already wrapped text at the
/// same width changes nothing. A zero width returns the input unchanged.
pub fn wrap(content: &str, width: usize) -> String {
    if width == 0 {
        return content.to_string();
    }
    let mut out = String::with_capacity(content.len() + content.len() / width.max(1));
    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for (j, c) in line.chars().enumerate() {
            if j > 0 && j % width == 0 {
                out.push('\n');
            }
            out.push(c);
        }
    }
    out
}

/// Read-only scrollable text. Keeps the raw content for copying and a
/// wrapped copy for display.
#[derive(Debug, Clone)]
pub struct Viewport {
    raw: String,
    lines: Vec<String>,
    offset: usize,
    width: u16,
    height: u16,
    active: bool,
}

impl Viewport {
    pub fn new(content: impl Into<String>) -> Self {
        let mut viewport = Self {
            raw: String::new(),
            lines: Vec::new(),
            offset: 0,
            width: 0,
            height: 0,
            active: false,
        };
        viewport.set_content(content);
        viewport
    }

    /// Replaces the content and scrolls back to the top.
    pub fn set_content(&mut self, content: impl Into<String>) {
        let raw = content.into();
        self.set_content_with_display(raw.clone(), &raw);
    }

    /// Like `set_content`, but shows `display` while `y` still copies `raw`.
    pub fn set_content_with_display(&mut self, raw: impl Into<String>, display: &str) {
        self.raw = raw.into();
        self.lines = split_lines(&wrap(display, self.width as usize));
        self.offset = 0;
    }

    pub fn raw_content(&self) -> &str {
        &self.raw
    }

    pub fn wrapped_content(&self) -> String {
        self.lines.join("\n")
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn visible_lines(&self) -> usize {
        self.height as usize
    }

    fn max_offset(&self) -> usize {
        self.total_lines().saturating_sub(self.visible_lines())
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset());
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    fn half_page(&self) -> usize {
        (self.visible_lines() / 2).max(1)
    }

    fn page(&self) -> usize {
        self.visible_lines().max(1)
    }

    /// "current/total" position label, empty when everything fits.
    pub fn position(&self) -> String {
        if self.total_lines() <= self.visible_lines() {
            return String::new();
        }
        let last = (self.offset + self.visible_lines()).min(self.total_lines());
        format!("{}-{}/{}", self.offset + 1, last, self.total_lines())
    }
}

fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}

impl Component for Viewport {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    /// Re-wraps the displayed text at the new width and clamps the offset.
    fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let displayed = self.wrapped_content();
        self.lines = split_lines(&wrap(&displayed, width as usize));
        self.offset = self.offset.min(self.max_offset());
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if !self.active {
            return Outcome::Ignored;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('y') if !ctrl => return Outcome::Copy(self.raw.clone()),
            KeyCode::Char('u') if ctrl => self.scroll_up(self.half_page()),
            KeyCode::Char('d') if ctrl => self.scroll_down(self.half_page()),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(self.page()),
            KeyCode::PageDown => self.scroll_down(self.page()),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            _ => return Outcome::Ignored,
        }
        Outcome::Consumed
    }

    fn active_leaves(&self) -> usize {
        usize::from(self.active)
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .lines
            .iter()
            .skip(self.offset)
            .take(area.height as usize)
            .map(|line| Line::from(line.replace('\r', "")))
            .collect();
        f.render_widget(Paragraph::new(lines), area);
    }
}

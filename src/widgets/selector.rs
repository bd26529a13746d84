use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::debug;

use super::{draw_overlay, highlight_style, Component, InlineView, Outcome, Overlay};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorState {
    Closed,
    Open,
}

/// Dropdown over a fixed list of options.
///
/// While open, the highlight moves independently of the committed selection.
/// Closing without committing restores the highlight to the selection.
#[derive(Debug, Clone)]
pub struct Selector {
    options: Vec<String>,
    selected: usize,
    highlighted: usize,
    state: SelectorState,
    active: bool,
}

impl Selector {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options: Vec<String> = options.into_iter().map(Into::into).collect();
        if options.is_empty() {
            options.push(String::new());
        }
        Self {
            options,
            selected: 0,
            highlighted: 0,
            state: SelectorState::Closed,
            active: false,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SelectorState::Open
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn selected(&self) -> &str {
        &self.options[self.selected]
    }

    /// Commits `index` directly, for programmatic setup. Out-of-range indices
    /// are rejected.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.options.len() {
            return false;
        }
        self.selected = index;
        self.highlighted = index;
        true
    }

    /// Commits the option matching `value`, ignoring ASCII case.
    pub fn select_value(&mut self, value: &str) -> bool {
        match self
            .options
            .iter()
            .position(|option| option.eq_ignore_ascii_case(value))
        {
            Some(index) => self.select_index(index),
            None => false,
        }
    }

    pub fn open(&mut self) {
        if self.state == SelectorState::Closed {
            self.highlighted = self.selected;
            self.state = SelectorState::Open;
        }
    }

    /// Closes without committing.
    pub fn close(&mut self) {
        if self.state == SelectorState::Open {
            self.highlighted = self.selected;
            self.state = SelectorState::Closed;
        }
    }

    /// Moves the highlight forward, wrapping past the last option.
    pub fn highlight_next(&mut self) {
        if self.state == SelectorState::Open {
            self.highlighted = (self.highlighted + 1) % self.options.len();
        }
    }

    pub fn highlight_prev(&mut self) {
        if self.state == SelectorState::Open {
            let len = self.options.len();
            self.highlighted = (self.highlighted + len - 1) % len;
        }
    }

    /// Commits the highlighted option and closes.
    pub fn commit(&mut self) {
        if self.state == SelectorState::Open {
            self.selected = self.highlighted;
            self.state = SelectorState::Closed;
            debug!(selected = %self.selected(), "selector committed");
        }
    }

    /// Draws the open option list below `anchor`, kept inside `bounds`.
    pub fn draw_dropdown(&self, f: &mut Frame, anchor: Rect, bounds: Rect) {
        if let Some(overlay) = self.overlay() {
            draw_overlay(f, anchor, bounds, overlay);
        }
    }
}

impl Component for Selector {
    fn set_active(&mut self, active: bool) {
        if !active {
            self.close();
        }
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_size(&mut self, _width: u16, _height: u16) {}

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if !self.active {
            return Outcome::Ignored;
        }
        match self.state {
            SelectorState::Closed => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.open();
                    Outcome::Consumed
                }
                _ => Outcome::Ignored,
            },
            // An open list swallows everything it does not understand.
            SelectorState::Open => {
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => self.highlight_next(),
                    KeyCode::Up | KeyCode::Char('k') => self.highlight_prev(),
                    KeyCode::Enter => self.commit(),
                    KeyCode::Esc => self.close(),
                    _ => {}
                }
                Outcome::Consumed
            }
        }
    }

    fn active_leaves(&self) -> usize {
        usize::from(self.active)
    }

    fn captures_input(&self) -> bool {
        self.active && self.is_open()
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        f.render_widget(Paragraph::new(self.inline(area.width)), area);
    }
}

impl InlineView for Selector {
    fn inline(&self, width: u16) -> Line<'static> {
        let arrow = if self.is_open() { "▲" } else { "▼" };
        let label_width = (width as usize).saturating_sub(2);
        let label: String = self.selected().chars().take(label_width).collect();
        let style = if self.active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        if width < 2 {
            return Line::from(Span::styled(label, style));
        }
        Line::from(vec![
            Span::styled(format!("{:<label_width$}", label), style),
            Span::raw(" "),
            Span::styled(arrow, Style::default().fg(Color::DarkGray)),
        ])
    }

    fn overlay(&self) -> Option<Overlay> {
        if !self.is_open() {
            return None;
        }
        let lines = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                if i == self.highlighted {
                    Line::from(Span::styled(format!("▶ {option}"), highlight_style()))
                } else {
                    Line::from(format!("  {option}"))
                }
            })
            .collect();
        Some(Overlay {
            lines,
            focus: self.highlighted,
        })
    }
}

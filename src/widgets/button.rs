use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::Paragraph,
    Frame,
};

use super::{Component, Outcome};

#[derive(Debug, Clone)]
pub struct SubmitButton {
    label: String,
    active: bool,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            active: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Component for SubmitButton {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_size(&mut self, _width: u16, _height: u16) {}

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if self.active && matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            Outcome::Submit
        } else {
            Outcome::Ignored
        }
    }

    fn active_leaves(&self) -> usize {
        usize::from(self.active)
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        let style = if self.active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        };
        f.render_widget(
            Paragraph::new(self.label.as_str())
                .style(style)
                .alignment(Alignment::Center),
            area,
        );
    }
}

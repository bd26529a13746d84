use std::time::Duration;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const INTERVAL: Duration = Duration::from_millis(80);

/// Busy indicator shown while a request is outstanding.
///
/// It asks the event loop for ticks through [`Spinner::tick_interval`], which
/// is `None` once the spinner is hidden, so hiding it stops the animation.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    visible: bool,
    frame: usize,
    message: String,
}

impl Spinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.visible = true;
        self.frame = 0;
        self.message = message.into();
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn frame(&self) -> &'static str {
        FRAMES[self.frame]
    }

    /// Advances one frame. A hidden spinner ignores ticks.
    pub fn tick(&mut self) {
        if self.visible {
            self.frame = (self.frame + 1) % FRAMES.len();
        }
    }

    pub fn tick_interval(&self) -> Option<Duration> {
        self.visible.then_some(INTERVAL)
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        if !self.visible || area.width == 0 || area.height == 0 {
            return;
        }
        let line = Line::from(vec![
            Span::styled(self.frame(), Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled(self.message.clone(), Style::default().fg(Color::Gray)),
        ]);
        f.render_widget(Clear, area);
        f.render_widget(Paragraph::new(line), area);
    }
}

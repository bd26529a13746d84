use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::layout::centered_rect;

/// Modal notification. While visible the app routes keys to it only.
#[derive(Debug, Clone, Default)]
pub struct Toast {
    message: Option<String>,
}

impl Toast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn hide(&mut self) {
        self.message = None;
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn draw(&self, f: &mut Frame, screen: Rect) {
        let Some(message) = &self.message else {
            return;
        };
        let area = centered_rect(60, 7, screen);
        if area.width < 3 || area.height < 3 {
            return;
        }
        f.render_widget(Clear, area);
        let text = vec![
            Line::from(message.as_str()),
            Line::default(),
            Line::from(Span::styled(
                "Press Enter to dismiss",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let popup = Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(Span::styled(
                        " Notice ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )),
            );
        f.render_widget(popup, area);
    }
}

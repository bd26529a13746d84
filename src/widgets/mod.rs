//! Focusable widgets and the trait that lets containers route input to them.
//!
//! Every widget owns its children outright. Containers keep a selection
//! pointer (a tab index, a grid cursor, a focus enum) and derive which single
//! child is active from it whenever their own activation changes.

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub mod auth;
pub mod button;
pub mod grid;
pub mod query;
pub mod result;
pub mod row;
pub mod selector;
pub mod spinner;
pub mod tabs;
pub mod text_area;
pub mod text_field;
pub mod toast;
pub mod viewport;

pub use auth::{AuthKind, AuthPane, FieldStack};
pub use button::SubmitButton;
pub use grid::{HeaderGrid, ParamGrid, RowGrid};
pub use query::{QueryPane, QueryTab};
pub use result::{ResultPane, ResultTab};
pub use row::RowPair;
pub use selector::{Selector, SelectorState};
pub use spinner::Spinner;
pub use tabs::{OuterTab, TabContainer, TabKind, TabSet};
pub use text_area::TextArea;
pub use text_field::TextField;
pub use toast::Toast;
pub use viewport::Viewport;

/// What a widget did with a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The widget did not claim the key; the caller may try elsewhere.
    Ignored,
    Consumed,
    /// The widget asks its owner to submit the request.
    Submit,
    /// The widget asks its owner to copy the given text to the clipboard.
    Copy(String),
}

impl Outcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored)
    }
}

/// A node in the widget tree.
pub trait Component {
    /// Deactivates every child, then reactivates the one the current selection
    /// points at when `active` is true. Calling it twice is a no-op.
    fn set_active(&mut self, active: bool);

    fn is_active(&self) -> bool;

    /// Assigns the drawable size. Must not move focus or change open state.
    fn set_size(&mut self, width: u16, height: u16);

    fn handle_key(&mut self, key: KeyEvent) -> Outcome;

    /// Number of active leaves in this subtree.
    fn active_leaves(&self) -> usize;

    /// True while the widget needs every key, including the ones its
    /// ancestors would normally intercept (an open dropdown).
    fn captures_input(&self) -> bool {
        false
    }

    fn draw(&self, f: &mut Frame, area: Rect);
}

/// Lines drawn on top of surrounding widgets, such as an open dropdown list.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub lines: Vec<Line<'static>>,
    /// Index of the line that must stay visible when the overlay is clipped.
    pub focus: usize,
}

/// A widget that can render itself as a single line inside a grid cell.
pub trait InlineView {
    fn inline(&self, width: u16) -> Line<'static>;

    fn overlay(&self) -> Option<Overlay> {
        None
    }
}

pub(crate) fn border_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Gray)
    }
}

pub(crate) fn title_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }
}

pub(crate) fn highlight_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Bordered block whose border colour follows the active flag.
pub(crate) fn framed<'a>(title: impl Into<Line<'a>>, active: bool) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(active))
        .title(title)
}

/// Draws an overlay below `anchor`, clipped to `bounds`. When the list does
/// not fit, a window around `overlay.focus` is shown instead.
pub(crate) fn draw_overlay(f: &mut Frame, anchor: Rect, bounds: Rect, overlay: Overlay) {
    let widest = overlay
        .lines
        .iter()
        .map(|line| line.width() as u16)
        .max()
        .unwrap_or(0);
    let width = anchor.width.max(widest.saturating_add(2));
    let wanted = Rect::new(
        anchor.x,
        anchor.bottom(),
        width,
        (overlay.lines.len() as u16).saturating_add(2),
    );
    let area = crate::layout::clip(wanted, bounds);
    if area.width < 3 || area.height < 3 {
        return;
    }

    let rows = (area.height - 2) as usize;
    let start = if overlay.focus >= rows {
        overlay.focus + 1 - rows
    } else {
        0
    };
    let visible: Vec<Line<'static>> = overlay.lines.into_iter().skip(start).take(rows).collect();

    f.render_widget(Clear, area);
    let list = Paragraph::new(visible).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, area);
}

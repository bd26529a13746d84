use std::marker::PhantomData;

use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::debug;

use super::{Component, Outcome, QueryPane, ResultPane};

/// An enum whose variants name the tabs of one tab set, in display order.
pub trait TabKind: Copy + PartialEq + std::fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn title(self) -> &'static str;
}

/// Which tab of `T` is selected. Exactly one always is.
#[derive(Debug, Clone, Copy)]
pub struct TabSet<T: TabKind> {
    index: usize,
    _kind: PhantomData<T>,
}

impl<T: TabKind> Default for TabSet<T> {
    fn default() -> Self {
        Self {
            index: 0,
            _kind: PhantomData,
        }
    }
}

impl<T: TabKind> TabSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> T {
        T::ALL[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn labels(&self) -> Vec<&'static str> {
        T::ALL.iter().map(|tab| tab.title()).collect()
    }

    pub fn select(&mut self, tab: T) {
        if let Some(index) = T::ALL.iter().position(|t| *t == tab) {
            self.index = index;
        }
    }

    pub fn next(&mut self) -> T {
        self.index = (self.index + 1) % T::ALL.len();
        self.current()
    }

    pub fn prev(&mut self) -> T {
        self.index = (self.index + T::ALL.len() - 1) % T::ALL.len();
        self.current()
    }
}

/// One-line tab strip. The selected tab is reversed, green when the owning
/// container has focus.
pub(crate) fn draw_tab_bar<T: TabKind>(f: &mut Frame, area: Rect, tabs: &TabSet<T>, active: bool) {
    let mut spans = Vec::new();
    for (i, title) in tabs.labels().into_iter().enumerate() {
        let style = if i == tabs.index() {
            let base = Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED);
            if active {
                base.fg(Color::Green)
            } else {
                base.fg(Color::White)
            }
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {title} "), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Splits off the one-line tab strip at the top of `area`.
pub(crate) fn split_tab_bar(area: Rect) -> (Rect, Rect) {
    let bar = Rect::new(area.x, area.y, area.width, area.height.min(1));
    let rest = Rect::new(
        area.x,
        area.y.saturating_add(bar.height),
        area.width,
        area.height.saturating_sub(bar.height),
    );
    (bar, rest)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuterTab {
    Query,
    Result,
}

impl TabKind for OuterTab {
    const ALL: &'static [Self] = &[OuterTab::Query, OuterTab::Result];

    fn title(self) -> &'static str {
        match self {
            OuterTab::Query => "(Alt+3) Query",
            OuterTab::Result => "(Alt+4) Result",
        }
    }
}

/// The request composition pane and the response pane behind one tab strip.
#[derive(Debug, Clone)]
pub struct TabContainer {
    tabs: TabSet<OuterTab>,
    query: QueryPane,
    result: ResultPane,
    active: bool,
}

impl Default for TabContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl TabContainer {
    pub fn new() -> Self {
        Self {
            tabs: TabSet::new(),
            query: QueryPane::new(),
            result: ResultPane::new(),
            active: false,
        }
    }

    pub fn current(&self) -> OuterTab {
        self.tabs.current()
    }

    pub fn query(&self) -> &QueryPane {
        &self.query
    }

    pub fn result(&self) -> &ResultPane {
        &self.result
    }

    pub(crate) fn query_mut(&mut self) -> &mut QueryPane {
        &mut self.query
    }

    pub(crate) fn result_mut(&mut self) -> &mut ResultPane {
        &mut self.result
    }

    fn pane(&self, tab: OuterTab) -> &dyn Component {
        match tab {
            OuterTab::Query => &self.query,
            OuterTab::Result => &self.result,
        }
    }

    fn pane_mut(&mut self, tab: OuterTab) -> &mut dyn Component {
        match tab {
            OuterTab::Query => &mut self.query,
            OuterTab::Result => &mut self.result,
        }
    }

    /// Shows `tab` and re-applies activation. The inner tab the pane had
    /// selected is kept.
    pub fn switch_to(&mut self, tab: OuterTab) {
        self.tabs.select(tab);
        debug!(tab = ?tab, "outer tab selected");
        self.set_active(self.active);
    }
}

impl Component for TabContainer {
    fn set_active(&mut self, active: bool) {
        for tab in OuterTab::ALL {
            self.pane_mut(*tab).set_active(false);
        }
        self.active = active;
        if active {
            self.pane_mut(self.current()).set_active(true);
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_size(&mut self, width: u16, height: u16) {
        let (_, rest) = split_tab_bar(Rect::new(0, 0, width, height));
        self.query.set_size(rest.width, rest.height);
        self.result.set_size(rest.width, rest.height);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if !self.active {
            return Outcome::Ignored;
        }
        self.pane_mut(self.current()).handle_key(key)
    }

    fn active_leaves(&self) -> usize {
        self.query.active_leaves() + self.result.active_leaves()
    }

    fn captures_input(&self) -> bool {
        self.active && self.pane(self.current()).captures_input()
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        let (bar, rest) = split_tab_bar(area);
        draw_tab_bar(f, bar, &self.tabs, self.active);
        self.pane(self.current()).draw(f, rest);
    }
}

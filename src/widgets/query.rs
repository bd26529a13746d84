use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, text::Span, Frame};
use tracing::debug;

use crate::layout::inner;

use super::{
    framed,
    tabs::{draw_tab_bar, split_tab_bar},
    title_style, AuthPane, Component, HeaderGrid, Outcome, ParamGrid, TabKind, TabSet, TextArea,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryTab {
    Params,
    Auth,
    Headers,
    Body,
}

impl TabKind for QueryTab {
    const ALL: &'static [Self] = &[
        QueryTab::Params,
        QueryTab::Auth,
        QueryTab::Headers,
        QueryTab::Body,
    ];

    fn title(self) -> &'static str {
        match self {
            QueryTab::Params => "Params",
            QueryTab::Auth => "Auth",
            QueryTab::Headers => "Headers",
            QueryTab::Body => "Body",
        }
    }
}

/// Area left for a pane's content once the tab strip and the border are
/// taken off.
pub(crate) fn pane_content(area: Rect) -> Rect {
    let (_, rest) = split_tab_bar(area);
    inner(rest)
}

/// Everything that goes into a request besides the method and the URL.
#[derive(Debug, Clone)]
pub struct QueryPane {
    tabs: TabSet<QueryTab>,
    params: ParamGrid,
    auth: AuthPane,
    headers: HeaderGrid,
    body: TextArea,
    active: bool,
}

impl Default for QueryPane {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryPane {
    pub fn new() -> Self {
        Self {
            tabs: TabSet::new(),
            params: ParamGrid::params(),
            auth: AuthPane::new(),
            headers: HeaderGrid::headers(),
            body: TextArea::new("Request body (JSON)"),
            active: false,
        }
    }

    pub fn current(&self) -> QueryTab {
        self.tabs.current()
    }

    pub fn params(&self) -> &ParamGrid {
        &self.params
    }

    pub fn auth(&self) -> &AuthPane {
        &self.auth
    }

    pub fn headers(&self) -> &HeaderGrid {
        &self.headers
    }

    pub fn body(&self) -> &TextArea {
        &self.body
    }

    /// Header grid values merged with the auth headers. Auth wins on a clash.
    pub fn request_headers(&self) -> BTreeMap<String, String> {
        let mut headers = self.headers.values();
        headers.extend(self.auth.headers());
        headers
    }

    fn child(&self, tab: QueryTab) -> &dyn Component {
        match tab {
            QueryTab::Params => &self.params,
            QueryTab::Auth => &self.auth,
            QueryTab::Headers => &self.headers,
            QueryTab::Body => &self.body,
        }
    }

    fn child_mut(&mut self, tab: QueryTab) -> &mut dyn Component {
        match tab {
            QueryTab::Params => &mut self.params,
            QueryTab::Auth => &mut self.auth,
            QueryTab::Headers => &mut self.headers,
            QueryTab::Body => &mut self.body,
        }
    }

    pub fn switch_to(&mut self, tab: QueryTab) {
        self.child_mut(self.current()).set_active(false);
        self.tabs.select(tab);
        debug!(tab = ?tab, "query tab selected");
        if self.active {
            self.child_mut(tab).set_active(true);
        }
    }

    pub fn next_tab(&mut self) {
        let mut tabs = self.tabs;
        self.switch_to(tabs.next());
    }

    pub fn prev_tab(&mut self) {
        let mut tabs = self.tabs;
        self.switch_to(tabs.prev());
    }
}

impl Component for QueryPane {
    fn set_active(&mut self, active: bool) {
        for tab in QueryTab::ALL {
            self.child_mut(*tab).set_active(false);
        }
        self.active = active;
        if active {
            self.child_mut(self.current()).set_active(true);
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_size(&mut self, width: u16, height: u16) {
        let content = pane_content(Rect::new(0, 0, width, height));
        for tab in QueryTab::ALL {
            self.child_mut(*tab).set_size(content.width, content.height);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if !self.active {
            return Outcome::Ignored;
        }
        if !self.child(self.current()).captures_input() {
            match key.code {
                KeyCode::Tab => {
                    self.next_tab();
                    return Outcome::Consumed;
                }
                KeyCode::BackTab => {
                    self.prev_tab();
                    return Outcome::Consumed;
                }
                _ => {}
            }
        }
        self.child_mut(self.current()).handle_key(key)
    }

    fn active_leaves(&self) -> usize {
        QueryTab::ALL
            .iter()
            .map(|tab| self.child(*tab).active_leaves())
            .sum()
    }

    fn captures_input(&self) -> bool {
        self.active && self.child(self.current()).captures_input()
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        let (bar, rest) = split_tab_bar(area);
        draw_tab_bar(f, bar, &self.tabs, self.active);
        if rest.width == 0 || rest.height == 0 {
            return;
        }
        let title = Span::styled(format!(" {} ", self.current().title()), title_style(self.active));
        f.render_widget(framed(title, self.active), rest);
        self.child(self.current()).draw(f, pane_content(area));
    }
}

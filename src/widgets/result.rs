use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, text::Span, Frame};
use tracing::debug;

use crate::client::HttpResponse;

use super::{
    framed,
    query::pane_content,
    tabs::{draw_tab_bar, split_tab_bar},
    title_style, Component, Outcome, TabKind, TabSet, Viewport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultTab {
    Headers,
    Body,
}

impl TabKind for ResultTab {
    const ALL: &'static [Self] = &[ResultTab::Headers, ResultTab::Body];

    fn title(self) -> &'static str {
        match self {
            ResultTab::Headers => "Headers",
            ResultTab::Body => "Body",
        }
    }
}

/// Response headers and body, each in its own scrollable viewport.
#[derive(Debug, Clone)]
pub struct ResultPane {
    tabs: TabSet<ResultTab>,
    headers: Viewport,
    body: Viewport,
    active: bool,
}

impl Default for ResultPane {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultPane {
    pub fn new() -> Self {
        Self {
            tabs: TabSet::new(),
            headers: Viewport::new("No response yet"),
            body: Viewport::new("No response yet"),
            active: false,
        }
    }

    pub fn current(&self) -> ResultTab {
        self.tabs.current()
    }

    pub fn headers(&self) -> &Viewport {
        &self.headers
    }

    pub fn body(&self) -> &Viewport {
        &self.body
    }

    /// Shows `response`. The body is displayed pretty-printed when it is
    /// JSON, but copying it yields the bytes the server sent.
    pub(crate) fn set_response(&mut self, response: &HttpResponse) {
        self.headers.set_content(response.headers_text());
        self.body
            .set_content_with_display(response.body.as_str(), &response.body_text());
    }

    fn child(&self, tab: ResultTab) -> &Viewport {
        match tab {
            ResultTab::Headers => &self.headers,
            ResultTab::Body => &self.body,
        }
    }

    fn child_mut(&mut self, tab: ResultTab) -> &mut Viewport {
        match tab {
            ResultTab::Headers => &mut self.headers,
            ResultTab::Body => &mut self.body,
        }
    }

    pub fn switch_to(&mut self, tab: ResultTab) {
        self.child_mut(self.current()).set_active(false);
        self.tabs.select(tab);
        debug!(tab = ?tab, "result tab selected");
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

impl Component for ResultPane {
    fn set_active(&mut self, active: bool) {
        self.headers.set_active(false);
        self.body.set_active(false);
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
        self.headers.set_size(content.width, content.height);
        self.body.set_size(content.width, content.height);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if !self.active {
            return Outcome::Ignored;
        }
        match key.code {
            KeyCode::Tab => self.next_tab(),
            KeyCode::BackTab => self.prev_tab(),
            _ => return self.child_mut(self.current()).handle_key(key),
        }
        Outcome::Consumed
    }

    fn active_leaves(&self) -> usize {
        self.headers.active_leaves() + self.body.active_leaves()
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        let (bar, rest) = split_tab_bar(area);
        draw_tab_bar(f, bar, &self.tabs, self.active);
        if rest.width == 0 || rest.height == 0 {
            return;
        }
        let viewport = self.child(self.current());
        let mut title = format!(" {} ", self.current().title());
        let position = viewport.position();
        if !position.is_empty() {
            title.push_str(&format!("[{position}] "));
        }
        if self.active {
            title.push_str("('y' to copy) ");
        }
        f.render_widget(
            framed(Span::styled(title, title_style(self.active)), self.active),
            rest,
        );
        viewport.draw(f, pane_content(area));
    }
}

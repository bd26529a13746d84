use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::{debug, info, warn};

use crate::client::{build_url, HttpResponse, RequestSpec};
use crate::keys::{global_action, is_ctrl_c, GlobalAction};
use crate::layout::{inner, ScreenLayout};
use crate::validate::{is_valid_json, is_valid_url};
use crate::widgets::{
    Component, Outcome, OuterTab, QueryTab, ResultTab, Selector, Spinner, SubmitButton,
    TabContainer, TextField, Toast,
};

pub const METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "PATCH"];

/// Which top-level widget holds focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootFocus {
    Method,
    Url,
    Submit,
    Tabs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
    RequestComplete(Result<HttpResponse, String>),
}

/// Work the app asks its host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Dispatch(RequestSpec),
    CopyToClipboard(String),
}

#[derive(Debug, Clone)]
pub struct App {
    method: Selector,
    url: TextField,
    submit: SubmitButton,
    tabs: TabContainer,
    toast: Toast,
    spinner: Spinner,
    focus: RootFocus,
    active: bool,
    in_flight: bool,
    layout: ScreenLayout,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Every widget starts zero-sized; focus starts on the URL field.
    pub fn new() -> Self {
        let mut app = Self {
            method: Selector::new(METHODS),
            url: TextField::new("Enter URL (https://...)"),
            submit: SubmitButton::new("Submit"),
            tabs: TabContainer::new(),
            toast: Toast::new(),
            spinner: Spinner::new(),
            focus: RootFocus::Url,
            active: false,
            in_flight: false,
            layout: ScreenLayout::default(),
        };
        app.set_active(true);
        app
    }

    pub fn focus(&self) -> RootFocus {
        self.focus
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    pub fn method(&self) -> &Selector {
        &self.method
    }

    pub fn url(&self) -> &TextField {
        &self.url
    }

    pub fn submit_button(&self) -> &SubmitButton {
        &self.submit
    }

    pub fn tabs(&self) -> &TabContainer {
        &self.tabs
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    /// How long until the next animation tick is wanted, if at all.
    pub fn tick_interval(&self) -> Option<Duration> {
        self.spinner.tick_interval()
    }

    pub fn set_url(&mut self, url: &str) {
        self.url.set_value(url);
    }

    /// Selects `method` in the method dropdown, ignoring case.
    pub fn select_method(&mut self, method: &str) -> bool {
        self.method.select_value(method)
    }

    /// Active leaves in the whole tree.
    pub fn active_leaves(&self) -> usize {
        self.children().iter().map(|c| c.active_leaves()).sum()
    }

    fn children(&self) -> [&dyn Component; 4] {
        [&self.method, &self.url, &self.submit, &self.tabs]
    }

    fn child_mut(&mut self, focus: RootFocus) -> &mut dyn Component {
        match focus {
            RootFocus::Method => &mut self.method,
            RootFocus::Url => &mut self.url,
            RootFocus::Submit => &mut self.submit,
            RootFocus::Tabs => &mut self.tabs,
        }
    }

    fn child(&self, focus: RootFocus) -> &dyn Component {
        match focus {
            RootFocus::Method => &self.method,
            RootFocus::Url => &self.url,
            RootFocus::Submit => &self.submit,
            RootFocus::Tabs => &self.tabs,
        }
    }

    /// Deactivates every top-level widget, then reactivates the focused one
    /// when `active` is true.
    pub fn set_active(&mut self, active: bool) {
        for focus in [
            RootFocus::Method,
            RootFocus::Url,
            RootFocus::Submit,
            RootFocus::Tabs,
        ] {
            self.child_mut(focus).set_active(false);
        }
        self.active = active;
        if active {
            self.child_mut(self.focus).set_active(true);
        }
    }

    pub fn focus_on(&mut self, focus: RootFocus) {
        debug!(from = ?self.focus, to = ?focus, "focus moved");
        self.focus = focus;
        self.set_active(true);
    }

    fn focus_tab(&mut self, tab: OuterTab) {
        self.tabs.switch_to(tab);
        self.focus_on(RootFocus::Tabs);
    }

    fn captures_input(&self) -> bool {
        self.active && self.child(self.focus).captures_input()
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Option<Command> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize(width, height) => {
                self.resize(width, height);
                None
            }
            AppEvent::Tick => {
                self.spinner.tick();
                None
            }
            AppEvent::RequestComplete(result) => {
                self.complete_request(result);
                None
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if self.toast.is_visible() {
            if is_ctrl_c(&key) {
                return Some(Command::Quit);
            }
            if key.code == KeyCode::Enter {
                self.toast.hide();
                self.url.cursor_end();
                self.focus_on(RootFocus::Url);
            }
            return None;
        }

        match global_action(&key) {
            // An open dropdown closes on esc instead of quitting.
            Some(GlobalAction::Quit) if key.code == KeyCode::Esc && self.captures_input() => {}
            Some(GlobalAction::Quit) => return Some(Command::Quit),
            Some(GlobalAction::FocusMethod) => {
                self.focus_on(RootFocus::Method);
                return None;
            }
            Some(GlobalAction::FocusUrl) => {
                self.focus_on(RootFocus::Url);
                return None;
            }
            Some(GlobalAction::FocusQuery) => {
                self.focus_tab(OuterTab::Query);
                return None;
            }
            Some(GlobalAction::FocusResult) => {
                self.focus_tab(OuterTab::Result);
                return None;
            }
            Some(GlobalAction::Submit) => return self.submit(),
            None => {}
        }

        if !self.active {
            return None;
        }

        let outcome = match (self.focus, key.code) {
            (RootFocus::Url, KeyCode::Enter) => Outcome::Submit,
            (focus, _) => self.child_mut(focus).handle_key(key),
        };
        match outcome {
            Outcome::Submit => self.submit(),
            Outcome::Copy(text) => Some(Command::CopyToClipboard(text)),
            Outcome::Ignored | Outcome::Consumed => None,
        }
    }

    /// Recomputes the layout and hands every widget its new size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = ScreenLayout::compute(width, height);
        let method = inner(self.layout.method);
        let url = inner(self.layout.url);
        let submit = inner(self.layout.submit);
        self.method.set_size(method.width, method.height);
        self.url.set_size(url.width, url.height);
        self.submit.set_size(submit.width, submit.height);
        self.tabs.set_size(self.layout.tabs.width, self.layout.tabs.height);
    }

    /// Validates the form and, when it is sound, returns the request to send.
    pub fn submit(&mut self) -> Option<Command> {
        if self.in_flight {
            warn!("submit ignored, a request is already in flight");
            return None;
        }

        let raw_url = self.url.value().to_string();
        if !is_valid_url(&raw_url) {
            self.toast.show(format!("Invalid URL: {raw_url}"));
            self.focus_on(RootFocus::Url);
            return None;
        }

        let body = self.tabs.query().body().text();
        if !is_valid_json(&body) {
            self.toast.show("Body is not valid JSON");
            self.tabs.query_mut().switch_to(QueryTab::Body);
            self.focus_tab(OuterTab::Query);
            return None;
        }

        let url = match build_url(&raw_url, &self.tabs.query().params().values()) {
            Ok(url) => url,
            Err(err) => {
                self.toast.show(format!("Error building URL: {err:#}"));
                self.focus_on(RootFocus::Url);
                return None;
            }
        };

        let spec = RequestSpec {
            method: self.method.selected().to_string(),
            url,
            headers: self.tabs.query().request_headers(),
            body: (!body.is_empty()).then_some(body),
        };
        debug!(
            request = %serde_json::to_string(&spec).unwrap_or_default(),
            "dispatching request"
        );

        self.in_flight = true;
        self.spinner.show("Sending request...");
        self.set_active(false);
        Some(Command::Dispatch(spec))
    }

    /// Applies the single completion event of a dispatched request.
    pub fn complete_request(&mut self, result: Result<HttpResponse, String>) {
        self.in_flight = false;
        self.spinner.hide();
        match result {
            Ok(response) => {
                info!(status = %response.status, "request completed");
                self.tabs.result_mut().set_response(&response);
                self.tabs.result_mut().switch_to(ResultTab::Headers);
                self.focus_tab(OuterTab::Result);
            }
            Err(err) => {
                warn!(error = %err, "request failed");
                self.toast.show(format!("Error: {err}"));
                self.focus_on(RootFocus::Url);
            }
        }
    }
}

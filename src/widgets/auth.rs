use base64::{engine::general_purpose::STANDARD, Engine as _};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::debug;

use super::{
    draw_overlay, framed, title_style, Component, InlineView, Outcome, Selector, TextField,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    None,
    Basic,
    Bearer,
    Jwt,
    OAuth2,
    ApiKey,
}

impl AuthKind {
    pub const ALL: [AuthKind; 6] = [
        AuthKind::None,
        AuthKind::Basic,
        AuthKind::Bearer,
        AuthKind::Jwt,
        AuthKind::OAuth2,
        AuthKind::ApiKey,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AuthKind::None => "None",
            AuthKind::Basic => "Basic",
            AuthKind::Bearer => "Bearer",
            AuthKind::Jwt => "JWT",
            AuthKind::OAuth2 => "OAuth2",
            AuthKind::ApiKey => "API Key",
        }
    }
}

/// A vertical list of labelled text fields; one of them has focus.
#[derive(Debug, Clone)]
pub struct FieldStack {
    fields: Vec<(&'static str, TextField)>,
    focused: usize,
    active: bool,
}

impl FieldStack {
    pub fn new(fields: Vec<(&'static str, TextField)>) -> Self {
        Self {
            fields,
            focused: 0,
            active: false,
        }
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|(_, field)| field.value())
            .unwrap_or("")
    }

    fn label_width(&self) -> usize {
        self.fields
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0)
            + 2
    }

    fn focus(&mut self, index: usize) {
        self.focused = index;
        self.set_active(self.active);
    }
}

impl Component for FieldStack {
    fn set_active(&mut self, active: bool) {
        for (_, field) in &mut self.fields {
            field.set_active(false);
        }
        self.active = active;
        if active {
            if let Some((_, field)) = self.fields.get_mut(self.focused) {
                field.set_active(true);
            }
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_size(&mut self, width: u16, _height: u16) {
        let field_width = width.saturating_sub(self.label_width() as u16);
        for (_, field) in &mut self.fields {
            field.set_size(field_width, 1);
        }
    }

    /// `up` on the first field is left for the owner.
    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if !self.active || self.fields.is_empty() {
            return Outcome::Ignored;
        }
        match key.code {
            KeyCode::Up if self.focused == 0 => Outcome::Ignored,
            KeyCode::Up => {
                self.focus(self.focused - 1);
                Outcome::Consumed
            }
            KeyCode::Down | KeyCode::Enter => {
                if self.focused + 1 < self.fields.len() {
                    self.focus(self.focused + 1);
                }
                Outcome::Consumed
            }
            _ => self.fields[self.focused].1.handle_key(key),
        }
    }

    fn active_leaves(&self) -> usize {
        self.fields.iter().map(|(_, field)| field.active_leaves()).sum()
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        let label_width = self.label_width();
        let field_width = area.width.saturating_sub(label_width as u16);
        let mut lines = Vec::new();
        for (i, (label, field)) in self.fields.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            let mut spans = vec![Span::styled(
                format!("{:<label_width$}", format!("{label}:")),
                title_style(self.active && i == self.focused),
            )];
            spans.extend(field.inline(field_width).spans);
            lines.push(Line::from(spans));
        }
        f.render_widget(Paragraph::new(lines), area);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthFocus {
    Selector,
    Details,
}

/// Height of the bordered auth-type box.
const SELECTOR_HEIGHT: u16 = 3;
const SELECTOR_WIDTH: u16 = 30;

/// Auth type selector plus the detail form the selected type implies.
#[derive(Debug, Clone)]
pub struct AuthPane {
    selector: Selector,
    basic: FieldStack,
    bearer: FieldStack,
    jwt: FieldStack,
    oauth2: FieldStack,
    api_key: FieldStack,
    focus: AuthFocus,
    active: bool,
}

impl Default for AuthPane {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthPane {
    pub fn new() -> Self {
        Self {
            selector: Selector::new(AuthKind::ALL.iter().map(|kind| kind.label())),
            basic: FieldStack::new(vec![
                ("Username", TextField::new("username")),
                ("Password", TextField::new("password").masked()),
            ]),
            bearer: FieldStack::new(vec![("Token", TextField::new("bearer token"))]),
            jwt: FieldStack::new(vec![("Token", TextField::new("JSON web token"))]),
            oauth2: FieldStack::new(vec![("Access token", TextField::new("access token"))]),
            api_key: FieldStack::new(vec![
                ("Header", TextField::new("X-Api-Key")),
                ("Value", TextField::new("key")),
            ]),
            focus: AuthFocus::Selector,
            active: false,
        }
    }

    pub fn kind(&self) -> AuthKind {
        AuthKind::ALL
            .get(self.selector.selected_index())
            .copied()
            .unwrap_or(AuthKind::None)
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// True while a detail field, not the selector, has focus.
    pub fn details_focused(&self) -> bool {
        self.focus == AuthFocus::Details
    }

    pub fn details(&self) -> Option<&FieldStack> {
        match self.kind() {
            AuthKind::None => None,
            AuthKind::Basic => Some(&self.basic),
            AuthKind::Bearer => Some(&self.bearer),
            AuthKind::Jwt => Some(&self.jwt),
            AuthKind::OAuth2 => Some(&self.oauth2),
            AuthKind::ApiKey => Some(&self.api_key),
        }
    }

    fn details_mut(&mut self) -> Option<&mut FieldStack> {
        match self.kind() {
            AuthKind::None => None,
            AuthKind::Basic => Some(&mut self.basic),
            AuthKind::Bearer => Some(&mut self.bearer),
            AuthKind::Jwt => Some(&mut self.jwt),
            AuthKind::OAuth2 => Some(&mut self.oauth2),
            AuthKind::ApiKey => Some(&mut self.api_key),
        }
    }

    fn stacks_mut(&mut self) -> [&mut FieldStack; 5] {
        [
            &mut self.basic,
            &mut self.bearer,
            &mut self.jwt,
            &mut self.oauth2,
            &mut self.api_key,
        ]
    }

    fn focus_on(&mut self, focus: AuthFocus) {
        self.focus = focus;
        debug!(focus = ?focus, "auth focus moved");
        self.set_active(self.active);
    }

    /// Headers implied by the selected auth type and its form.
    pub fn headers(&self) -> Vec<(String, String)> {
        let bearer = |token: &str| {
            if token.is_empty() {
                Vec::new()
            } else {
                vec![("Authorization".to_string(), format!("Bearer {token}"))]
            }
        };
        match self.kind() {
            AuthKind::None => Vec::new(),
            AuthKind::Basic => {
                let user = self.basic.value(0);
                let pass = self.basic.value(1);
                if user.is_empty() && pass.is_empty() {
                    return Vec::new();
                }
                let encoded = STANDARD.encode(format!("{user}:{pass}"));
                vec![("Authorization".to_string(), format!("Basic {encoded}"))]
            }
            AuthKind::Bearer => bearer(self.bearer.value(0)),
            AuthKind::Jwt => bearer(self.jwt.value(0)),
            AuthKind::OAuth2 => bearer(self.oauth2.value(0)),
            AuthKind::ApiKey => {
                let name = self.api_key.value(0).trim();
                let value = self.api_key.value(1);
                if name.is_empty() || value.is_empty() {
                    Vec::new()
                } else {
                    vec![(name.to_string(), value.to_string())]
                }
            }
        }
    }
}

impl Component for AuthPane {
    fn set_active(&mut self, active: bool) {
        self.selector.set_active(false);
        for stack in self.stacks_mut() {
            stack.set_active(false);
        }
        self.active = active;
        if !active {
            return;
        }
        if self.focus == AuthFocus::Details {
            if let Some(details) = self.details_mut() {
                details.set_active(true);
                return;
            }
            self.focus = AuthFocus::Selector;
        }
        self.selector.set_active(true);
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_size(&mut self, width: u16, height: u16) {
        self.selector
            .set_size(width.min(SELECTOR_WIDTH).saturating_sub(2), 1);
        let rest = height.saturating_sub(SELECTOR_HEIGHT + 1);
        for stack in self.stacks_mut() {
            stack.set_size(width, rest);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        if !self.active {
            return Outcome::Ignored;
        }
        match self.focus {
            AuthFocus::Selector => {
                if key.code == KeyCode::Down
                    && !self.selector.is_open()
                    && self.details().is_some()
                {
                    self.focus_on(AuthFocus::Details);
                    return Outcome::Consumed;
                }
                self.selector.handle_key(key)
            }
            AuthFocus::Details => {
                let outcome = match self.details_mut() {
                    Some(details) => details.handle_key(key),
                    None => Outcome::Ignored,
                };
                if outcome.is_ignored() && key.code == KeyCode::Up {
                    self.focus_on(AuthFocus::Selector);
                    return Outcome::Consumed;
                }
                outcome
            }
        }
    }

    fn active_leaves(&self) -> usize {
        self.selector.active_leaves()
            + [
                &self.basic,
                &self.bearer,
                &self.jwt,
                &self.oauth2,
                &self.api_key,
            ]
            .iter()
            .map(|stack| stack.active_leaves())
            .sum::<usize>()
    }

    fn captures_input(&self) -> bool {
        self.active && self.selector.captures_input()
    }

    fn draw(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let selector_active = self.active && self.focus == AuthFocus::Selector;
        let selector_area = crate::layout::clip(
            Rect::new(area.x, area.y, area.width.min(SELECTOR_WIDTH), SELECTOR_HEIGHT),
            area,
        );
        let block = framed(
            Span::styled(" Auth type ", title_style(selector_active)),
            selector_active,
        );
        let inner = block.inner(selector_area);
        f.render_widget(block, selector_area);
        self.selector.draw(f, inner);

        let details_area = crate::layout::clip(
            Rect::new(
                area.x,
                area.y.saturating_add(SELECTOR_HEIGHT + 1),
                area.width,
                area.height.saturating_sub(SELECTOR_HEIGHT + 1),
            ),
            area,
        );
        match self.details() {
            Some(details) => details.draw(f, details_area),
            None => f.render_widget(
                Paragraph::new("This request does not use any authorization.")
                    .style(Style::default().fg(Color::DarkGray)),
                details_area,
            ),
        }

        if let Some(overlay) = self.selector.overlay() {
            draw_overlay(f, inner, area, overlay);
        }
    }
}

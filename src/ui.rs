use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, RootFocus};
use crate::layout::{inner, ScreenLayout};
use crate::widgets::{
    framed, title_style, AuthPane, Component, OuterTab, QueryTab, ResultTab,
};

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.size();
    if area.width == 0 || area.height == 0 {
        return;
    }
    // Draw from the current frame size; the app's cached layout may lag a
    // resize by one event.
    let layout = ScreenLayout::compute(area.width, area.height);

    draw_header(f, layout.header, app);
    draw_request_bar(f, &layout, app);
    app.tabs().draw(f, layout.tabs);
    draw_footer(f, layout.footer, app);

    if app.method().is_open() {
        app.method()
            .draw_dropdown(f, inner(layout.method), layout.screen);
    }
    app.spinner().draw(f, inner(layout.url));
    app.toast().draw(f, layout.screen);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let (status, status_color) = if app.is_busy() {
        ("SENDING", Color::Yellow)
    } else {
        ("READY", Color::Green)
    };

    let header_text = vec![Line::from(vec![
        Span::raw("LazyPost | Status: "),
        Span::styled(
            status,
            Style::default()
                .fg(status_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" | Method: {}", app.method().selected())),
    ])];

    let header =
        Paragraph::new(header_text).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(header, area);
}

fn draw_request_bar(f: &mut Frame, layout: &ScreenLayout, app: &App) {
    let boxes: [(&str, RootFocus, Rect, &dyn Component); 3] = [
        ("(Alt+1) Method", RootFocus::Method, layout.method, app.method()),
        ("(Alt+2) URL", RootFocus::Url, layout.url, app.url()),
        ("(Alt+5)", RootFocus::Submit, layout.submit, app.submit_button()),
    ];
    for (title, focus, area, widget) in boxes {
        if area.width == 0 || area.height == 0 {
            continue;
        }
        let active = widget.is_active();
        let focused_style = if app.focus() == focus {
            title_style(active)
        } else {
            title_style(false)
        };
        f.render_widget(framed(Span::styled(title, focused_style), active), area);
        widget.draw(f, inner(area));
    }
}

fn key(text: &'static str) -> Span<'static> {
    Span::styled(
        text,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let mut footer_spans = vec![
        key("esc/^c"),
        Span::raw(" quit | "),
        key("alt+1..5"),
        Span::raw(" focus | "),
    ];

    // Show context-specific controls
    match app.focus() {
        RootFocus::Method => footer_spans.extend(vec![
            key("enter"),
            Span::raw(" open/select | "),
            key("↑↓"),
            Span::raw(" choose"),
        ]),
        RootFocus::Url => footer_spans.extend(vec![key("enter"), Span::raw(" send request")]),
        RootFocus::Submit => footer_spans.extend(vec![key("enter"), Span::raw(" send request")]),
        RootFocus::Tabs => {
            footer_spans.extend(vec![key("tab/shift+tab"), Span::raw(" switch tab | ")]);
            footer_spans.extend(tab_controls(app));
        }
    }

    let footer = Paragraph::new(vec![Line::from(footer_spans)])
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    f.render_widget(footer, area);
}

fn tab_controls(app: &App) -> Vec<Span<'static>> {
    let tabs = app.tabs();
    match tabs.current() {
        OuterTab::Query => match tabs.query().current() {
            QueryTab::Params => vec![key("←↑↓→"), Span::raw(" move between cells")],
            QueryTab::Headers => vec![
                key("←↑↓→"),
                Span::raw(" move | "),
                key("enter"),
                Span::raw(" pick header"),
            ],
            QueryTab::Auth => auth_controls(tabs.query().auth()),
            QueryTab::Body => vec![key("enter"), Span::raw(" new line")],
        },
        OuterTab::Result => {
            let what = match tabs.result().current() {
                ResultTab::Headers => " copy headers",
                ResultTab::Body => " copy body",
            };
            vec![
                key("j/k/^d/^u/g/G"),
                Span::raw(" scroll | "),
                key("y"),
                Span::raw(what),
            ]
        }
    }
}

fn auth_controls(auth: &AuthPane) -> Vec<Span<'static>> {
    if auth.details_focused() {
        vec![key("↑↓"), Span::raw(" move between fields")]
    } else {
        vec![
            key("enter"),
            Span::raw(" choose auth type | "),
            key("↓"),
            Span::raw(" edit details"),
        ]
    }
}

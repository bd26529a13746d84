use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use lazypost::widgets::viewport::wrap;
use lazypost::widgets::*;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn press(widget: &mut dyn Component, codes: &[KeyCode]) {
    for code in codes {
        widget.handle_key(key(*code));
    }
}

fn type_into(widget: &mut dyn Component, text: &str) {
    for c in text.chars() {
        widget.handle_key(key(KeyCode::Char(c)));
    }
}

// Selector

#[test]
fn test_selector_open_next_next_select() {
    let mut selector = Selector::new(["GET", "POST", "PUT"]);
    selector.set_active(true);

    press(
        &mut selector,
        &[KeyCode::Enter, KeyCode::Down, KeyCode::Down, KeyCode::Enter],
    );

    assert_eq!(selector.selected_index(), 2);
    assert_eq!(selector.state(), SelectorState::Closed);
    assert_eq!(selector.selected(), "PUT");
}

#[test]
fn test_selector_close_does_not_commit() {
    let mut selector = Selector::new(["GET", "POST", "PUT"]);
    selector.set_active(true);

    press(&mut selector, &[KeyCode::Enter, KeyCode::Down]);
    assert_eq!(selector.highlighted_index(), 1);
    press(&mut selector, &[KeyCode::Esc]);

    assert_eq!(selector.selected_index(), 0);
    assert_eq!(selector.highlighted_index(), 0);
    assert!(!selector.is_open());
}

#[test]
fn test_selector_highlight_wraps() {
    let mut selector = Selector::new(["GET", "POST", "PUT"]);
    selector.set_active(true);

    press(&mut selector, &[KeyCode::Enter, KeyCode::Up]);
    assert_eq!(selector.highlighted_index(), 2);

    press(&mut selector, &[KeyCode::Char('j')]);
    assert_eq!(selector.highlighted_index(), 0);
}

#[test]
fn test_selector_single_option_stays_in_range() {
    let mut selector = Selector::new(["ONLY"]);
    selector.set_active(true);

    press(&mut selector, &[KeyCode::Enter, KeyCode::Down, KeyCode::Up, KeyCode::Down]);
    assert_eq!(selector.highlighted_index(), 0);
    press(&mut selector, &[KeyCode::Enter]);
    assert_eq!(selector.selected_index(), 0);
}

#[test]
fn test_inactive_selector_ignores_input() {
    let mut selector = Selector::new(["GET", "POST"]);

    assert_eq!(selector.handle_key(key(KeyCode::Enter)), Outcome::Ignored);
    assert!(!selector.is_open());
}

#[test]
fn test_open_selector_captures_everything() {
    let mut selector = Selector::new(["GET", "POST"]);
    selector.set_active(true);
    assert_eq!(selector.handle_key(key(KeyCode::Char('x'))), Outcome::Ignored);

    selector.handle_key(key(KeyCode::Enter));

    assert!(selector.captures_input());
    assert_eq!(selector.handle_key(key(KeyCode::Char('x'))), Outcome::Consumed);
    assert!(selector.is_open());
}

#[test]
fn test_deactivating_selector_closes_it() {
    let mut selector = Selector::new(["GET", "POST"]);
    selector.set_active(true);
    press(&mut selector, &[KeyCode::Enter, KeyCode::Down]);

    selector.set_active(false);

    assert!(!selector.is_open());
    assert_eq!(selector.selected_index(), 0);
    assert_eq!(selector.highlighted_index(), 0);
}

#[test]
fn test_empty_selector_gets_a_placeholder_option() {
    let selector = Selector::new(Vec::<String>::new());

    assert_eq!(selector.options().len(), 1);
    assert_eq!(selector.selected(), "");
}

// Row grid

#[test]
fn test_grid_scrolls_to_follow_focus() {
    let mut grid = ParamGrid::params();
    grid.set_size(80, 6);
    grid.set_active(true);
    assert_eq!(grid.visible_rows(), 3);

    for _ in 0..5 {
        grid.handle_key(key(KeyCode::Down));
    }

    assert_eq!(grid.cursor(), (5, 0));
    assert_eq!(grid.scroll_offset(), 3);
}

#[test]
fn test_grid_visible_rows_derivation() {
    let mut grid = ParamGrid::params();

    // Zero-sized: nothing fits
    assert_eq!(grid.visible_rows(), 0);

    grid.set_size(80, 2);
    assert_eq!(grid.visible_rows(), 0);

    // Exactly enough for every row: no indicator line
    grid.set_size(80, 8);
    assert_eq!(grid.visible_rows(), 6);
    assert!(!grid.has_more_rows());

    // One short: the indicator takes a further line
    grid.set_size(80, 7);
    assert_eq!(grid.visible_rows(), 4);

    grid.set_size(80, 100);
    assert_eq!(grid.visible_rows(), 6);

    let mut headers = HeaderGrid::headers();
    headers.set_size(80, 11);
    assert_eq!(headers.visible_rows(), 9);
    headers.set_size(80, 10);
    assert_eq!(headers.visible_rows(), 7);
}

#[test]
fn test_grid_edge_clamps() {
    let mut grid = ParamGrid::params();
    grid.set_size(80, 20);
    grid.set_active(true);

    grid.handle_key(key(KeyCode::Up));
    assert_eq!(grid.cursor(), (0, 0));
    grid.handle_key(key(KeyCode::Left));
    assert_eq!(grid.cursor(), (0, 0));

    for _ in 0..10 {
        grid.handle_key(key(KeyCode::Down));
    }
    assert_eq!(grid.cursor(), (5, 0));

    grid.handle_key(key(KeyCode::Right));
    assert_eq!(grid.cursor(), (5, 1));
    grid.handle_key(key(KeyCode::Right));
    assert_eq!(grid.cursor(), (5, 1));
}

#[test]
fn test_grid_horizontal_moves_follow_reading_order() {
    let mut grid = ParamGrid::params();
    grid.set_size(80, 20);
    grid.set_active(true);

    grid.handle_key(key(KeyCode::Right));
    assert_eq!(grid.cursor(), (0, 1));
    grid.handle_key(key(KeyCode::Right));
    assert_eq!(grid.cursor(), (1, 0));
    grid.handle_key(key(KeyCode::Left));
    assert_eq!(grid.cursor(), (0, 1));
    grid.handle_key(key(KeyCode::Left));
    assert_eq!(grid.cursor(), (0, 0));
}

#[test]
fn test_grid_window_invariant_holds_under_navigation() {
    let moves = [
        KeyCode::Down,
        KeyCode::Down,
        KeyCode::Right,
        KeyCode::Right,
        KeyCode::Down,
        KeyCode::Right,
        KeyCode::Down,
        KeyCode::Down,
        KeyCode::Up,
        KeyCode::Left,
        KeyCode::Left,
        KeyCode::Up,
        KeyCode::Up,
        KeyCode::Up,
        KeyCode::Right,
        KeyCode::Down,
    ];

    for height in 4..12 {
        let mut grid = HeaderGrid::headers();
        grid.set_size(80, height);
        grid.set_active(true);
        let total = grid.row_count();

        for code in moves {
            grid.handle_key(key(code));
            let visible = grid.visible_rows();
            let (row, _) = grid.cursor();
            let offset = grid.scroll_offset();
            assert!(visible > 0);
            assert!(offset <= row && row < offset + visible, "height {height}");
            assert!(offset <= total.saturating_sub(visible), "height {height}");
        }
    }
}

#[test]
fn test_grid_resize_keeps_focus_visible() {
    let mut grid = ParamGrid::params();
    grid.set_size(80, 20);
    grid.set_active(true);
    for _ in 0..5 {
        grid.handle_key(key(KeyCode::Down));
    }
    assert_eq!(grid.scroll_offset(), 0);

    grid.set_size(80, 5);

    // visible = 5 - 2 - 1 = 2, so row 5 needs offset 4
    assert_eq!(grid.visible_rows(), 2);
    assert_eq!(grid.cursor(), (5, 0));
    assert_eq!(grid.scroll_offset(), 4);
}

#[test]
fn test_grid_column_widths() {
    let mut grid = ParamGrid::params();

    // Wide enough for two ideal columns (2 x 37) plus the gap
    grid.set_size(80, 10);
    assert_eq!(grid.column_widths(), (37, 37));
    grid.set_size(75, 10);
    assert_eq!(grid.column_widths(), (37, 37));

    // One short: split what is available
    grid.set_size(74, 10);
    assert_eq!(grid.column_widths(), (36, 37));

    grid.set_size(0, 10);
    assert_eq!(grid.column_widths(), (0, 0));
    grid.set_size(1, 10);
    assert_eq!(grid.column_widths(), (0, 0));

    for width in 1..75u16 {
        grid.set_size(width, 10);
        let (left, right) = grid.column_widths();
        assert_eq!(left + right, width - 1, "width {width}");
        assert!(right >= left);
    }
}

#[test]
fn test_grid_rows_are_sized_like_the_grid_columns() {
    let mut grid = ParamGrid::params();

    for width in [0u16, 1, 30, 74, 80] {
        grid.set_size(width, 10);
        let (left, right) = grid.column_widths();
        for index in 0..grid.row_count() {
            let row = grid.row(index).unwrap();
            assert_eq!(row.widths(), (left, right), "width {width}");
            assert_eq!(row.first().width(), left.saturating_sub(2));
            assert_eq!(row.second().width(), right.saturating_sub(2));
        }
    }
}

#[test]
fn test_param_values_trim_and_skip_blank_keys() {
    let mut grid = ParamGrid::params();
    grid.set_size(80, 20);
    grid.set_active(true);

    type_into(&mut grid, "  q ");
    grid.handle_key(key(KeyCode::Right));
    type_into(&mut grid, " rust ");
    // Row 1 has a value but no key
    grid.handle_key(key(KeyCode::Down));
    type_into(&mut grid, "orphan");

    let values = grid.values();
    assert_eq!(values.len(), 1);
    assert_eq!(values.get("q").map(String::as_str), Some("rust"));
}

#[test]
fn test_header_values_skip_empty_names() {
    let mut grid = HeaderGrid::headers();
    grid.set_size(80, 20);
    grid.set_active(true);
    assert!(grid.values().is_empty());

    // Open the name list, move to Content-Type and commit
    grid.handle_key(key(KeyCode::Enter));
    assert!(grid.captures_input());
    for _ in 0..7 {
        grid.handle_key(key(KeyCode::Down));
    }
    // Arrows went to the list, not the grid
    assert_eq!(grid.cursor(), (0, 0));
    grid.handle_key(key(KeyCode::Enter));
    assert!(!grid.captures_input());
    assert_eq!(grid.row(0).map(|r| r.first().selected()), Some("Content-Type"));

    grid.handle_key(key(KeyCode::Right));
    type_into(&mut grid, "application/json");

    let values = grid.values();
    assert_eq!(values.len(), 1);
    assert_eq!(
        values.get("Content-Type").map(String::as_str),
        Some("application/json")
    );
}

#[test]
fn test_grid_has_one_active_cell() {
    let mut grid = HeaderGrid::headers();
    grid.set_size(80, 20);
    assert_eq!(grid.active_leaves(), 0);

    grid.set_active(true);
    assert_eq!(grid.active_leaves(), 1);
    grid.handle_key(key(KeyCode::Right));
    grid.handle_key(key(KeyCode::Down));
    assert_eq!(grid.active_leaves(), 1);
    assert!(grid.row(1).map(|r| r.second().is_active()).unwrap_or(false));

    grid.set_active(false);
    assert_eq!(grid.active_leaves(), 0);
}

// Viewport

#[test]
fn test_wrap_long_line_into_chunks() {
    let line = "a".repeat(200);

    let wrapped = wrap(&line, 50);

    let chunks: Vec<&str> = wrapped.split('\n').collect();
    assert_eq!(chunks.len(), 4);
    assert!(chunks.iter().all(|c| c.chars().count() <= 50));
    assert_eq!(chunks.concat().len(), 200);
}

#[test]
fn test_wrap_is_idempotent() {
    let samples = [
        String::new(),
        "short".to_string(),
        "x".repeat(10),
        "x".repeat(11),
        format!("{}\n\n{}", "y".repeat(23), "z".repeat(7)),
        "héllo wörld ünïcode".repeat(3),
        "\n\n\n".to_string(),
    ];
    for sample in &samples {
        for width in 1..15 {
            let once = wrap(sample, width);
            assert_eq!(wrap(&once, width), once, "{sample:?} at {width}");
        }
    }
}

#[test]
fn test_wrap_keeps_empty_lines_and_zero_width() {
    assert_eq!(wrap("ab\n\ncd", 1), "a\nb\n\nc\nd");
    assert_eq!(wrap("abcdef", 0), "abcdef");
}

#[test]
fn test_viewport_keeps_raw_content() {
    let mut viewport = Viewport::new("");
    viewport.set_size(50, 10);
    viewport.set_content("a".repeat(200));

    assert_eq!(viewport.total_lines(), 4);
    assert_eq!(viewport.raw_content(), "a".repeat(200));
    assert_eq!(viewport.wrapped_content().matches('\n').count(), 3);
}

#[test]
fn test_viewport_navigation_is_clamped() {
    let content: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
    let mut viewport = Viewport::new(content.join("\n"));
    viewport.set_size(80, 10);
    viewport.set_active(true);

    viewport.handle_key(key(KeyCode::Char('G')));
    assert_eq!(viewport.offset(), 90);
    viewport.handle_key(key(KeyCode::Char('j')));
    assert_eq!(viewport.offset(), 90);

    viewport.handle_key(key(KeyCode::Char('g')));
    assert_eq!(viewport.offset(), 0);
    viewport.handle_key(key(KeyCode::Up));
    assert_eq!(viewport.offset(), 0);

    viewport.handle_key(ctrl('d'));
    assert_eq!(viewport.offset(), 5);
    viewport.handle_key(key(KeyCode::PageDown));
    assert_eq!(viewport.offset(), 15);
    viewport.handle_key(ctrl('u'));
    assert_eq!(viewport.offset(), 10);
    viewport.handle_key(key(KeyCode::PageUp));
    assert_eq!(viewport.offset(), 0);
    viewport.handle_key(key(KeyCode::End));
    assert_eq!(viewport.offset(), 90);
    viewport.handle_key(key(KeyCode::Home));
    assert_eq!(viewport.offset(), 0);
}

#[test]
fn test_viewport_short_content_does_not_scroll() {
    let mut viewport = Viewport::new("one\ntwo");
    viewport.set_size(80, 10);
    viewport.set_active(true);

    viewport.handle_key(key(KeyCode::Down));
    viewport.handle_key(key(KeyCode::End));

    assert_eq!(viewport.offset(), 0);
}

#[test]
fn test_viewport_resize_rewraps_and_clamps() {
    let mut viewport = Viewport::new("");
    viewport.set_size(50, 2);
    viewport.set_content("a".repeat(200));
    viewport.set_active(true);
    viewport.handle_key(key(KeyCode::End));
    assert_eq!(viewport.offset(), 2);

    // Narrower: more lines, offset kept
    viewport.set_size(25, 2);
    assert_eq!(viewport.total_lines(), 8);
    assert_eq!(viewport.offset(), 2);

    // Taller than the content: offset clamps back to the top
    viewport.set_size(25, 20);
    assert_eq!(viewport.offset(), 0);
    assert_eq!(viewport.raw_content().len(), 200);
}

#[test]
fn test_viewport_copy_uses_raw_content() {
    let raw = "x".repeat(120);
    let mut viewport = Viewport::new(raw.clone());
    viewport.set_size(40, 5);
    viewport.set_active(true);

    assert_eq!(viewport.handle_key(key(KeyCode::Char('y'))), Outcome::Copy(raw));
}

#[test]
fn test_inactive_viewport_ignores_keys() {
    let mut viewport = Viewport::new("a\nb\nc");
    viewport.set_size(10, 1);

    assert_eq!(viewport.handle_key(key(KeyCode::Down)), Outcome::Ignored);
    assert_eq!(viewport.offset(), 0);
}

// Text input

#[test]
fn test_text_field_editing() {
    let mut field = TextField::new("url");
    field.set_active(true);

    type_into(&mut field, "helo");
    field.handle_key(key(KeyCode::Left));
    type_into(&mut field, "l");
    assert_eq!(field.value(), "hello");
    assert_eq!(field.cursor(), 4);

    field.handle_key(key(KeyCode::End));
    field.handle_key(key(KeyCode::Backspace));
    assert_eq!(field.value(), "hell");

    field.handle_key(key(KeyCode::Home));
    field.handle_key(key(KeyCode::Delete));
    assert_eq!(field.value(), "ell");
}

#[test]
fn test_text_field_char_limit_and_ctrl_keys() {
    let mut field = TextField::new("").with_char_limit(3);
    field.set_active(true);

    type_into(&mut field, "abcdef");
    assert_eq!(field.value(), "abc");

    assert_eq!(field.handle_key(ctrl('a')), Outcome::Ignored);
    assert_eq!(field.value(), "abc");
}

#[test]
fn test_masked_field_hides_value() {
    let mut field = TextField::new("password").masked();
    field.set_value("secret");

    let line = field.inline(20);

    let shown: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    assert_eq!(shown, "******");
    assert_eq!(field.value(), "secret");
}

#[test]
fn test_text_area_lines() {
    let mut area = TextArea::new("body");
    area.set_size(40, 5);
    area.set_active(true);

    type_into(&mut area, "ab");
    area.handle_key(key(KeyCode::Enter));
    type_into(&mut area, "c");
    assert_eq!(area.text(), "ab\nc");
    assert_eq!(area.cursor(), (1, 1));

    area.handle_key(key(KeyCode::Home));
    area.handle_key(key(KeyCode::Backspace));
    assert_eq!(area.text(), "abc");
    assert_eq!(area.cursor(), (0, 2));
}

#[test]
fn test_text_area_scrolls_with_cursor() {
    let mut area = TextArea::new("");
    area.set_size(40, 3);
    area.set_active(true);

    for _ in 0..5 {
        area.handle_key(key(KeyCode::Enter));
    }

    assert_eq!(area.line_count(), 6);
    assert_eq!(area.cursor(), (5, 0));
    assert_eq!(area.offset(), 3);
}

// Tabs

#[test]
fn test_tab_set_cycles() {
    let mut tabs: TabSet<QueryTab> = TabSet::new();
    assert_eq!(tabs.current(), QueryTab::Params);

    tabs.prev();
    assert_eq!(tabs.current(), QueryTab::Body);
    tabs.next();
    tabs.next();
    assert_eq!(tabs.current(), QueryTab::Params);
    assert_eq!(tabs.labels(), vec!["Params", "Auth", "Headers", "Body"]);
}

#[test]
fn test_query_pane_inner_switch_moves_activation() {
    let mut pane = QueryPane::new();
    pane.set_size(80, 20);
    pane.set_active(true);
    assert!(pane.params().is_active());

    pane.handle_key(key(KeyCode::Tab));

    assert_eq!(pane.current(), QueryTab::Auth);
    assert!(!pane.params().is_active());
    assert!(pane.auth().is_active());
    assert_eq!(pane.active_leaves(), 1);
}

#[test]
fn test_set_active_is_idempotent() {
    let mut tabs = TabContainer::new();
    tabs.set_size(100, 30);

    tabs.set_active(true);
    tabs.set_active(true);
    assert_eq!(tabs.active_leaves(), 1);

    tabs.set_active(false);
    tabs.set_active(false);
    assert_eq!(tabs.active_leaves(), 0);
}

#[test]
fn test_outer_switch_preserves_inner_selection() {
    let mut tabs = TabContainer::new();
    tabs.set_size(100, 30);
    tabs.set_active(true);
    tabs.handle_key(key(KeyCode::Tab));
    tabs.handle_key(key(KeyCode::Tab));
    assert_eq!(tabs.query().current(), QueryTab::Headers);

    tabs.switch_to(OuterTab::Result);
    assert!(!tabs.query().is_active());
    tabs.switch_to(OuterTab::Query);

    assert_eq!(tabs.query().current(), QueryTab::Headers);
    assert!(tabs.query().headers().is_active());
    assert_eq!(tabs.active_leaves(), 1);
}

// Auth

#[test]
fn test_basic_auth_header() {
    let mut auth = AuthPane::new();
    auth.set_size(60, 12);
    auth.set_active(true);

    press(&mut auth, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter]);
    assert_eq!(auth.kind(), AuthKind::Basic);

    auth.handle_key(key(KeyCode::Down));
    assert!(auth.details_focused());
    type_into(&mut auth, "user");
    auth.handle_key(key(KeyCode::Down));
    type_into(&mut auth, "pass");

    assert_eq!(
        auth.headers(),
        vec![("Authorization".to_string(), "Basic dXNlcjpwYXNz".to_string())]
    );
    assert_eq!(auth.active_leaves(), 1);
}

#[test]
fn test_auth_up_from_first_field_returns_to_selector() {
    let mut auth = AuthPane::new();
    auth.set_active(true);
    press(&mut auth, &[KeyCode::Enter, KeyCode::Down, KeyCode::Enter, KeyCode::Down]);
    assert!(auth.details_focused());

    press(&mut auth, &[KeyCode::Down, KeyCode::Up, KeyCode::Up]);

    assert!(!auth.details_focused());
    assert!(auth.selector().is_active());
    assert_eq!(auth.active_leaves(), 1);
}

#[test]
fn test_bearer_auth_header() {
    let mut auth = AuthPane::new();
    auth.set_active(true);
    press(
        &mut auth,
        &[KeyCode::Enter, KeyCode::Down, KeyCode::Down, KeyCode::Enter, KeyCode::Down],
    );
    assert_eq!(auth.kind(), AuthKind::Bearer);
    assert!(auth.headers().is_empty());

    type_into(&mut auth, "abc");

    assert_eq!(
        auth.headers(),
        vec![("Authorization".to_string(), "Bearer abc".to_string())]
    );
}

#[test]
fn test_no_auth_has_no_details() {
    let mut auth = AuthPane::new();
    auth.set_active(true);

    auth.handle_key(key(KeyCode::Down));

    assert_eq!(auth.kind(), AuthKind::None);
    assert!(!auth.details_focused());
    assert!(auth.details().is_none());
    assert!(auth.headers().is_empty());
}

#[test]
fn test_auth_header_wins_over_header_grid() {
    let mut pane = QueryPane::new();
    pane.set_size(100, 20);
    pane.set_active(true);

    // Auth tab: Bearer token
    pane.handle_key(key(KeyCode::Tab));
    press(
        &mut pane,
        &[KeyCode::Enter, KeyCode::Down, KeyCode::Down, KeyCode::Enter, KeyCode::Down],
    );
    type_into(&mut pane, "abc");

    // Headers tab: Authorization picked by hand
    pane.handle_key(key(KeyCode::Tab));
    assert_eq!(pane.current(), QueryTab::Headers);
    pane.handle_key(key(KeyCode::Enter));
    for _ in 0..4 {
        pane.handle_key(key(KeyCode::Down));
    }
    pane.handle_key(key(KeyCode::Enter));
    pane.handle_key(key(KeyCode::Right));
    type_into(&mut pane, "manual");

    let headers = pane.request_headers();
    assert_eq!(
        headers.get("Authorization").map(String::as_str),
        Some("Bearer abc")
    );
}

// Spinner and toast

#[test]
fn test_spinner_ticks_only_while_visible() {
    let mut spinner = Spinner::new();
    assert!(spinner.tick_interval().is_none());

    spinner.show("Sending request...");
    let first = spinner.frame();
    spinner.tick();
    assert_ne!(spinner.frame(), first);
    assert!(spinner.tick_interval().is_some());

    spinner.hide();
    let frozen = spinner.frame();
    spinner.tick();
    assert_eq!(spinner.frame(), frozen);
    assert!(spinner.tick_interval().is_none());
}

#[test]
fn test_toast_show_and_hide() {
    let mut toast = Toast::new();
    assert!(!toast.is_visible());

    toast.show("Invalid URL");
    assert_eq!(toast.message(), Some("Invalid URL"));

    toast.hide();
    assert!(toast.message().is_none());
}

//! Screen geometry as a pure function of the terminal size.

use ratatui::layout::{Margin, Rect};

const HEADER_HEIGHT: u16 = 3;
const REQUEST_BAR_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;
const SIDE_MARGIN_PERCENT: u16 = 5;
const METHOD_PERCENT: u16 = 20;
const SUBMIT_PERCENT: u16 = 15;

/// Where each top-level widget goes for one terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub screen: Rect,
    pub header: Rect,
    pub method: Rect,
    pub url: Rect,
    pub submit: Rect,
    pub tabs: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn compute(width: u16, height: u16) -> Self {
        let screen = Rect::new(0, 0, width, height);
        let pad = percent(width, SIDE_MARGIN_PERCENT);
        let inner_width = width.saturating_sub(pad * 2);

        let header = clip(Rect::new(pad, 0, inner_width, HEADER_HEIGHT), screen);

        let bar_y = HEADER_HEIGHT;
        let method_width = percent(inner_width, METHOD_PERCENT);
        let submit_width = percent(inner_width, SUBMIT_PERCENT);
        let url_width = inner_width.saturating_sub(method_width + submit_width);
        let method = clip(Rect::new(pad, bar_y, method_width, REQUEST_BAR_HEIGHT), screen);
        let url = clip(
            Rect::new(pad + method_width, bar_y, url_width, REQUEST_BAR_HEIGHT),
            screen,
        );
        let submit = clip(
            Rect::new(
                pad + method_width + url_width,
                bar_y,
                submit_width,
                REQUEST_BAR_HEIGHT,
            ),
            screen,
        );

        let tabs_y = bar_y + REQUEST_BAR_HEIGHT;
        let footer_y = height.saturating_sub(FOOTER_HEIGHT).max(tabs_y);
        let tabs = clip(
            Rect::new(pad, tabs_y, inner_width, footer_y.saturating_sub(tabs_y)),
            screen,
        );
        let footer = clip(Rect::new(pad, footer_y, inner_width, FOOTER_HEIGHT), screen);

        Self {
            screen,
            header,
            method,
            url,
            submit,
            tabs,
            footer,
        }
    }
}

fn percent(value: u16, percent: u16) -> u16 {
    (u32::from(value) * u32::from(percent) / 100) as u16
}

/// Inside of a bordered box, or an empty rect when the box is too small.
pub fn inner(area: Rect) -> Rect {
    area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    })
}

/// Part of `rect` that lies within `bounds`. Never extends past `bounds`,
/// degrading to zero width or height instead.
pub fn clip(rect: Rect, bounds: Rect) -> Rect {
    let x = rect.x.clamp(bounds.x, bounds.right());
    let y = rect.y.clamp(bounds.y, bounds.bottom());
    let right = rect.right().clamp(x, bounds.right());
    let bottom = rect.bottom().clamp(y, bounds.bottom());
    Rect::new(x, y, right - x, bottom - y)
}

/// A `width` x `height` box centred in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};
use vitrine_config::Profile;

use super::{View, title, wrap};

/// Widest the text column grows, for readable line lengths.
const MAX_TEXT_WIDTH: u16 = 72;

fn text_width(width: u16) -> u16 {
    width.min(MAX_TEXT_WIDTH)
}

fn paragraphs(profile: &Profile, width: u16) -> Vec<Vec<String>> {
    profile
        .about
        .iter()
        .map(|p| wrap(p, text_width(width)))
        .collect()
}

pub fn height(profile: &Profile, width: u16) -> u16 {
    let body: usize = paragraphs(profile, width).iter().map(|p| p.len() + 1).sum();
    3 + body as u16
}

pub fn render(view: &View<'_>, area: Rect, buf: &mut Buffer) {
    let mut y = area.y + title(view, "About Me", area, buf);
    let width = text_width(area.width);
    let x = area.x + (area.width - width) / 2;

    for paragraph in paragraphs(view.profile, area.width) {
        for row in paragraph {
            if y >= area.bottom() {
                return;
            }
            Line::styled(row, view.theme.body()).render(Rect::new(x, y, width, 1), buf);
            y += 1;
        }
        y += 1;
    }
}

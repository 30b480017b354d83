use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Modifier,
    text::Line,
    widgets::Widget,
};
use vitrine_config::Profile;
use vitrine_fonts::{HEIGHT as BANNER_HEIGHT, banner_width, build_banner};

use super::{View, wrap};
use crate::theme::{Element, Interaction};

const CALL_TO_ACTION: &str = " Get in touch  (5) ";

fn uses_banner(profile: &Profile, width: u16) -> bool {
    banner_width(&profile.name) <= usize::from(width)
}

pub fn height(profile: &Profile, width: u16) -> u16 {
    let name = if uses_banner(profile, width) {
        BANNER_HEIGHT as u16
    } else {
        1
    };
    // name, gap, role, gap, tagline, gap, button
    name + 1 + 1 + 1 + wrap(&profile.tagline, width).len() as u16 + 1 + 1
}

pub fn render(view: &View<'_>, area: Rect, buf: &mut Buffer) {
    let profile = view.profile;
    let theme = view.theme;
    let mut lines: Vec<Line> = Vec::new();

    if uses_banner(profile, area.width) {
        lines.extend(
            build_banner(&profile.name)
                .into_iter()
                .map(|row| Line::styled(row, theme.heading())),
        );
    } else {
        lines.push(Line::styled(profile.name.clone(), theme.heading()));
    }
    lines.push(Line::default());
    lines.push(Line::styled(
        profile.role.clone(),
        theme.accent().add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::default());
    lines.extend(
        wrap(&profile.tagline, area.width)
            .into_iter()
            .map(|row| Line::styled(row, theme.muted())),
    );
    lines.push(Line::default());
    lines.push(Line::styled(
        CALL_TO_ACTION,
        theme.style_for(Element::Button, Interaction::Idle),
    ));

    for (i, line) in lines.into_iter().enumerate() {
        let y = area.y + i as u16;
        if y >= area.bottom() {
            break;
        }
        line.centered()
            .render(Rect::new(area.x, y, area.width, 1), buf);
    }
}

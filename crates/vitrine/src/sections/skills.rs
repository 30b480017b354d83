use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use vitrine_config::Profile;

use super::{View, title};
use crate::theme::{Element, Interaction};

/// Marquee speed in columns per second.
const MARQUEE_SPEED: f32 = 6.0;

const BADGE_GAP: usize = 3;

pub fn height(profile: &Profile) -> u16 {
    // title block, then a label and a marquee row per group with a gap
    3 + profile.skills.len() as u16 * 3
}

pub fn render(view: &View<'_>, area: Rect, buf: &mut Buffer) {
    let theme = view.theme;
    let mut y = area.y + title(view, "Skills & Technologies", area, buf);
    let badge = theme.style_for(Element::Badge, Interaction::Idle);

    for (row, group) in view.profile.skills.iter().enumerate() {
        if y + 1 >= area.bottom() {
            break;
        }
        Line::styled(group.title.clone(), theme.muted())
            .centered()
            .render(Rect::new(area.x, y, area.width, 1), buf);

        let items: Vec<(String, Style)> = group
            .items
            .iter()
            .map(|skill| (skill.name.clone(), badge.fg(skill.color.into())))
            .collect();
        // Alternate rows scroll in opposite directions.
        let shift = (view.elapsed.max(0.0) * MARQUEE_SPEED) as usize;
        marquee(&items, area.width, shift, row % 2 == 1).render(
            Rect::new(area.x, y + 1, area.width, 1),
            buf,
        );
        y += 3;
    }
}

/// One row of an endlessly repeating strip of badges, `shift` columns in.
///
/// A pure function of `shift`, so the carousel position depends only on
/// elapsed time.
pub fn marquee(
    items: &[(String, Style)],
    width: u16,
    shift: usize,
    reverse: bool,
) -> Line<'static> {
    let mut strip: Vec<(char, Style)> = Vec::new();
    for (label, style) in items {
        strip.extend(format!(" {label} ").chars().map(|c| (c, *style)));
        strip.extend(std::iter::repeat_n((' ', Style::new()), BADGE_GAP));
    }
    if strip.is_empty() {
        return Line::default();
    }

    let len = strip.len();
    let start = if reverse {
        (len - shift % len) % len
    } else {
        shift % len
    };

    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::new();
    for col in 0..usize::from(width) {
        let (c, style) = strip[(start + col) % len];
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(c);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

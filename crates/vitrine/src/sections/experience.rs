use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Widget},
};
use vitrine_config::{Experience, Profile};

use super::{View, badge_rows, title, wrap};
use crate::theme::{Element, Interaction, Theme};

const CARD_HEIGHT: u16 = 4;
const LIST_WIDTH: u16 = 30;
/// Narrower than this and the list stacks above the details.
const SIDE_BY_SIDE_MIN: u16 = 70;
const HINT: &str = "←/→ select";

fn columns(width: u16) -> Option<(u16, u16)> {
    (width >= SIDE_BY_SIDE_MIN).then(|| (LIST_WIDTH, width - LIST_WIDTH - 2))
}

fn list_height(profile: &Profile) -> u16 {
    profile.experience.len() as u16 * CARD_HEIGHT + 1
}

fn detail_lines(entry: &Experience, theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(entry.title.clone(), theme.heading()),
        Line::styled(
            entry.company.clone(),
            theme.accent().add_modifier(Modifier::BOLD),
        ),
    ];
    let meta: Vec<&str> = [&entry.period, &entry.location, &entry.kind]
        .into_iter()
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .collect();
    lines.push(Line::styled(meta.join(" · "), theme.muted()));
    lines.push(Line::default());

    for highlight in &entry.highlights {
        for (i, row) in wrap(highlight, width.saturating_sub(2)).into_iter().enumerate() {
            let bullet = if i == 0 { "• " } else { "  " };
            lines.push(Line::styled(format!("{bullet}{row}"), theme.body()));
        }
    }

    if !entry.skills.is_empty() {
        lines.push(Line::default());
        let badge = theme.style_for(Element::Badge, Interaction::Idle);
        let items: Vec<(String, Style)> = entry.skills.iter().map(|s| (s.clone(), badge)).collect();
        lines.extend(badge_rows(&items, width));
    }
    lines
}

fn detail_height(profile: &Profile, width: u16) -> u16 {
    let theme = Theme::default();
    profile
        .experience
        .iter()
        .map(|e| detail_lines(e, &theme, width).len() as u16)
        .max()
        .unwrap_or(0)
}

pub fn height(profile: &Profile, width: u16) -> u16 {
    let body = match columns(width) {
        Some((_, detail)) => list_height(profile).max(detail_height(profile, detail)),
        None => list_height(profile) + 1 + detail_height(profile, width),
    };
    3 + body
}

pub fn render(view: &View<'_>, area: Rect, buf: &mut Buffer) {
    let top = area.y + title(view, "Experience", area, buf);
    let profile = view.profile;
    if profile.experience.is_empty() {
        return;
    }
    let selected = view.selected_experience.min(profile.experience.len() - 1);

    let (list, detail) = match columns(area.width) {
        Some((list_w, detail_w)) => (
            Rect::new(area.x, top, list_w, list_height(profile)),
            Rect::new(area.x + list_w + 2, top, detail_w, area.bottom().saturating_sub(top)),
        ),
        None => {
            let list = Rect::new(area.x, top, area.width, list_height(profile));
            (
                list,
                Rect::new(
                    area.x,
                    list.bottom() + 1,
                    area.width,
                    area.bottom().saturating_sub(list.bottom() + 1),
                ),
            )
        }
    };
    let list = list.intersection(area);

    for (i, entry) in profile.experience.iter().enumerate() {
        let card = Rect::new(list.x, list.y + i as u16 * CARD_HEIGHT, list.width, CARD_HEIGHT)
            .intersection(list);
        if card.height < CARD_HEIGHT {
            break;
        }
        let interaction = Interaction::from_flags(i == selected, false, false);
        let block = Block::bordered().border_style(view.theme.style_for(Element::Card, interaction));
        let inner = block.inner(card);
        block.render(card, buf);
        Line::styled(entry.company.clone(), view.theme.heading())
            .render(Rect { height: 1, ..inner }, buf);
        Line::styled(entry.title.clone(), view.theme.muted())
            .render(Rect::new(inner.x, inner.y + 1, inner.width, 1), buf);
    }
    let hint_y = list.y + profile.experience.len() as u16 * CARD_HEIGHT;
    if hint_y < area.bottom() {
        Line::styled(HINT, view.theme.muted())
            .render(Rect::new(list.x, hint_y, list.width, 1), buf);
    }

    let detail = detail.intersection(area);
    for (i, line) in detail_lines(&profile.experience[selected], view.theme, detail.width)
        .into_iter()
        .enumerate()
    {
        let y = detail.y + i as u16;
        if y >= detail.bottom() {
            break;
        }
        line.render(Rect::new(detail.x, y, detail.width, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_switches_on_width() {
        assert!(columns(69).is_none());
        assert_eq!(columns(100), Some((30, 68)));
    }

    #[test]
    fn test_height_fits_longest_entry() {
        let profile = Profile::default();
        let wide = height(&profile, 100);
        let narrow = height(&profile, 40);
        assert!(narrow > wide);
        assert!(wide >= 3 + list_height(&profile));
    }

    #[test]
    fn test_detail_lists_highlights() {
        let profile = Profile::default();
        let entry = &profile.experience[0];
        let lines = detail_lines(entry, &Theme::default(), 200);
        // title, company, meta, gap, highlights, gap, one row of skills
        assert_eq!(lines.len(), 4 + entry.highlights.len() + 2);
        assert!(lines[4].spans[0].content.starts_with("• "));
    }
}

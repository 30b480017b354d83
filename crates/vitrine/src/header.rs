//! Navigation bar pinned to the top of the screen.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::theme::{Element, Interaction, Theme};

/// Rows taken by the header, border included.
pub const HEADER_HEIGHT: u16 = 3;

const LINK_GAP: u16 = 1;
const EDGE: u16 = 2;

/// Screen areas of the nav links, right-aligned on the header's middle row.
pub fn link_areas(area: Rect, labels: &[&str]) -> Vec<Rect> {
    if area.height < 2 {
        return Vec::new();
    }
    let widths: Vec<u16> = labels.iter().map(|l| l.chars().count() as u16 + 2).collect();
    let total = widths.iter().sum::<u16>() + LINK_GAP * widths.len().saturating_sub(1) as u16;
    let mut x = area.right().saturating_sub(EDGE + total).max(area.x);
    widths
        .into_iter()
        .map(|w| {
            let rect = Rect::new(x, area.y + 1, w, 1).intersection(area);
            x = x.saturating_add(w + LINK_GAP);
            rect
        })
        .collect()
}

/// Index of the link under a screen position.
pub fn link_at(area: Rect, labels: &[&str], column: u16, row: u16) -> Option<usize> {
    link_areas(area, labels)
        .iter()
        .position(|r| !r.is_empty() && r.contains(Position::new(column, row)))
}

#[derive(Debug)]
pub struct Header<'a> {
    pub theme: &'a Theme,
    pub brand: &'a str,
    pub labels: &'a [&'a str],
    pub active: usize,
    pub hovered: Option<usize>,
    /// Short status shown after the brand, e.g. theme and speed.
    pub status: String,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        Block::new()
            .borders(Borders::BOTTOM)
            .border_style(theme.style_for(Element::Card, Interaction::Idle))
            .style(theme.base())
            .render(area, buf);
        if area.height < 2 {
            return;
        }

        let links = link_areas(area, self.labels);
        let brand_width = links
            .first()
            .map(|r| r.x.saturating_sub(area.x + EDGE + 1))
            .unwrap_or(area.width);
        Line::from(vec![
            Span::styled(self.brand, theme.heading()),
            Span::raw("  "),
            Span::styled(self.status, theme.muted().add_modifier(Modifier::ITALIC)),
        ])
        .render(Rect::new(area.x + EDGE, area.y + 1, brand_width, 1).intersection(area), buf);

        for (i, (label, rect)) in self.labels.iter().zip(links).enumerate() {
            let interaction = Interaction::from_flags(i == self.active, false, self.hovered == Some(i));
            Line::styled(format!(" {label} "), theme.style_for(Element::NavLink, interaction))
                .render(rect, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;

    const LABELS: [&str; 3] = ["Home", "About", "Contact"];

    #[test]
    fn test_links_are_right_aligned() {
        let areas = link_areas(Rect::new(0, 0, 80, 3), &LABELS);
        assert_eq!(areas.len(), 3);
        assert_eq!(areas[0], Rect::new(54, 1, 6, 1));
        assert_eq!(areas[2].right(), 78);
    }

    #[test]
    fn test_link_hit_testing() {
        let area = Rect::new(0, 0, 80, 3);
        assert_eq!(link_at(area, &LABELS, 55, 1), Some(0));
        assert_eq!(link_at(area, &LABELS, 77, 1), Some(2));
        assert_eq!(link_at(area, &LABELS, 60, 1), None);
        assert_eq!(link_at(area, &LABELS, 55, 0), None);
    }

    #[test]
    fn test_active_link_is_highlighted() {
        let theme = Theme::ORCHID;
        let area = Rect::new(0, 0, 80, 3);
        let mut buf = Buffer::empty(area);
        Header {
            theme: &theme,
            brand: "Alex",
            labels: &LABELS,
            active: 1,
            hovered: None,
            status: String::new(),
        }
        .render(area, &mut buf);

        let about = link_areas(area, &LABELS)[1];
        assert_eq!(buf[(about.x + 1, 1)].symbol(), "A");
        assert_eq!(buf[(about.x + 1, 1)].fg, Color::Rgb(0xA6, 0x68, 0xC4));
        assert_eq!(buf[(2, 1)].symbol(), "A");
        assert_eq!(buf[(0, 2)].symbol(), "─");
    }
}

//! Content of each page section, rendered off-screen at full height.

mod about;
mod contact;
mod experience;
mod hero;
mod skills;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use vitrine_config::Profile;
use vitrine_core::Section;

use crate::contact::{ContactSubmission, SubmitError};
use crate::theme::Theme;

pub use skills::marquee;

/// Columns kept clear on each side of section content.
const MARGIN: u16 = 4;

/// Everything a section needs to draw itself.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub theme: &'a Theme,
    pub profile: &'a Profile,
    /// Seconds since the app started; drives the skill marquee.
    pub elapsed: f32,
    pub selected_experience: usize,
    pub contact: &'a ContactSubmission,
    pub contact_error: Option<SubmitError>,
    /// Year shown in the footer.
    pub year: i32,
}

/// Rows a section's content needs at `width`.
pub fn content_height(section: Section, profile: &Profile, width: u16) -> u16 {
    let width = inner_width(width);
    match section {
        Section::Home => hero::height(profile, width),
        Section::Skills => skills::height(profile),
        Section::About => about::height(profile, width),
        Section::Experience => experience::height(profile, width),
        Section::Contact => contact::height(profile),
    }
}

/// Draw a section into an off-screen buffer sized to the whole section.
pub fn render(section: Section, view: &View<'_>, buf: &mut Buffer) {
    let area = buf.area;
    let inner = Rect::new(
        area.x + MARGIN.min(area.width / 2),
        area.y,
        inner_width(area.width),
        area.height,
    );
    let content = content_height(section, view.profile, area.width);
    // Center short content vertically, like a full-height section.
    let pad = area.height.saturating_sub(content) / 2;
    let inner = Rect {
        y: inner.y + pad,
        height: inner.height.saturating_sub(pad),
        ..inner
    };

    match section {
        Section::Home => hero::render(view, inner, buf),
        Section::Skills => skills::render(view, inner, buf),
        Section::About => about::render(view, inner, buf),
        Section::Experience => experience::render(view, inner, buf),
        Section::Contact => contact::render(view, inner, buf),
    }
}

fn inner_width(width: u16) -> u16 {
    width.saturating_sub(MARGIN * 2).max(1)
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if len > 0 {
                    lines.push(std::mem::take(&mut line));
                    len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if len == 0 { word.len() } else { len + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut line));
                len = 0;
            }
            if len > 0 {
                line.push(' ');
                len += 1;
            }
            line.extend(word.iter());
            len += word.len();
        }
        lines.push(line);
    }
    lines
}

/// Centered section title with an underline, as in the web page's headings.
fn title(view: &View<'_>, text: &str, area: Rect, buf: &mut Buffer) -> u16 {
    if area.height < 2 {
        return 0;
    }
    Line::styled(text.to_string(), view.theme.heading())
        .centered()
        .render(Rect { height: 1, ..area }, buf);
    let rule = "─".repeat(text.chars().count().min(usize::from(area.width)));
    Line::styled(rule, view.theme.accent())
        .centered()
        .render(Rect::new(area.x, area.y + 1, area.width, 1), buf);
    3
}

/// Badges laid out left to right, wrapping onto new rows.
fn badge_rows(items: &[(String, Style)], width: u16) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut used = 0;
    for (label, style) in items {
        let badge = format!(" {label} ");
        let w = badge.chars().count() as u16;
        if used > 0 && used + 1 + w > width {
            rows.push(Line::from(std::mem::take(&mut spans)));
            used = 0;
        }
        if used > 0 {
            spans.push(Span::raw(" "));
            used += 1;
        }
        spans.push(Span::styled(badge, *style));
        used += w;
    }
    if !spans.is_empty() {
        rows.push(Line::from(spans));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(
            lines,
            vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]
        );
        for line in &lines {
            assert!(line.chars().count() <= 10);
        }
    }

    #[test]
    fn test_wrap_splits_long_words() {
        assert_eq!(wrap("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn test_wrap_keeps_blank_paragraphs() {
        assert_eq!(wrap("a\n\nb", 5), vec!["a", "", "b"]);
        assert_eq!(wrap("", 5), vec![""]);
    }

    #[test]
    fn test_badge_rows_wrap() {
        let items: Vec<(String, Style)> = ["Rust", "Go", "TypeScript"]
            .iter()
            .map(|s| (s.to_string(), Style::new()))
            .collect();
        let rows = badge_rows(&items, 12);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].width(), 11);
    }

    #[test]
    fn test_every_section_has_content() {
        let profile = Profile::default();
        for section in Section::ALL {
            assert!(content_height(section, &profile, 80) > 3, "{section:?}");
        }
    }
}

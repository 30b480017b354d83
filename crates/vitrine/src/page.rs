//! Vertical layout of the page and compositing of scrolled content.

use ratatui::{buffer::Buffer, layout::Rect, style::Color};
use vitrine_core::Section;

/// Page pixels per terminal row. Scroll positions and nav offsets are
/// measured in page pixels so thresholds read the same as on the web.
pub const ROW_PIXELS: u32 = 16;

/// Where one section sits on the page, in rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub section: Section,
    pub top: u32,
    pub height: u16,
}

impl SectionSpan {
    pub fn bottom(&self) -> u32 {
        self.top + u32::from(self.height)
    }
}

/// The part of a section visible in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleSection {
    pub section: Section,
    /// Screen area the section occupies.
    pub area: Rect,
    /// First section row shown at the top of `area`.
    pub first_row: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    spans: Vec<SectionSpan>,
}

impl PageLayout {
    /// Stack the sections top to bottom. Every section is at least one body
    /// tall, like a full-height section on the web.
    pub fn new(body_height: u16, content_heights: impl IntoIterator<Item = (Section, u16)>) -> Self {
        let mut top = 0;
        let spans = content_heights
            .into_iter()
            .map(|(section, content)| {
                let span = SectionSpan {
                    section,
                    top,
                    height: content.max(body_height),
                };
                top = span.bottom();
                span
            })
            .collect();
        Self { spans }
    }

    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    pub fn span(&self, section: Section) -> Option<SectionSpan> {
        self.spans.iter().find(|s| s.section == section).copied()
    }

    /// Total page height in rows.
    pub fn height(&self) -> u32 {
        self.spans.last().map(SectionSpan::bottom).unwrap_or(0)
    }

    pub fn max_scroll(&self, body_height: u16) -> u32 {
        self.height().saturating_sub(u32::from(body_height))
    }

    /// Section tops in page pixels.
    pub fn offsets_px(&self) -> Vec<u32> {
        self.spans.iter().map(|s| s.top * ROW_PIXELS).collect()
    }

    /// Sections intersecting the body when scrolled to `scroll`.
    pub fn visible(&self, scroll: u32, body: Rect) -> Vec<VisibleSection> {
        let view_top = scroll;
        let view_bottom = scroll + u32::from(body.height);
        self.spans
            .iter()
            .filter(|s| s.top < view_bottom && s.bottom() > view_top)
            .map(|s| {
                let start = s.top.max(view_top);
                let end = s.bottom().min(view_bottom);
                VisibleSection {
                    section: s.section,
                    area: Rect::new(
                        body.x,
                        body.y + (start - view_top) as u16,
                        body.width,
                        (end - start) as u16,
                    ),
                    first_row: (start - s.top) as u16,
                }
            })
            .collect()
    }
}

/// Copy the visible rows of an off-screen section into the frame.
///
/// Blank cells with no background are skipped so the backdrop shows through,
/// and copied cells keep the frame's background unless they set their own.
pub fn blit(src: &Buffer, visible: &VisibleSection, dst: &mut Buffer) {
    let area = visible.area.intersection(dst.area);
    for dy in 0..area.height {
        let sy = visible.first_row + dy;
        for dx in 0..area.width {
            let Some(cell) = src.cell((src.area.x + dx, src.area.y + sy)) else {
                continue;
            };
            if cell.symbol() == " " && cell.bg == Color::Reset {
                continue;
            }
            if let Some(target) = dst.cell_mut((area.x + dx, area.y + dy)) {
                let bg = if cell.bg == Color::Reset { target.bg } else { cell.bg };
                *target = cell.clone();
                target.set_bg(bg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Style;

    use super::*;

    fn layout() -> PageLayout {
        PageLayout::new(
            20,
            [
                (Section::Home, 10),
                (Section::Skills, 30),
                (Section::Contact, 20),
            ],
        )
    }

    #[test]
    fn test_sections_fill_at_least_one_screen() {
        let layout = layout();
        let tops: Vec<u32> = layout.spans().iter().map(|s| s.top).collect();
        assert_eq!(tops, vec![0, 20, 50]);
        assert_eq!(layout.height(), 70);
        assert_eq!(layout.max_scroll(20), 50);
        assert_eq!(layout.offsets_px(), vec![0, 320, 800]);
    }

    #[test]
    fn test_visible_straddles_two_sections() {
        let layout = layout();
        let body = Rect::new(0, 3, 80, 20);
        let visible = layout.visible(15, body);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].section, Section::Home);
        assert_eq!(visible[0].area, Rect::new(0, 3, 80, 5));
        assert_eq!(visible[0].first_row, 15);
        assert_eq!(visible[1].section, Section::Skills);
        assert_eq!(visible[1].area, Rect::new(0, 8, 80, 15));
        assert_eq!(visible[1].first_row, 0);
    }

    #[test]
    fn test_visible_on_boundary() {
        let layout = layout();
        let visible = layout.visible(20, Rect::new(0, 0, 10, 20));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].section, Section::Skills);
    }

    #[test]
    fn test_empty_body_shows_nothing() {
        assert!(layout().visible(0, Rect::new(0, 0, 10, 0)).is_empty());
    }

    #[test]
    fn test_blit_skips_blank_cells() {
        let mut src = Buffer::empty(Rect::new(0, 0, 3, 4));
        src.set_string(0, 2, "ab", Style::new());
        src[(2, 2)].set_bg(Color::Blue);

        let mut dst = Buffer::empty(Rect::new(0, 0, 3, 2));
        dst.set_string(0, 0, "xyz", Style::new());

        let visible = VisibleSection {
            section: Section::Home,
            area: Rect::new(0, 0, 3, 1),
            first_row: 2,
        };
        blit(&src, &visible, &mut dst);
        assert_eq!(dst[(0, 0)].symbol(), "a");
        assert_eq!(dst[(1, 0)].symbol(), "b");
        assert_eq!(dst[(2, 0)].bg, Color::Blue);
    }
}

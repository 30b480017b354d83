//! Scroll-linked highlighting of the navigation bar.

use tracing::trace;

/// A navigation target and the page offset of its section's top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub label: String,
    pub offset: u32,
}

impl NavEntry {
    pub fn new(label: impl Into<String>, offset: u32) -> Self {
        Self {
            label: label.into(),
            offset,
        }
    }
}

/// Tracks which navigation entry the reader is looking at.
///
/// An entry becomes active once the scroll position comes within
/// `threshold` of its offset; the last such entry in list order wins.
#[derive(Debug, Clone)]
pub struct NavigationHighlighter {
    entries: Vec<NavEntry>,
    threshold: u32,
    active: usize,
}

impl NavigationHighlighter {
    /// Default distance before a section's top at which it becomes active.
    pub const DEFAULT_THRESHOLD: u32 = 100;

    pub fn new(entries: Vec<NavEntry>, threshold: u32) -> Self {
        Self {
            entries,
            threshold,
            active: 0,
        }
    }

    /// Recompute the active entry for a scroll position.
    pub fn on_scroll(&mut self, position: u32) -> usize {
        let active = self
            .entries
            .iter()
            .rposition(|entry| entry.offset.saturating_sub(self.threshold) <= position)
            .unwrap_or(0);
        if active != self.active {
            trace!(position, active, "active nav entry changed");
        }
        self.active = active;
        active
    }

    /// Index of the active entry. Zero when nothing matched.
    pub fn active(&self) -> usize {
        self.active
    }

    /// Make `index` active right away, e.g. on a click. Clamped to the list.
    pub fn select(&mut self, index: usize) -> usize {
        self.active = index.min(self.entries.len().saturating_sub(1));
        self.active
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Move the entries to new offsets after a relayout. Extra offsets are
    /// ignored.
    pub fn set_offsets(&mut self, offsets: impl IntoIterator<Item = u32>) {
        for (entry, offset) in self.entries.iter_mut().zip(offsets) {
            entry.offset = offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlighter() -> NavigationHighlighter {
        NavigationHighlighter::new(
            vec![
                NavEntry::new("Home", 0),
                NavEntry::new("About", 800),
                NavEntry::new("Projects", 1600),
            ],
            NavigationHighlighter::DEFAULT_THRESHOLD,
        )
    }

    #[test]
    fn test_scroll_buckets() {
        let mut nav = highlighter();
        assert_eq!(nav.on_scroll(850), 1);
        assert_eq!(nav.on_scroll(0), 0);
        assert_eq!(nav.on_scroll(1600), 2);
        assert_eq!(nav.active(), 2);
    }

    #[test]
    fn test_threshold_switches_early() {
        let mut nav = highlighter();
        assert_eq!(nav.on_scroll(699), 0);
        assert_eq!(nav.on_scroll(700), 1);
        assert_eq!(nav.on_scroll(1499), 1);
        assert_eq!(nav.on_scroll(1500), 2);
        assert_eq!(nav.on_scroll(u32::MAX), 2);
    }

    #[test]
    fn test_defaults_to_first_entry() {
        let mut nav = NavigationHighlighter::new(vec![NavEntry::new("Late", 5000)], 100);
        assert_eq!(nav.on_scroll(10), 0);

        let mut empty = NavigationHighlighter::new(Vec::new(), 100);
        assert_eq!(empty.on_scroll(10), 0);
        assert_eq!(empty.select(3), 0);
    }

    #[test]
    fn test_select_is_clamped() {
        let mut nav = highlighter();
        assert_eq!(nav.select(1), 1);
        assert_eq!(nav.active(), 1);
        assert_eq!(nav.select(9), 2);
    }

    #[test]
    fn test_set_offsets() {
        let mut nav = highlighter();
        nav.set_offsets([0, 400, 900]);
        assert_eq!(nav.on_scroll(300), 1);
        assert_eq!(nav.entries()[2].offset, 900);
    }
}

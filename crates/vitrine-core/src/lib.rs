//! Core types shared by the vitrine crates.
//!
//! Everything here is plain data: viewport sizes, page sections, colors,
//! animation speed and theme selection, plus the process-wide
//! [`SignalDispatcher`] that fans viewport and input signals out to the
//! components that care about them.

mod color;
mod signal;

pub use color::{ParseRgbError, Rgb};
pub use signal::{Signal, SignalDispatcher, SignalKind, SubscriptionId};

use serde::{Deserialize, Serialize};

/// Size of the terminal viewport in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The sections of the portfolio page, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Home,
    Skills,
    About,
    Experience,
    Contact,
}

impl Section {
    /// All sections in the order they appear on the page.
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Skills,
        Section::About,
        Section::Experience,
        Section::Contact,
    ];

    /// Label shown in the navigation bar.
    pub const fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Skills => "Skills",
            Section::About => "About",
            Section::Experience => "Experience",
            Section::Contact => "Contact",
        }
    }

    /// Position of the section in page order.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }
}

/// Speed multiplier for backdrop animations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub const fn next(self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Factor applied to every angular rate of a scene.
    pub const fn multiplier(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 0.5,
            AnimationSpeed::Medium => 1.0,
            AnimationSpeed::Fast => 2.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

/// Named visual theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    #[default]
    Orchid,
    Midnight,
    Mono,
}

impl ThemeName {
    /// Cycle to the next theme.
    pub const fn next(self) -> Self {
        match self {
            ThemeName::Orchid => ThemeName::Midnight,
            ThemeName::Midnight => ThemeName::Mono,
            ThemeName::Mono => ThemeName::Orchid,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ThemeName::Orchid => "orchid",
            ThemeName::Midnight => "midnight",
            ThemeName::Mono => "mono",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_empty() {
        assert!(Viewport::new(0, 10).is_empty());
        assert!(Viewport::new(10, 0).is_empty());
        assert!(!Viewport::new(1, 1).is_empty());
    }

    #[test]
    fn test_section_order() {
        assert_eq!(Section::Home.index(), 0);
        assert_eq!(Section::Contact.index(), 4);
        assert_eq!(Section::ALL[2].label(), "About");
    }

    #[test]
    fn test_cycles_wrap() {
        assert_eq!(AnimationSpeed::Fast.next(), AnimationSpeed::Slow);
        assert_eq!(ThemeName::Mono.next(), ThemeName::Orchid);
    }
}

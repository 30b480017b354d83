//! Color themes and interaction styling.

use ratatui::style::{Color, Modifier, Style};
use vitrine_backdrop::SceneColors;
use vitrine_core::{Rgb, ThemeName};

/// A complete palette for the page and its backdrops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,
    /// Page background behind the backdrops.
    pub background: Rgb,
    /// Cards and input fields.
    pub surface: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    /// Primary accent: active nav entry, buttons, rings.
    pub accent: Rgb,
    /// Secondary accent for gradients and borders.
    pub secondary: Rgb,
    /// Deep tone for rings and links.
    pub deep: Rgb,
    /// Soft highlight: particles, headings.
    pub glow: Rgb,
    pub success: Rgb,
}

impl Theme {
    pub const ORCHID: Theme = Theme {
        name: ThemeName::Orchid,
        background: Rgb::from_hex(0x210635),
        surface: Rgb::from_hex(0x420D4B),
        text: Rgb::from_hex(0xFFFFFF),
        muted: Rgb::from_hex(0xC9A8D6),
        accent: Rgb::from_hex(0xA668C4),
        secondary: Rgb::from_hex(0x6667AB),
        deep: Rgb::from_hex(0x7B337E),
        glow: Rgb::from_hex(0xF5D5E0),
        success: Rgb::from_hex(0x10B981),
    };

    pub const MIDNIGHT: Theme = Theme {
        name: ThemeName::Midnight,
        background: Rgb::from_hex(0x000428),
        surface: Rgb::from_hex(0x002456),
        text: Rgb::from_hex(0xFFFFFF),
        muted: Rgb::from_hex(0x8FB8D8),
        accent: Rgb::from_hex(0x00FFFF),
        secondary: Rgb::from_hex(0x004E92),
        deep: Rgb::from_hex(0x004E92),
        glow: Rgb::from_hex(0xC0E8FF),
        success: Rgb::from_hex(0x34D399),
    };

    pub const MONO: Theme = Theme {
        name: ThemeName::Mono,
        background: Rgb::from_hex(0x101010),
        surface: Rgb::from_hex(0x262626),
        text: Rgb::from_hex(0xF0F0F0),
        muted: Rgb::from_hex(0x8A8A8A),
        accent: Rgb::from_hex(0xFFFFFF),
        secondary: Rgb::from_hex(0xB0B0B0),
        deep: Rgb::from_hex(0x5A5A5A),
        glow: Rgb::from_hex(0xD0D0D0),
        success: Rgb::from_hex(0xE0E0E0),
    };

    pub const fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Orchid => Self::ORCHID,
            ThemeName::Midnight => Self::MIDNIGHT,
            ThemeName::Mono => Self::MONO,
        }
    }

    /// Colors handed to the backdrop scene presets.
    pub fn scene_colors(&self) -> SceneColors {
        SceneColors {
            particle: self.glow,
            accent: self.accent,
            deep: self.deep,
            core: self.secondary,
        }
    }

    /// Base style for page text.
    pub fn base(&self) -> Style {
        Style::new().fg(self.text.into()).bg(self.background.into())
    }

    pub fn heading(&self) -> Style {
        Style::new()
            .fg(self.glow.into())
            .add_modifier(Modifier::BOLD)
    }

    pub fn body(&self) -> Style {
        Style::new().fg(self.text.into())
    }

    pub fn muted(&self) -> Style {
        Style::new().fg(self.muted.into())
    }

    pub fn accent(&self) -> Style {
        Style::new().fg(self.accent.into())
    }

    /// Style of an interactive element in a given state.
    pub fn style_for(&self, element: Element, interaction: Interaction) -> Style {
        let accent: Color = self.accent.into();
        let text: Color = self.text.into();
        let muted: Color = self.muted.into();
        let surface: Color = self.surface.into();

        match (element, interaction) {
            (Element::NavLink, Interaction::Idle) => Style::new().fg(muted),
            (Element::NavLink, Interaction::Hovered | Interaction::Focused) => {
                Style::new().fg(text).add_modifier(Modifier::UNDERLINED)
            }
            (Element::NavLink, Interaction::Active) => Style::new()
                .fg(accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),

            (Element::Button, Interaction::Idle) => Style::new()
                .fg(self.background.into())
                .bg(accent)
                .add_modifier(Modifier::BOLD),
            (Element::Button, Interaction::Hovered | Interaction::Focused) => Style::new()
                .fg(self.background.into())
                .bg(self.glow.into())
                .add_modifier(Modifier::BOLD),
            (Element::Button, Interaction::Active) => Style::new()
                .fg(text)
                .bg(self.deep.into())
                .add_modifier(Modifier::DIM),

            (Element::Input, Interaction::Idle) => Style::new().fg(text).bg(surface),
            (Element::Input, Interaction::Hovered) => {
                Style::new().fg(text).bg(self.surface.mix(self.accent, 0.15).into())
            }
            (Element::Input, Interaction::Focused | Interaction::Active) => {
                Style::new().fg(text).bg(self.surface.mix(self.accent, 0.3).into())
            }

            (Element::Card, Interaction::Idle) => Style::new().fg(self.deep.into()),
            (Element::Card, Interaction::Hovered) => Style::new().fg(self.secondary.into()),
            (Element::Card, Interaction::Focused | Interaction::Active) => {
                Style::new().fg(accent).add_modifier(Modifier::BOLD)
            }

            (Element::Badge, Interaction::Idle) => Style::new().fg(text).bg(surface),
            (Element::Badge, _) => Style::new()
                .fg(self.background.into())
                .bg(self.glow.into()),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(ThemeName::default())
    }
}

/// Kinds of element that react to interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    NavLink,
    Button,
    Input,
    /// Bordered panel, e.g. an experience entry.
    Card,
    /// Skill or tag chip.
    Badge,
}

/// Interaction state of one element. Styles are derived from this, never
/// patched onto rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Interaction {
    #[default]
    Idle,
    Hovered,
    Focused,
    Active,
}

impl Interaction {
    /// Combine the flags an element tracks into one state. Active wins over
    /// focus, focus over hover.
    pub const fn from_flags(active: bool, focused: bool, hovered: bool) -> Self {
        if active {
            Interaction::Active
        } else if focused {
            Interaction::Focused
        } else if hovered {
            Interaction::Hovered
        } else {
            Interaction::Idle
        }
    }
}

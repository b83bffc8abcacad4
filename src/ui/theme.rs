//! Colors and display switches for a frame.
//!
//! Built fresh from the active preference profile on every render, so a
//! profile edit shows up on the next frame.

use ratatui::style::{Color, Modifier, Style};

use crate::state::preferences::{Density, PreferenceProfile, ThemeMode};
use crate::state::ToastLevel;

/// Accent used when a profile's color cannot be parsed.
pub const FALLBACK_ACCENT: Color = Color::LightGreen;

pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117);
pub const COLOR_WARNING: Color = Color::Yellow;
pub const COLOR_ERROR: Color = Color::Red;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub accent: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub compact: bool,
    pub show_icons: bool,
    pub show_status_line: bool,
    pub show_download_count: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_profile(&PreferenceProfile::default())
    }
}

impl Theme {
    pub fn from_profile(profile: &PreferenceProfile) -> Self {
        let accent = profile
            .accent_rgb()
            .map_or(FALLBACK_ACCENT, |(r, g, b)| Color::Rgb(r, g, b));
        let (text, dim, border, selection_bg) = match profile.theme {
            ThemeMode::Dark => (Color::White, Color::DarkGray, Color::DarkGray, Color::Rgb(40, 40, 52)),
            ThemeMode::Light => (Color::Black, Color::Gray, Color::Gray, Color::Rgb(220, 220, 228)),
        };
        Self {
            accent,
            text,
            dim,
            border,
            selection_bg,
            compact: profile.density == Density::Compact,
            show_icons: profile.show_icons,
            show_status_line: profile.show_status_line,
            show_download_count: profile.show_download_count,
        }
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(COLOR_SUCCESS)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(COLOR_WARNING)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(COLOR_ERROR)
    }

    pub fn toast(&self, level: ToastLevel) -> Style {
        match level {
            ToastLevel::Info => self.accent(),
            ToastLevel::Success => self.success(),
            ToastLevel::Error => self.error(),
        }
    }

    /// `icon` followed by a space, or nothing when icons are off.
    pub fn icon(&self, icon: &'static str) -> &'static str {
        if self.show_icons {
            icon
        } else {
            ""
        }
    }

    /// Blank rows between sections.
    pub fn gap(&self) -> u16 {
        if self.compact {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_accent_and_mode() {
        let profile = PreferenceProfile {
            accent_color: "#60a5fa".into(),
            theme: ThemeMode::Light,
            density: Density::Compact,
            show_icons: false,
            ..PreferenceProfile::default()
        };
        let theme = Theme::from_profile(&profile);
        assert_eq!(theme.accent, Color::Rgb(0x60, 0xa5, 0xfa));
        assert_eq!(theme.text, Color::Black);
        assert!(theme.compact);
        assert_eq!(theme.gap(), 0);
        assert_eq!(theme.icon("● "), "");
    }

    #[test]
    fn test_bad_accent_falls_back() {
        let profile = PreferenceProfile {
            accent_color: "teal".into(),
            ..PreferenceProfile::default()
        };
        assert_eq!(Theme::from_profile(&profile).accent, FALLBACK_ACCENT);
    }
}

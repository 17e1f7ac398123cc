//! UI skins
//!
//! Each theme is a small palette; render functions pull styles from it
//! instead of hard-coding colours.

use crate::game::ParseSettingError;
use ratatui::style::{Color, Modifier, Style};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Neon,
    Cyberpunk,
    Retro,
    Minimal,
    Dark,
    Pastel,
    Matrix,
}

impl Theme {
    pub const ALL: [Theme; 7] = [
        Theme::Neon,
        Theme::Cyberpunk,
        Theme::Retro,
        Theme::Minimal,
        Theme::Dark,
        Theme::Pastel,
        Theme::Matrix,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Theme::Neon => "neon",
            Theme::Cyberpunk => "cyberpunk",
            Theme::Retro => "retro",
            Theme::Minimal => "minimal",
            Theme::Dark => "dark",
            Theme::Pastel => "pastel",
            Theme::Matrix => "matrix",
        }
    }

    pub fn tagline(self) -> &'static str {
        match self {
            Theme::Neon => "Glowing purple and cyan",
            Theme::Cyberpunk => "Hot pink on midnight",
            Theme::Retro => "Amber arcade cabinet",
            Theme::Minimal => "Quiet black and white",
            Theme::Dark => "Low light, soft grey",
            Theme::Pastel => "Candy colours",
            Theme::Matrix => "Green rain",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Neon => Palette {
                accent: Color::Rgb(0x9D, 0x00, 0xFF),
                highlight: Color::Rgb(0x00, 0xF5, 0xFF),
                text: Color::White,
                muted: Color::DarkGray,
                good: Color::Rgb(0x39, 0xFF, 0x14),
                bad: Color::Rgb(0xFF, 0x14, 0x93),
                warn: Color::Rgb(0xFF, 0xD7, 0x00),
            },
            Theme::Cyberpunk => Palette {
                accent: Color::Rgb(0xFF, 0x14, 0x93),
                highlight: Color::Rgb(0xFF, 0xD7, 0x00),
                text: Color::Rgb(0xE0, 0xE0, 0xFF),
                muted: Color::Rgb(0x5A, 0x5A, 0x7A),
                good: Color::Rgb(0x00, 0xF5, 0xFF),
                bad: Color::Rgb(0xFF, 0x6B, 0x00),
                warn: Color::Rgb(0xFF, 0xD7, 0x00),
            },
            Theme::Retro => Palette {
                accent: Color::Rgb(0xFF, 0xB0, 0x00),
                highlight: Color::Rgb(0xFF, 0xD7, 0x00),
                text: Color::Rgb(0xFF, 0xE4, 0xB5),
                muted: Color::Rgb(0x8B, 0x6B, 0x3A),
                good: Color::Rgb(0x9A, 0xCD, 0x32),
                bad: Color::Rgb(0xFF, 0x45, 0x00),
                warn: Color::Rgb(0xFF, 0x6B, 0x00),
            },
            Theme::Minimal => Palette {
                accent: Color::White,
                highlight: Color::White,
                text: Color::Gray,
                muted: Color::DarkGray,
                good: Color::White,
                bad: Color::Gray,
                warn: Color::White,
            },
            Theme::Dark => Palette {
                accent: Color::Rgb(0x8A, 0x8A, 0xB0),
                highlight: Color::Rgb(0xC0, 0xC0, 0xD8),
                text: Color::Rgb(0xB0, 0xB0, 0xB0),
                muted: Color::Rgb(0x50, 0x50, 0x50),
                good: Color::Rgb(0x6A, 0xB0, 0x6A),
                bad: Color::Rgb(0xB0, 0x5A, 0x5A),
                warn: Color::Rgb(0xC0, 0xA0, 0x50),
            },
            Theme::Pastel => Palette {
                accent: Color::Rgb(0xC3, 0xA6, 0xFF),
                highlight: Color::Rgb(0xA0, 0xE7, 0xE5),
                text: Color::Rgb(0xFF, 0xF5, 0xF8),
                muted: Color::Rgb(0x9E, 0x9E, 0xB8),
                good: Color::Rgb(0xB4, 0xF8, 0xC8),
                bad: Color::Rgb(0xFF, 0xAE, 0xBC),
                warn: Color::Rgb(0xFB, 0xE7, 0xC6),
            },
            Theme::Matrix => Palette {
                accent: Color::Rgb(0x00, 0xFF, 0x41),
                highlight: Color::Rgb(0x39, 0xFF, 0x14),
                text: Color::Rgb(0x00, 0xCC, 0x33),
                muted: Color::Rgb(0x00, 0x55, 0x11),
                good: Color::Rgb(0x39, 0xFF, 0x14),
                bad: Color::Rgb(0x00, 0x88, 0x22),
                warn: Color::Rgb(0xAA, 0xFF, 0xAA),
            },
        }
    }

    pub fn next(self) -> Self {
        crate::game::cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        crate::game::cycle(&Self::ALL, self, -1)
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = ParseSettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|theme| theme.name() == wanted)
            .ok_or_else(|| ParseSettingError::new("theme", s))
    }
}

/// Colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub highlight: Color,
    pub text: Color,
    pub muted: Color,
    pub good: Color,
    pub bad: Color,
    pub warn: Color,
}

impl Palette {
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    pub fn selected(&self) -> Style {
        Style::default().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn good(&self) -> Style {
        Style::default().fg(self.good).add_modifier(Modifier::BOLD)
    }

    pub fn bad(&self) -> Style {
        Style::default().fg(self.bad).add_modifier(Modifier::BOLD)
    }

    pub fn warn(&self) -> Style {
        Style::default().fg(self.warn)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.muted)
    }
}

/// Parse a "#RRGGBB" team colour. Anything else falls back to white.
pub fn hex_color(tag: &str) -> Color {
    let digits = tag.strip_prefix('#').unwrap_or(tag);
    if digits.len() != 6 {
        return Color::White;
    }
    match u32::from_str_radix(digits, 16) {
        Ok(rgb) => Color::Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8),
        Err(_) => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for theme in Theme::ALL {
            assert_eq!(theme.name().parse::<Theme>(), Ok(theme));
        }
        assert_eq!("  MATRIX ".parse::<Theme>(), Ok(Theme::Matrix));
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Theme::Matrix.next(), Theme::Neon);
        assert_eq!(Theme::Neon.prev(), Theme::Matrix);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#9D00FF"), Color::Rgb(0x9D, 0x00, 0xFF));
        assert_eq!(hex_color("#39ff14"), Color::Rgb(0x39, 0xFF, 0x14));
        assert_eq!(hex_color("#12"), Color::White);
        assert_eq!(hex_color("#GGGGGG"), Color::White);
    }
}

//! Terminal palette. Cells have no alpha channel, so opacity is emulated by
//! blending toward the color underneath.

use paintflash_protocol::{Color, ThemeToken};
use ratatui::style::Color as TermColor;

/// Strength of the fill tint at full opacity.
const FILL_ALPHA: f32 = 0.25;

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color {
        r: r as f32 / 255.0,
        g: g as f32 / 255.0,
        b: b as f32 / 255.0,
        a: 1.0,
    }
}

pub fn token_color(token: ThemeToken) -> Color {
    // Catppuccin Mocha palette
    match token {
        ThemeToken::HighlightOk | ThemeToken::HighlightOkFill => rgb(0xa6, 0xe3, 0xa1), // Green
        ThemeToken::HighlightWarn | ThemeToken::HighlightWarnFill => rgb(0xf9, 0xe2, 0xaf), // Yellow
        ThemeToken::HighlightError | ThemeToken::HighlightErrorFill => rgb(0xf3, 0x8b, 0xa8), // Red
        ThemeToken::HighlightLabelText | ThemeToken::TextPrimary => rgb(0xcd, 0xd6, 0xf4), // Text
        ThemeToken::HighlightLabelBackground | ThemeToken::Surface => rgb(0x18, 0x18, 0x25), // Mantle
        ThemeToken::TextMuted => rgb(0xa6, 0xad, 0xc8), // Subtext0
        ThemeToken::Background => rgb(0x11, 0x11, 0x1b),  // Crust
        ThemeToken::Border | ThemeToken::ComponentBorder => rgb(0x45, 0x47, 0x5a), // Surface1
        ThemeToken::ComponentFill => rgb(0x1e, 0x1e, 0x2e), // Base
    }
}

pub fn to_term(color: Color) -> TermColor {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    TermColor::Rgb(channel(color.r), channel(color.g), channel(color.b))
}

pub fn solid(token: ThemeToken) -> TermColor {
    to_term(token_color(token))
}

/// Outline color at `opacity`, drawn over `under`.
pub fn faded(token: ThemeToken, under: ThemeToken, opacity: f32) -> TermColor {
    to_term(token_color(under).lerp(token_color(token), opacity))
}

/// Background for cells inside a highlight.
pub fn tint(token: ThemeToken, under: ThemeToken, opacity: f32) -> TermColor {
    to_term(token_color(under).lerp(token_color(token), FILL_ALPHA * opacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_opacity_is_the_token_color() {
        assert_eq!(
            faded(ThemeToken::HighlightError, ThemeToken::ComponentFill, 1.0),
            TermColor::Rgb(0xf3, 0x8b, 0xa8)
        );
    }

    #[test]
    fn zero_opacity_disappears_into_background() {
        assert_eq!(
            faded(ThemeToken::HighlightOk, ThemeToken::ComponentFill, 0.0),
            solid(ThemeToken::ComponentFill)
        );
        assert_eq!(
            tint(ThemeToken::HighlightOkFill, ThemeToken::ComponentFill, 0.0),
            solid(ThemeToken::ComponentFill)
        );
    }

    #[test]
    fn tint_is_fainter_than_outline() {
        let TermColor::Rgb(_, outline_g, _) =
            faded(ThemeToken::HighlightOk, ThemeToken::ComponentFill, 1.0)
        else {
            unreachable!()
        };
        let TermColor::Rgb(_, tint_g, _) =
            tint(ThemeToken::HighlightOkFill, ThemeToken::ComponentFill, 1.0)
        else {
            unreachable!()
        };
        assert!(tint_g < outline_g);
    }
}

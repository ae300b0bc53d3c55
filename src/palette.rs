//! Colour policy for batch QR codes
//!
//! Fill colour always signals status: red for counterfeit batches, green for
//! genuine ones. The background depends on the [`Theme`] a render path uses:
//! the soft theme tints the background to match the status, the print theme
//! keeps it plain white.

use image::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fill colour for counterfeit batches (`#dc2626`)
pub const RED: Rgb<u8> = Rgb([0xdc, 0x26, 0x26]);
/// Fill colour for genuine batches (`#16a34a`)
pub const GREEN: Rgb<u8> = Rgb([0x16, 0xa3, 0x4a]);
/// Soft background behind counterfeit batches (`#fef2f2`)
pub const LIGHT_RED: Rgb<u8> = Rgb([0xfe, 0xf2, 0xf2]);
/// Soft background behind genuine batches (`#f0f9ff`)
pub const LIGHT_BLUE: Rgb<u8> = Rgb([0xf0, 0xf9, 0xff]);
/// Print background (`#ffffff`)
pub const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);

/// Named background policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Status-tinted background, used for inline previews
    Soft,
    /// White background, used for saved files
    Print,
}

impl Theme {
    /// Parse a theme identifier (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "soft" => Some(Self::Soft),
            "print" => Some(Self::Print),
            _ => None,
        }
    }

    /// Lowercase identifier as used in config files
    pub fn label(self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Print => "print",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(value)
            .ok_or_else(|| format!("Unknown theme '{value}', expected 'soft' or 'print'"))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Foreground/background pair applied to a rendered QR code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    /// Colour of dark modules
    pub fill: Rgb<u8>,
    /// Colour of light modules and the quiet zone
    pub background: Rgb<u8>,
}

/// Select the colour pair for a batch status under the given theme.
pub fn colors_for(is_counterfeit: bool, theme: Theme) -> ColorScheme {
    let fill = if is_counterfeit { RED } else { GREEN };
    let background = match (theme, is_counterfeit) {
        (Theme::Soft, true) => LIGHT_RED,
        (Theme::Soft, false) => LIGHT_BLUE,
        (Theme::Print, _) => WHITE,
    };

    ColorScheme { fill, background }
}

/// Format a colour as `#rrggbb` for logs.
pub fn hex(color: Rgb<u8>) -> String {
    let [r, g, b] = color.0;
    format!("#{r:02x}{g:02x}{b:02x}")
}

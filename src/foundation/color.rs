use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::FormError;

/// An opaque sRGB color that round-trips through `#rrggbb` strings.
///
/// Parsing accepts `#rgb` and `#rrggbb` (the leading `#` is optional, hex digits are
/// case-insensitive). Display always prints the lower-case six digit form, which is the value the
/// color adapter commits into form state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexColor {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl HexColor {
    /// Neutral grey used when a color cannot be resolved.
    pub const NEUTRAL: HexColor = HexColor::rgb(0xd4, 0xd4, 0xd4);

    /// Build a color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string.
    pub fn parse(s: &str) -> Result<Self, FormError> {
        parse_hex(s).map_err(FormError::validation)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<colorous::Color> for HexColor {
    fn from(c: colorous::Color) -> Self {
        Self::rgb(c.r, c.g, c.b)
    }
}

impl Serialize for HexColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_hex(s: &str) -> Result<HexColor, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        3 => {
            // #rgb expands each digit: "f80" -> "ff8800".
            let mut channels = [0u8; 3];
            for (slot, digit) in channels.iter_mut().zip(s.chars()) {
                let pair: String = [digit, digit].iter().collect();
                *slot = hex_byte(&pair)?;
            }
            Ok(HexColor::rgb(channels[0], channels[1], channels[2]))
        }
        6 => Ok(HexColor::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        _ => Err("hex color must be #RGB or #RRGGBB (case-insensitive)".to_owned()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;

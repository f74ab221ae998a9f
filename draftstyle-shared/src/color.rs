//! Packed RGBA colors as stored in presets and host parameters.
//!
//! Style documents keep every color as a single integer laid out as
//! `0xRRGGBBAA`. Toolkit color widgets work in `0xAARRGGBB` order, and view
//! properties receive plain `(r, g, b)` floats with the alpha channel dropped.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::StyleError;

/// A color packed into one `u32` as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedColor(pub u32);

impl PackedColor {
    /// Default fill color for new shapes (light grey, opaque).
    pub const SHAPE_DEFAULT: PackedColor = PackedColor(0xCCCC_CCFF);
    /// Opaque black, the default for lines, points and text.
    pub const BLACK: PackedColor = PackedColor(0x0000_00FF);

    pub const fn from_channels(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        PackedColor(
            ((red as u32) << 24) | ((green as u32) << 16) | ((blue as u32) << 8) | alpha as u32,
        )
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn alpha(self) -> u8 {
        self.0 as u8
    }

    /// Convert from the `0xAARRGGBB` layout used by toolkit color widgets.
    pub const fn from_argb(argb: u32) -> Self {
        PackedColor(argb.rotate_left(8))
    }

    /// Convert to the `0xAARRGGBB` layout used by toolkit color widgets.
    pub const fn to_argb(self) -> u32 {
        self.0.rotate_right(8)
    }

    /// Normalised `(r, g, b)` with alpha removed, as view properties expect.
    pub fn rgb_f32(self) -> [f32; 3] {
        [
            self.red() as f32 / 255.0,
            self.green() as f32 / 255.0,
            self.blue() as f32 / 255.0,
        ]
    }

    /// Interpret an integer stored in a style document.
    ///
    /// Returns `None` when the value does not fit in 32 bits.
    pub fn from_stored(value: i64) -> Option<Self> {
        u32::try_from(value).ok().map(PackedColor)
    }

    pub fn to_stored(self) -> i64 {
        i64::from(self.0)
    }
}

impl fmt::Display for PackedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl FromStr for PackedColor {
    type Err = StyleError;

    /// Accepts `#RRGGBB` (opaque), `#RRGGBBAA`, or a decimal packed integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literal = s.trim();
        let invalid = |reason: &str| StyleError::InvalidColor {
            literal: literal.to_string(),
            reason: reason.to_string(),
        };

        if let Some(hex) = literal.strip_prefix('#') {
            let value = u32::from_str_radix(hex, 16).map_err(|_| invalid("not a hex number"))?;
            return match hex.len() {
                6 => Ok(PackedColor((value << 8) | 0xFF)),
                8 => Ok(PackedColor(value)),
                _ => Err(invalid("expected 6 or 8 hex digits")),
            };
        }

        literal
            .parse::<u32>()
            .map(PackedColor)
            .map_err(|_| invalid("expected #RRGGBB, #RRGGBBAA or a 32-bit integer"))
    }
}

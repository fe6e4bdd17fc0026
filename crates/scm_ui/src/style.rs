//! Colours for drawn text.
//!
//! Channels are bytes because that is what the host's slot struct stores.

use std::collections::BTreeMap;

use bytemuck::{Pod, Zeroable};
use scm_shared::MAX_CHANNEL;

use crate::error::UiError;

/// RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255).
    pub a: u8,
}

impl Rgba {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Solid black.
    pub const BLACK: Self = Self::new(0, 0, 0, MAX_CHANNEL);
    /// Solid white. Seed of colour recurrences.
    pub const WHITE: Self = Self::new(MAX_CHANNEL, MAX_CHANNEL, MAX_CHANNEL, MAX_CHANNEL);

    /// Creates a color from RGBA bytes.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, MAX_CHANNEL)
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`. Missing alpha means opaque.
    ///
    /// # Errors
    ///
    /// [`UiError::InvalidHexColor`] for any other shape.
    pub fn parse_hex(s: &str) -> Result<Self, UiError> {
        let invalid = || UiError::InvalidHexColor(s.to_owned());
        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if digits.len() == 8 { channel(6)? } else { MAX_CHANNEL };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Channels as a tuple, the shape colour recurrences work with.
    #[must_use]
    pub const fn to_tuple(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }

    /// Channels in slot byte order.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self::new(r, g, b, a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// How a colour was configured, before it is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpec {
    /// Four fixed channels.
    Rgba(Rgba),
    /// A palette name, resolved on first draw.
    Named(String),
    /// A hex string, parsed on first draw.
    Hex(String),
}

impl From<Rgba> for ColorSpec {
    fn from(color: Rgba) -> Self {
        Self::Rgba(color)
    }
}

impl From<&str> for ColorSpec {
    /// `#...` is a hex string, anything else a palette name.
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            Self::Hex(s.to_owned())
        } else {
            Self::Named(s.to_owned())
        }
    }
}

/// Named colour presets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: BTreeMap<String, Rgba>,
}

impl Palette {
    /// Creates an empty palette.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            colors: BTreeMap::new(),
        }
    }

    /// The presets scripts can use by name.
    #[must_use]
    pub fn standard() -> Self {
        let mut palette = Self::empty();
        for (name, color) in [
            ("white", Rgba::WHITE),
            ("black", Rgba::BLACK),
            ("transparent", Rgba::TRANSPARENT),
            ("red", Rgba::rgb(255, 0, 0)),
            ("green", Rgba::rgb(0, 255, 0)),
            ("blue", Rgba::rgb(0, 0, 255)),
            ("yellow", Rgba::rgb(255, 255, 0)),
            ("cyan", Rgba::rgb(0, 255, 255)),
            ("magenta", Rgba::rgb(255, 0, 255)),
            ("orange", Rgba::rgb(255, 165, 0)),
            ("pink", Rgba::rgb(255, 192, 203)),
            ("purple", Rgba::rgb(128, 0, 128)),
            ("gray", Rgba::rgb(128, 128, 128)),
            ("grey", Rgba::rgb(128, 128, 128)),
            ("silver", Rgba::rgb(192, 192, 192)),
            ("gold", Rgba::rgb(255, 215, 0)),
            // HUD colours shared by the three games
            ("hud_money", Rgba::rgb(54, 104, 44)),
            ("hud_wanted", Rgba::rgb(144, 98, 16)),
            ("hud_health", Rgba::rgb(180, 25, 29)),
            ("hud_armour", Rgba::rgb(225, 225, 225)),
        ] {
            palette.insert(name, color);
        }
        palette
    }

    /// Adds or replaces a preset. Names are case-insensitive.
    pub fn insert(&mut self, name: &str, color: Rgba) {
        self.colors.insert(name.to_ascii_lowercase(), color);
    }

    /// Looks up a preset.
    ///
    /// # Errors
    ///
    /// [`UiError::UnknownColorName`] if no preset has that name.
    pub fn resolve(&self, name: &str) -> Result<Rgba, UiError> {
        self.colors
            .get(&name.to_ascii_lowercase())
            .copied()
            .ok_or_else(|| UiError::UnknownColorName(name.to_owned()))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

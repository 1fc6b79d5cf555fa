//! Colors and the explicit per-surface style state.
//!
//! [`PlotStyleContext`] carries what a drawing surface would otherwise keep
//! as hidden mutable state: the position in the color cycle and whether new
//! drawings are added to existing ones ("hold") or replace them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for anything else.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let bad = || Error::invalid(format!("invalid hex color: {hex}"));
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());
        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

/// The ten-color qualitative cycle new artists draw their colors from.
pub const DEFAULT_COLOR_CYCLE: [Rgba; 10] = [
    Rgba::rgb(31, 119, 180),
    Rgba::rgb(255, 127, 14),
    Rgba::rgb(44, 160, 44),
    Rgba::rgb(214, 39, 40),
    Rgba::rgb(148, 103, 189),
    Rgba::rgb(140, 86, 75),
    Rgba::rgb(227, 119, 194),
    Rgba::rgb(127, 127, 127),
    Rgba::rgb(188, 189, 34),
    Rgba::rgb(23, 190, 207),
];

/// Style state threaded by the caller into every drawing call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlotStyleContext {
    cycle: Vec<Rgba>,
    next: usize,
    hold: bool,
}

impl Default for PlotStyleContext {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotStyleContext {
    /// Default cycle with hold enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cycle: DEFAULT_COLOR_CYCLE.to_vec(),
            next: 0,
            hold: true,
        }
    }

    /// Replace the color cycle and restart it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an empty cycle.
    pub fn with_cycle(mut self, cycle: Vec<Rgba>) -> Result<Self> {
        if cycle.is_empty() {
            return Err(Error::invalid("color cycle must not be empty"));
        }
        self.cycle = cycle;
        self.next = 0;
        Ok(self)
    }

    /// Set whether drawings accumulate (`true`) or replace the surface.
    #[must_use]
    pub fn hold(mut self, hold: bool) -> Self {
        self.hold = hold;
        self
    }

    /// Whether drawings accumulate.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.hold
    }

    /// Change the hold flag in place.
    pub fn set_hold(&mut self, hold: bool) {
        self.hold = hold;
    }

    /// Take the next color of the cycle.
    pub fn next_color(&mut self) -> Rgba {
        let color = self.cycle[self.next % self.cycle.len()];
        self.next = (self.next + 1) % self.cycle.len();
        color
    }

    /// Restart the cycle from its first color.
    pub fn reset_cycle(&mut self) {
        self.next = 0;
    }
}

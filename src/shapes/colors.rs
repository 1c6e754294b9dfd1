//! Packed colors for fills and strokes

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGBA color type
pub type RgbaColor = [f32; 4];

/// 24-bit color packed as `0xRRGGBB`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Fill of unowned tessellation cells
    pub const BLACK: Rgb = Rgb(0x000000);
    /// Outline of tessellation cells
    pub const WHITE: Rgb = Rgb(0xffffff);

    pub const fn from_components(r: u8, g: u8, b: u8) -> Self {
        Rgb(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline]
    pub const fn red(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    #[inline]
    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    #[inline]
    pub const fn blue(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Normalised RGBA with the given alpha
    pub fn to_rgba(self, alpha: f32) -> RgbaColor {
        [
            self.red() as f32 / 255.0,
            self.green() as f32 / 255.0,
            self.blue() as f32 / 255.0,
            alpha,
        ]
    }
}

impl From<u32> for Rgb {
    fn from(value: u32) -> Self {
        Rgb(value & 0xff_ffff)
    }
}

//! Color type and display encoding.

use bytemuck::{Pod, Zeroable};
use tinyray_math::{Interval, Vec3};

/// Color type alias (linear RGB, nominally 0-1 per channel)
pub type Color = Vec3;

/// Channels are clamped to this range before quantisation.
const INTENSITY: Interval = Interval::new(0.0, 1.0);

/// An 8-bit-per-channel display color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

#[inline]
fn encode_channel(linear: f32, gamma_correct: bool) -> u8 {
    let clamped = INTENSITY.clamp(linear);
    let value = if gamma_correct {
        linear_to_gamma(clamped)
    } else {
        clamped
    };
    // NaN also ends up as 0 through the saturating cast
    (255.999 * value) as u8
}

/// Convert a linear color to 8-bit display channels.
pub fn encode_color(color: Color, gamma_correct: bool) -> Rgb8 {
    Rgb8::new(
        encode_channel(color.x, gamma_correct),
        encode_channel(color.y, gamma_correct),
        encode_channel(color.z, gamma_correct),
    )
}

/// Pack a color into 16-bit RGB565, the native format of small SPI TFT panels.
#[inline]
pub fn rgb565(color: Rgb8) -> u16 {
    ((color.r as u16 >> 3) << 11) | ((color.g as u16 >> 2) << 5) | (color.b as u16 >> 3)
}

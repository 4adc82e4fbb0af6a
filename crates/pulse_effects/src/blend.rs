//! Channel-space color blending
//!
//! The engine blends colors in integer channel space and hands the result
//! to the drawing surface as an f32 [`Color`] at paint time. Shape opacity
//! and blended alpha are independent: `interpolate` never touches the
//! alpha channel, which is written separately from the particle's opacity
//! right before painting.

use pulse_core::Color;
use serde::{Deserialize, Serialize};

/// A mutable ARGB value with integer channels
///
/// Channels are nominally 8-bit but stored as `i32` so unclamped
/// interpolation intermediates stay representable; packing clamps each
/// channel back into range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlendColor {
    pub alpha: i32,
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

impl BlendColor {
    /// Create from explicit channel values
    pub const fn new(alpha: i32, red: i32, green: i32, blue: i32) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// Unpack a 0xAARRGGBB value
    pub const fn from_packed(argb: u32) -> Self {
        Self {
            alpha: ((argb >> 24) & 0xFF) as i32,
            red: ((argb >> 16) & 0xFF) as i32,
            green: ((argb >> 8) & 0xFF) as i32,
            blue: (argb & 0xFF) as i32,
        }
    }

    /// Quantize a drawing-surface color into channel space
    pub fn from_color(color: Color) -> Self {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as i32;
        Self {
            alpha: quantize(color.a),
            red: quantize(color.r),
            green: quantize(color.g),
            blue: quantize(color.b),
        }
    }

    /// Copy all four channels from another value
    pub fn set_from(&mut self, other: &BlendColor) {
        *self = *other;
    }

    /// Replace the alpha channel from a [0, 1] fraction
    pub fn set_alpha_fraction(&mut self, fraction: f32) {
        self.alpha = (255.0 * fraction).round() as i32;
    }

    /// Scale the alpha channel by a factor
    pub fn scale_alpha(&mut self, factor: f32) {
        self.alpha = (self.alpha as f32 * factor).round() as i32;
    }

    /// Channel-wise linear blend of red/green/blue into `out`
    ///
    /// Alpha is copied from `start`, never interpolated: shape opacity is
    /// layered on separately at paint time. Channel math truncates toward
    /// zero, so a 0→255 sweep at 0.5 lands on 127.
    pub fn interpolate(start: &BlendColor, end: &BlendColor, amount: f32, out: &mut BlendColor) {
        out.set_from(start);

        out.red = (start.red as f32 + (end.red - start.red) as f32 * amount) as i32;
        out.green = (start.green as f32 + (end.green - start.green) as f32 * amount) as i32;
        out.blue = (start.blue as f32 + (end.blue - start.blue) as f32 * amount) as i32;
    }

    /// Pack into a 0xAARRGGBB value, clamping each channel into [0, 255]
    pub fn to_packed(&self) -> u32 {
        let clamp = |c: i32| c.clamp(0, 255) as u32;
        (clamp(self.alpha) << 24) | (clamp(self.red) << 16) | (clamp(self.green) << 8) | clamp(self.blue)
    }

    /// Convert to the drawing surface's f32 color
    pub fn to_color(&self) -> Color {
        let channel = |c: i32| c.clamp(0, 255) as f32 / 255.0;
        Color::rgba(
            channel(self.red),
            channel(self.green),
            channel(self.blue),
            channel(self.alpha),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_truncates() {
        let start = BlendColor::new(255, 0, 0, 0);
        let end = BlendColor::new(255, 255, 255, 255);
        let mut out = BlendColor::default();
        BlendColor::interpolate(&start, &end, 0.5, &mut out);
        assert_eq!((out.red, out.green, out.blue), (127, 127, 127));
    }

    #[test]
    fn test_interpolate_keeps_start_alpha() {
        let start = BlendColor::new(40, 0, 0, 0);
        let end = BlendColor::new(255, 255, 255, 255);
        let mut out = BlendColor::default();
        BlendColor::interpolate(&start, &end, 1.0, &mut out);
        assert_eq!(out.alpha, 40);
        assert_eq!(out.red, 255);
    }

    #[test]
    fn test_interpolate_endpoints() {
        let start = BlendColor::new(255, 10, 20, 30);
        let end = BlendColor::new(255, 200, 100, 50);
        let mut out = BlendColor::default();
        BlendColor::interpolate(&start, &end, 0.0, &mut out);
        assert_eq!(out, start);
        BlendColor::interpolate(&start, &end, 1.0, &mut out);
        assert_eq!(out, end);
    }

    #[test]
    fn test_set_alpha_fraction_rounds() {
        let mut color = BlendColor::default();
        color.set_alpha_fraction(0.5);
        assert_eq!(color.alpha, 128);
        color.set_alpha_fraction(1.0);
        assert_eq!(color.alpha, 255);
        color.set_alpha_fraction(0.0);
        assert_eq!(color.alpha, 0);
    }

    #[test]
    fn test_scale_alpha_rounds() {
        let mut color = BlendColor::new(100, 0, 0, 0);
        color.scale_alpha(0.5);
        assert_eq!(color.alpha, 50);
        color.scale_alpha(0.505);
        assert_eq!(color.alpha, 25);
    }

    #[test]
    fn test_packed_round_trip() {
        let packed = 0x80FF4020;
        assert_eq!(BlendColor::from_packed(packed).to_packed(), packed);
    }

    #[test]
    fn test_to_packed_clamps_out_of_range() {
        // An interpolation amount above 1 can push channels past 255;
        // packing clamps instead of wrapping into neighboring channels.
        let start = BlendColor::new(255, 0, 200, 0);
        let end = BlendColor::new(255, 255, 255, 255);
        let mut out = BlendColor::default();
        BlendColor::interpolate(&start, &end, 2.0, &mut out);
        assert!(out.red > 255);
        assert!(out.green > 255);
        assert_eq!(out.to_packed(), 0xFFFFFFFF);
    }

    #[test]
    fn test_to_color() {
        let color = BlendColor::new(255, 255, 0, 0).to_color();
        assert!((color.r - 1.0).abs() < 1e-6);
        assert!((color.g - 0.0).abs() < 1e-6);
        assert!((color.a - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_color_round_trip() {
        let blend = BlendColor::from_color(Color::from_packed(0xC0336699));
        assert_eq!(blend, BlendColor::new(0xC0, 0x33, 0x66, 0x99));
    }
}

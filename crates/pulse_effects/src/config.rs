//! Effect configuration
//!
//! Everything an effect instance can be tuned with, plus fail-fast
//! validation of the configurations that would otherwise degrade into
//! division-by-zero or backwards interpolation. Defaults match the
//! shipped attribute defaults: three white filled circles sweeping to a
//! 30px radius over two seconds, repeating forever.

use pulse_animation::{Easing, Repeat, RepeatMode};
use pulse_core::{Color, Point, Size};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::wave::{RenderStyle, Shape};

/// Envelope ratios used when deriving a configuration from a target
/// element's bounds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetRatios {
    /// Max width as a multiple of the target width
    pub width: f32,
    /// Max height as a multiple of the target height
    pub height: f32,
    /// Max radius as a multiple of the resting radius
    pub radius: f32,
    /// Punched-out radius as a multiple of the target's larger dimension
    pub clip: f32,
}

impl Default for TargetRatios {
    fn default() -> Self {
        Self {
            width: 1.25,
            height: 1.5,
            radius: 2.0,
            clip: 0.5,
        }
    }
}

/// A target element's on-screen placement, as supplied by the host
///
/// The host resolves the element's screen coordinates (including any
/// parent-chain offsets); the engine only consumes the final center and
/// size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetAnchor {
    pub center: Point,
    pub size: Size,
}

impl TargetAnchor {
    pub fn new(center: Point, size: Size) -> Self {
        Self { center, size }
    }
}

/// Full configuration surface of one effect instance
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    /// Wave silhouette
    pub shape: Shape,
    /// How waves are painted
    pub style: RenderStyle,
    /// Number of staggered waves
    pub count: u32,
    /// One cycle duration in milliseconds
    pub duration_ms: u32,
    /// Repeats after the first cycle
    pub repeat: Repeat,
    /// What repeat cycles do with the time parameter
    pub repeat_mode: RepeatMode,
    /// Curve applied to every wave's time parameter
    pub easing: Easing,

    /// Base wave color
    pub color: Color,
    /// Border stroke color; enables the extra stroke pass when set
    pub stroke_color: Option<Color>,
    /// Color sweep start; blending needs both endpoints
    pub color_start: Option<Color>,
    /// Color sweep end
    pub color_end: Option<Color>,
    /// Inner outline color; enables the resting-radius ring when set
    pub inner_outline_color: Option<Color>,
    pub inner_outline_width: f32,

    pub min_opacity: f32,
    pub max_opacity: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,

    pub corner_radius: f32,
    pub stroke_width: f32,
    /// Radius of the circle the indicator style punches out
    pub clip_radius: f32,

    /// Fade-in duration when the first wave starts
    pub reveal_duration_ms: u32,
    /// Fade-out duration when the effect winds down
    pub conceal_duration_ms: u32,
    /// Delay before the whole wave set starts
    pub interval_delay_ms: u32,

    /// Start animating as soon as the effect is placed
    pub auto_start: bool,
    /// Fill behind the waves
    pub background: Option<Color>,
    /// Cull waves that leave the effect bounds
    pub check_bounds: bool,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            shape: Shape::Circle,
            style: RenderStyle::Filled,
            count: 3,
            duration_ms: 2000,
            repeat: Repeat::Infinite,
            repeat_mode: RepeatMode::Restart,
            easing: Easing::Linear,
            color: Color::WHITE,
            stroke_color: None,
            color_start: None,
            color_end: None,
            inner_outline_color: None,
            inner_outline_width: 2.5,
            min_opacity: 0.0,
            max_opacity: 1.0,
            min_radius: 0.0,
            max_radius: 30.0,
            min_width: 0.0,
            max_width: 60.0,
            min_height: 0.0,
            max_height: 30.0,
            corner_radius: 0.0,
            stroke_width: 2.5,
            clip_radius: 0.0,
            reveal_duration_ms: 300,
            conceal_duration_ms: 300,
            interval_delay_ms: 0,
            auto_start: false,
            background: None,
            check_bounds: false,
        }
    }
}

impl EffectConfig {
    /// Start from defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn with_repeat_mode(mut self, mode: RepeatMode) -> Self {
        self.repeat_mode = mode;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_opacity_envelope(mut self, min: f32, max: f32) -> Self {
        self.min_opacity = min;
        self.max_opacity = max;
        self
    }

    pub fn with_radius_envelope(mut self, min: f32, max: f32) -> Self {
        self.min_radius = min;
        self.max_radius = max;
        self
    }

    pub fn with_width_envelope(mut self, min: f32, max: f32) -> Self {
        self.min_width = min;
        self.max_width = max;
        self
    }

    pub fn with_height_envelope(mut self, min: f32, max: f32) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    pub fn with_stroke(mut self, width: f32, color: Color) -> Self {
        self.stroke_width = width;
        self.stroke_color = Some(color);
        self
    }

    pub fn with_color_sweep(mut self, start: Color, end: Color) -> Self {
        self.color_start = Some(start);
        self.color_end = Some(end);
        self
    }

    pub fn with_inner_outline(mut self, width: f32, color: Color) -> Self {
        self.inner_outline_width = width;
        self.inner_outline_color = Some(color);
        self
    }

    /// Reject configurations the engine cannot animate
    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        if self.duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }

        for (name, min, max) in [
            ("opacity", self.min_opacity, self.max_opacity),
            ("radius", self.min_radius, self.max_radius),
            ("width", self.min_width, self.max_width),
            ("height", self.min_height, self.max_height),
        ] {
            if min > max {
                return Err(ConfigError::InvertedEnvelope { name, min, max });
            }
        }

        if self.max_opacity > 1.0 {
            // Legal (the opacity formula clamps) but usually a configuration
            // slip worth surfacing.
            tracing::warn!(max_opacity = self.max_opacity, "opacity envelope exceeds 1.0");
        }

        Ok(())
    }

    /// Derive the size/radius envelopes from a target element's bounds
    ///
    /// The resting envelope hugs the target; the expanded envelope scales
    /// it by the given ratios. The punched-out radius tracks the target's
    /// larger dimension and the radius envelope rests on it.
    pub fn apply_target(&mut self, anchor: &TargetAnchor, ratios: &TargetRatios) {
        self.min_width = anchor.size.width;
        self.min_height = anchor.size.height;
        self.max_width = self.min_width * ratios.width;
        self.max_height = self.min_height * ratios.height;

        self.clip_radius = anchor.size.max_dimension() * ratios.clip;
        self.min_radius = self.clip_radius;
        self.max_radius = self.min_radius * ratios.radius;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(EffectConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_count_rejected() {
        let config = EffectConfig::new().with_count(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroCount));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let config = EffectConfig::new().with_duration_ms(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));
    }

    #[test]
    fn test_inverted_envelope_rejected() {
        let config = EffectConfig::new().with_radius_envelope(50.0, 10.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvertedEnvelope {
                name: "radius",
                min: 50.0,
                max: 10.0,
            })
        );
    }

    #[test]
    fn test_apply_target_default_ratios() {
        let mut config = EffectConfig::new();
        let anchor = TargetAnchor::new(Point::new(200.0, 300.0), Size::new(100.0, 40.0));
        config.apply_target(&anchor, &TargetRatios::default());

        assert!((config.min_width - 100.0).abs() < 1e-6);
        assert!((config.max_width - 125.0).abs() < 1e-6);
        assert!((config.min_height - 40.0).abs() < 1e-6);
        assert!((config.max_height - 60.0).abs() < 1e-6);
        assert!((config.clip_radius - 50.0).abs() < 1e-6);
        assert!((config.min_radius - 50.0).abs() < 1e-6);
        assert!((config.max_radius - 100.0).abs() < 1e-6);
    }
}

//! Pulse Effects
//!
//! An animated ripple/indicator effect engine: N staggered waves
//! (expanding circles or rounded rectangles) sweep radius, size, opacity,
//! and color envelopes over a normalized time parameter and paint
//! themselves onto a 2D drawing surface.
//!
//! The engine is deliberately passive. The host owns the frame clock and
//! the real canvas; the effect turns frame deltas into wave state and wave
//! state into draw commands:
//!
//! ```ignore
//! use pulse_core::RecordingSurface;
//! use pulse_effects::{EffectConfig, PulseEffect, RenderStyle, Shape, TargetAnchor};
//!
//! let config = EffectConfig::new()
//!     .with_shape(Shape::Circle)
//!     .with_style(RenderStyle::IndicatorClip)
//!     .with_count(3)
//!     .with_duration_ms(2000);
//!
//! let mut effect = PulseEffect::new(config)?;
//! effect.attach_to_target(TargetAnchor::new(button_center, button_size));
//! effect.start();
//!
//! // Per frame, from the host's animation callback:
//! effect.advance(frame_dt_ms);
//! let mut surface = RecordingSurface::from_size(viewport);
//! effect.paint(&mut surface);
//! backend.replay(surface.take_commands());
//! ```
//!
//! # Components
//!
//! - [`blend::BlendColor`] — integer channel-space color blending
//! - [`particle::Particle`] — base kinematic/opacity/lifetime state
//! - [`wave::WaveParticle`] — the envelope-driven wave with its render
//!   style (outline, filled, or clip-punched indicator ring)
//! - [`config::EffectConfig`] — the validated configuration surface
//! - [`effect::PulseEffect`] — N wave slots, staggered clocks, and the
//!   reveal/conceal lifecycle

pub mod blend;
pub mod config;
pub mod effect;
pub mod error;
pub mod particle;
pub mod wave;

pub use blend::BlendColor;
pub use config::{EffectConfig, TargetAnchor, TargetRatios};
pub use effect::{EffectState, PulseEffect};
pub use error::{ConfigError, Result};
pub use particle::Particle;
pub use wave::{RenderStyle, Shape, WaveParticle};

// Re-export the pieces hosts need without importing the sibling crates.
pub use pulse_animation::{Easing, Repeat, RepeatMode};
pub use pulse_core::{Color, DrawCommand, DrawSurface, Point, Rect, RecordingSurface, Size};

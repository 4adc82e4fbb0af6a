//! Pulse Animation
//!
//! Normalized-time plumbing for the Pulse effect engine.
//!
//! # Features
//!
//! - **Easing**: the interpolation curves effect waves run under
//! - **CycleClock**: a repeating, delayable clock emitting `t ∈ [0, 1]`,
//!   one per particle, with restart/reverse repeat modes
//! - **Stagger**: start-delay computation spreading N clocks across one
//!   cycle duration
//! - **FadeTransition**: reveal/conceal alpha ramps for effect lifecycle
//!
//! The engine is driven, not self-clocking: the host calls `advance` with
//! frame deltas and the clocks hand back normalized time. Stopping the
//! host tick source is the only cancellation mechanism.

pub mod clock;
pub mod easing;
pub mod transition;

pub use clock::{stagger_delays, ClockTick, CycleClock, Repeat, RepeatMode};
pub use easing::Easing;
pub use transition::FadeTransition;

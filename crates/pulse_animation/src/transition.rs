//! Reveal/conceal fade transitions
//!
//! Effects fade their whole canvas alpha in when the first wave starts and
//! out when the last wave ends. A `FadeTransition` is that ramp: a timed
//! sweep between two alpha values under an easing curve, with a
//! zero-duration fast path that completes immediately.

use crate::easing::Easing;

/// A timed alpha ramp
#[derive(Clone, Debug)]
pub struct FadeTransition {
    from: f32,
    to: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

impl FadeTransition {
    /// Create a ramp between two alpha values
    pub fn new(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms as f32,
            elapsed_ms: 0.0,
            easing,
        }
    }

    /// Fade in from fully transparent, decelerating
    pub fn reveal(duration_ms: u32) -> Self {
        Self::new(0.0, 1.0, duration_ms, Easing::Decelerate)
    }

    /// Fade out to fully transparent at a constant rate
    pub fn conceal(duration_ms: u32) -> Self {
        Self::new(1.0, 0.0, duration_ms, Easing::Linear)
    }

    /// Advance by a frame delta and return the current alpha
    pub fn advance(&mut self, dt_ms: f32) -> f32 {
        self.elapsed_ms += dt_ms.max(0.0);
        self.value()
    }

    /// The current alpha value
    pub fn value(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let progress = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        let eased = self.easing.apply(progress);
        self.from + (self.to - self.from) * eased
    }

    /// Whether the ramp has reached its end value
    pub fn is_complete(&self) -> bool {
        self.duration_ms <= 0.0 || self.elapsed_ms >= self.duration_ms
    }
}

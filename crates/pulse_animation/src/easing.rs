//! Easing functions
//!
//! The three curves effect waves are driven with: linear for steady
//! indicator pulses, decelerate for reveals, accelerate-decelerate for
//! ripple sweeps.

use serde::{Deserialize, Serialize};

/// An easing curve mapping linear time to eased time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Easing {
    /// Constant rate
    #[default]
    Linear,
    /// Fast start, slowing toward the end
    Decelerate,
    /// Slow start and end, fastest in the middle
    AccelerateDecelerate,
}

impl Easing {
    /// Apply the curve to a normalized time value
    ///
    /// Input outside [0, 1] is clamped before evaluation.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::AccelerateDecelerate => {
                (((t + 1.0) * std::f32::consts::PI).cos() / 2.0) + 0.5
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_curves_hit_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::Decelerate,
            Easing::AccelerateDecelerate,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_linear_is_identity() {
        assert!((Easing::Linear.apply(0.25) - 0.25).abs() < 1e-6);
        assert!((Easing::Linear.apply(0.75) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_decelerate_leads_linear() {
        // A decelerating curve is ahead of linear time mid-flight.
        assert!(Easing::Decelerate.apply(0.5) > 0.5);
    }

    #[test]
    fn test_accelerate_decelerate_midpoint() {
        assert!((Easing::AccelerateDecelerate.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::AccelerateDecelerate.apply(0.25) < 0.25);
        assert!(Easing::AccelerateDecelerate.apply(0.75) > 0.75);
    }

    #[test]
    fn test_out_of_range_input_clamps() {
        assert!((Easing::Linear.apply(-0.5)).abs() < 1e-6);
        assert!((Easing::Linear.apply(1.5) - 1.0).abs() < 1e-6);
    }
}

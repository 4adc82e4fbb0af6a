//! Cycle clocks and stagger computation
//!
//! A `CycleClock` turns host frame deltas into the normalized time value
//! `t ∈ [0, 1]` that drives one particle. Clocks carry a start delay so N
//! of them animate out of phase; `stagger_delays` computes the canonical
//! spread of one cycle duration across N particles.

use serde::{Deserialize, Serialize};

/// How many times a clock repeats after its first cycle
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    /// Run the first cycle plus this many repeats, then finish
    Times(u32),
    /// Never finish
    #[default]
    Infinite,
}

/// What a repeat cycle does with the time parameter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Every cycle sweeps 0 → 1
    #[default]
    Restart,
    /// Odd cycles sweep 1 → 0
    Reverse,
}

/// Result of advancing a clock by one frame delta
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClockTick {
    /// Normalized time for this frame; `None` while still inside the start
    /// delay window or after the clock has finished
    pub value: Option<f32>,
    /// True on the first tick past the start delay
    pub just_started: bool,
    /// True on the tick that exhausted the final cycle
    pub just_finished: bool,
}

/// A repeating, delayable normalized-time clock
///
/// Construction does not validate the duration; callers reject
/// zero-duration configurations before building clocks.
#[derive(Clone, Debug)]
pub struct CycleClock {
    duration_ms: u32,
    start_delay_ms: u32,
    repeat: Repeat,
    mode: RepeatMode,
    elapsed_ms: f64,
    started: bool,
    finished: bool,
}

impl CycleClock {
    /// Create a clock with a cycle duration and a start delay
    pub fn new(duration_ms: u32, start_delay_ms: u32) -> Self {
        Self {
            duration_ms,
            start_delay_ms,
            repeat: Repeat::Infinite,
            mode: RepeatMode::Restart,
            elapsed_ms: 0.0,
            started: false,
            finished: false,
        }
    }

    /// Set the repeat count
    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set the repeat mode
    pub fn with_repeat_mode(mut self, mode: RepeatMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn start_delay_ms(&self) -> u32 {
        self.start_delay_ms
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Rewind to the pre-start state
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.started = false;
        self.finished = false;
    }

    /// Advance by a frame delta and report the clock state
    pub fn advance(&mut self, dt_ms: f32) -> ClockTick {
        if self.finished {
            return ClockTick::default();
        }

        if self.duration_ms == 0 {
            // Config validation rejects zero durations; degrade instead of
            // dividing by zero if one slips through.
            tracing::warn!("zero-duration cycle clock, finishing immediately");
            self.finished = true;
            return ClockTick {
                value: None,
                just_started: false,
                just_finished: true,
            };
        }

        self.elapsed_ms += f64::from(dt_ms.max(0.0));
        let active_ms = self.elapsed_ms - f64::from(self.start_delay_ms);
        if active_ms < 0.0 {
            return ClockTick::default();
        }

        let just_started = !self.started;
        self.started = true;

        let duration = f64::from(self.duration_ms);
        let cycle = (active_ms / duration) as u64;
        let total_cycles = match self.repeat {
            Repeat::Times(extra) => Some(u64::from(extra) + 1),
            Repeat::Infinite => None,
        };

        if let Some(total) = total_cycles {
            if cycle >= total {
                // Deliver the resting value of the last cycle, then go idle.
                self.finished = true;
                let final_t = self.cycle_value(total - 1, 1.0);
                return ClockTick {
                    value: Some(final_t),
                    just_started,
                    just_finished: true,
                };
            }
        }

        let fraction = ((active_ms % duration) / duration) as f32;
        ClockTick {
            value: Some(self.cycle_value(cycle, fraction)),
            just_started,
            just_finished: false,
        }
    }

    fn cycle_value(&self, cycle: u64, fraction: f32) -> f32 {
        match self.mode {
            RepeatMode::Restart => fraction,
            RepeatMode::Reverse => {
                if cycle % 2 == 0 {
                    fraction
                } else {
                    1.0 - fraction
                }
            }
        }
    }
}

/// Start delays spreading `count` clocks across one `duration_ms` cycle
///
/// Integer-division semantics: the per-particle step is `duration / count`
/// rounded down, and delays are multiples of that step.
pub fn stagger_delays(duration_ms: u32, count: u32) -> impl Iterator<Item = u32> {
    let step = if count == 0 { 0 } else { duration_ms / count };
    (0..count).map(move |i| i * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stagger_delays_integer_division() {
        let delays: Vec<u32> = stagger_delays(2000, 3).collect();
        assert_eq!(delays, vec![0, 666, 1332]);
    }

    #[test]
    fn test_stagger_delays_even_split() {
        let delays: Vec<u32> = stagger_delays(1000, 4).collect();
        assert_eq!(delays, vec![0, 250, 500, 750]);
    }

    #[test]
    fn test_clock_waits_out_start_delay() {
        let mut clock = CycleClock::new(1000, 500);
        let tick = clock.advance(499.0);
        assert_eq!(tick.value, None);
        assert!(!tick.just_started);
        assert!(!clock.is_started());

        let tick = clock.advance(1.0);
        assert!(tick.just_started);
        assert!(clock.is_started());
        assert!((tick.value.unwrap() - 0.0).abs() < 1e-4);
    }

    #[test]
    fn test_clock_sweeps_zero_to_one() {
        let mut clock = CycleClock::new(1000, 0);
        assert!((clock.advance(0.0).value.unwrap() - 0.0).abs() < 1e-4);
        assert!((clock.advance(250.0).value.unwrap() - 0.25).abs() < 1e-4);
        assert!((clock.advance(500.0).value.unwrap() - 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_infinite_clock_wraps() {
        let mut clock = CycleClock::new(1000, 0);
        let tick = clock.advance(1250.0);
        assert!((tick.value.unwrap() - 0.25).abs() < 1e-4);
        assert!(!tick.just_finished);
        assert!(!clock.is_finished());
    }

    #[test]
    fn test_reverse_mode_mirrors_odd_cycles() {
        let mut clock = CycleClock::new(1000, 0).with_repeat_mode(RepeatMode::Reverse);
        // 1250ms in: second cycle, fraction 0.25, mirrored to 0.75.
        let tick = clock.advance(1250.0);
        assert!((tick.value.unwrap() - 0.75).abs() < 1e-4);
        // 2250ms in: third cycle, forward again.
        let tick = clock.advance(1000.0);
        assert!((tick.value.unwrap() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn test_finite_clock_finishes_at_rest_value() {
        let mut clock = CycleClock::new(1000, 0).with_repeat(Repeat::Times(1));
        // Two cycles total; past 2000ms the clock finishes resting at 1.0.
        let tick = clock.advance(2100.0);
        assert!(tick.just_finished);
        assert!((tick.value.unwrap() - 1.0).abs() < 1e-4);
        assert!(clock.is_finished());

        let tick = clock.advance(100.0);
        assert_eq!(tick.value, None);
        assert!(!tick.just_finished);
    }

    #[test]
    fn test_finite_reverse_clock_rests_at_zero() {
        let mut clock = CycleClock::new(1000, 0)
            .with_repeat(Repeat::Times(1))
            .with_repeat_mode(RepeatMode::Reverse);
        // Last cycle is odd, so the resting value is the mirrored end.
        let tick = clock.advance(2100.0);
        assert!(tick.just_finished);
        assert!((tick.value.unwrap() - 0.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset_rewinds() {
        let mut clock = CycleClock::new(1000, 0).with_repeat(Repeat::Times(0));
        clock.advance(1500.0);
        assert!(clock.is_finished());
        clock.reset();
        assert!(!clock.is_started());
        assert!(!clock.is_finished());
        assert!((clock.advance(100.0).value.unwrap() - 0.1).abs() < 1e-4);
    }
}

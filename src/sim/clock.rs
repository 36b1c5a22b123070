//! Fixed-rate tick pacing for a variable-rate frame callback
//!
//! The renderer calls `advance` once per frame with its timestamp. The clock
//! answers whether this frame should run a simulation tick. At most one tick
//! is granted per frame; a long stall yields a single tick, never a burst.

use serde::{Deserialize, Serialize};

/// Clock state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClockState {
    /// No timestamp seen since creation or the last `stop`
    Idle,
    /// Armed; holds the timestamp of the last tick (or of arming)
    Ticking { last_tick_ms: f64 },
}

/// Converts frame timestamps into fixed-rate simulation ticks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    interval_ms: f64,
    state: ClockState,
}

impl SimClock {
    /// Clock granting `tick_rate` ticks per second.
    ///
    /// Non-positive or non-finite rates fall back to the default rate.
    pub fn new(tick_rate: f64) -> Self {
        let rate = if tick_rate.is_finite() && tick_rate > 0.0 {
            tick_rate
        } else {
            log::warn!("Invalid tick rate {}, using default", tick_rate);
            crate::consts::DEFAULT_TICK_RATE
        };
        Self {
            interval_ms: 1000.0 / rate,
            state: ClockState::Idle,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ClockState::Idle
    }

    /// Feed one frame timestamp (milliseconds, monotonic). Returns true if
    /// the caller should run exactly one tick now.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        // A NaN or infinite stamp would poison `last_tick_ms` for good
        if !now_ms.is_finite() {
            log::warn!("Ignoring non-finite frame timestamp {}", now_ms);
            return false;
        }
        match self.state {
            ClockState::Idle => {
                self.state = ClockState::Ticking { last_tick_ms: now_ms };
                false
            }
            ClockState::Ticking { last_tick_ms } => {
                if now_ms - last_tick_ms < self.interval_ms {
                    return false;
                }
                self.state = ClockState::Ticking { last_tick_ms: now_ms };
                true
            }
        }
    }

    /// Drop the recorded timestamp; the next frame only re-arms the clock
    pub fn stop(&mut self) {
        self.state = ClockState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_frame_only_arms() {
        let mut clock = SimClock::new(2.0);
        assert!(clock.is_idle());
        assert!(!clock.advance(10_000.0));
        assert_eq!(clock.state(), ClockState::Ticking { last_tick_ms: 10_000.0 });
    }

    #[test]
    fn test_half_interval_frames_alternate() {
        let mut clock = SimClock::new(2.0);
        let half = clock.interval_ms() / 2.0;
        assert!(!clock.advance(0.0));

        let ticks: Vec<bool> = (1..=8).map(|i| clock.advance(i as f64 * half)).collect();
        assert_eq!(ticks, vec![false, true, false, true, false, true, false, true]);
    }

    #[test]
    fn test_stall_yields_one_tick() {
        let mut clock = SimClock::new(2.0);
        clock.advance(0.0);
        assert!(clock.advance(10_000.0));
        // No catch-up on following frames
        assert!(!clock.advance(10_016.0));
        assert!(!clock.advance(10_400.0));
        assert!(clock.advance(10_500.0));
    }

    #[test]
    fn test_stop_rearms() {
        let mut clock = SimClock::new(2.0);
        clock.advance(0.0);
        clock.stop();
        assert!(!clock.advance(5_000.0));
        assert!(!clock.advance(5_200.0));
        assert!(clock.advance(5_500.0));
    }

    #[test]
    fn test_non_finite_timestamp_ignored() {
        let mut clock = SimClock::new(2.0);
        assert!(!clock.advance(f64::NAN));
        assert!(clock.is_idle());

        clock.advance(0.0);
        assert!(!clock.advance(f64::NAN));
        assert!(!clock.advance(f64::INFINITY));
        assert!(!clock.advance(f64::NEG_INFINITY));
        assert_eq!(clock.state(), ClockState::Ticking { last_tick_ms: 0.0 });

        // Still ticks normally afterwards
        assert!(clock.advance(500.0));
        assert!(!clock.advance(501.0));
    }

    #[test]
    fn test_invalid_rate_falls_back() {
        assert_eq!(SimClock::new(0.0).interval_ms(), 500.0);
        assert_eq!(SimClock::new(f64::NAN).interval_ms(), 500.0);
        assert_eq!(SimClock::new(4.0).interval_ms(), 250.0);
    }

    proptest! {
        #[test]
        fn prop_never_faster_than_rate(gaps in proptest::collection::vec(0.0f64..2_000.0, 1..200)) {
            let mut clock = SimClock::new(2.0);
            let mut now = 0.0;
            clock.advance(now);
            let mut last_tick = now;
            for gap in gaps {
                now += gap;
                if clock.advance(now) {
                    prop_assert!(now - last_tick >= clock.interval_ms());
                    last_tick = now;
                }
            }
        }
    }
}

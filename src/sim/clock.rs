//! Millisecond clock sources for the simulation
//!
//! The enemy drop timer runs on wall-clock time, not tick counts, so the
//! simulation reads time through [`Clock`] and hosts/tests pick the source.

use std::cell::Cell;

/// A monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin. Never decreases.
    fn now_ms(&self) -> u64;
}

/// Clock that only moves when told to
///
/// Used by tests, and by the browser host which feeds it
/// `requestAnimationFrame` timestamps.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Jump to an absolute time; earlier values are ignored to stay monotonic
    pub fn set(&self, ms: u64) {
        if ms > self.now.get() {
            self.now.set(ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Real monotonic clock backed by `std::time::Instant`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for MonotonicClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Fixed-timestep accumulator for hosts driven by frame timestamps
///
/// Each call to [`FixedStep::advance`] reports how many ticks to run for
/// the time elapsed since the previous call. At most `max_substeps` are
/// granted per call; time beyond that is dropped rather than carried into
/// later frames.
#[derive(Debug, Clone)]
pub struct FixedStep {
    step_ms: f64,
    max_substeps: u32,
    accumulator: f64,
    last_time: f64,
}

impl FixedStep {
    pub fn new(step_ms: u64, max_substeps: u32, now_ms: f64) -> Self {
        Self {
            step_ms: step_ms.max(1) as f64,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            last_time: now_ms,
        }
    }

    /// Number of ticks due at frame time `now_ms`
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let dt = (now_ms - self.last_time).max(0.0);
        self.last_time = now_ms;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step_ms && substeps < self.max_substeps {
            self.accumulator -= self.step_ms;
            substeps += 1;
        }
        if substeps == self.max_substeps {
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Unspent time carried into the next frame
    pub fn pending_ms(&self) -> f64 {
        self.accumulator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now_ms(), 100);
        clock.advance(250);
        assert_eq!(clock.now_ms(), 350);
    }

    #[test]
    fn test_manual_clock_never_goes_back() {
        let clock = ManualClock::new(1000);
        clock.set(400);
        assert_eq!(clock.now_ms(), 1000);
        clock.set(1500);
        assert_eq!(clock.now_ms(), 1500);
    }

    #[test]
    fn test_monotonic_clock_is_monotonic() {
        let clock = MonotonicClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn test_fixed_step_carries_remainder() {
        let mut steps = FixedStep::new(10, 8, 0.0);
        assert_eq!(steps.advance(16.0), 1);
        assert_eq!(steps.advance(22.0), 1);
        assert_eq!(steps.pending_ms(), 2.0);
        assert_eq!(steps.advance(40.0), 2);
    }

    #[test]
    fn test_fixed_step_drops_backlog_after_long_frame() {
        let mut steps = FixedStep::new(10, 8, 0.0);
        // A one second stall only buys the maximum
        assert_eq!(steps.advance(1000.0), 8);
        assert_eq!(steps.pending_ms(), 0.0);
        // The next normal frame is back to normal
        assert_eq!(steps.advance(1010.0), 1);
        assert_eq!(steps.advance(1020.0), 1);
    }

    #[test]
    fn test_fixed_step_ignores_time_going_back() {
        let mut steps = FixedStep::new(10, 8, 100.0);
        assert_eq!(steps.advance(50.0), 0);
        assert_eq!(steps.advance(60.0), 1);
    }
}

use std::fmt;
use std::time::Duration;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SimTime
// ---------------------------------------------------------------------------

/// Integer-nanosecond simulation clock.
///
/// The blend ramp integrates `dt` every tick; tracking elapsed time as a
/// monotonically increasing `u64` nanosecond count keeps long-running scenes
/// free of floating-point drift.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
    Resource,
)]
pub struct SimTime {
    nanos: u64,
}

impl SimTime {
    /// A clock at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { nanos: 0 }
    }

    /// Build from a raw nanosecond count.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Build from seconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_secs(secs: f64) -> Self {
        Self {
            nanos: (secs * 1_000_000_000.0).round() as u64,
        }
    }

    /// Raw nanosecond count.
    #[must_use]
    pub const fn nanos(&self) -> u64 {
        self.nanos
    }

    /// Elapsed seconds as `f32` (the precision the blend math runs at).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn secs_f32(&self) -> f32 {
        self.nanos as f32 / 1_000_000_000.0
    }

    /// Elapsed seconds as `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn secs_f64(&self) -> f64 {
        self.nanos as f64 / 1_000_000_000.0
    }

    /// Advance the clock by `delta_secs` seconds.
    ///
    /// The delta is rounded to the nearest nanosecond so repeated
    /// non-representable steps (1/60 s) do not drift low.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn advance_secs(&mut self, delta_secs: f64) {
        let delta_nanos = (delta_secs * 1_000_000_000.0).round() as u64;
        self.nanos = self.nanos.saturating_add(delta_nanos);
    }

    /// Number of complete ticks of `dt_secs` that fit in the current time.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn tick_count(&self, dt_secs: f64) -> u64 {
        let dt_nanos = (dt_secs * 1_000_000_000.0).round() as u64;
        if dt_nanos == 0 {
            return 0;
        }
        self.nanos / dt_nanos
    }

    /// Reset the clock to zero.
    pub fn reset(&mut self) {
        self.nanos = 0;
    }

    /// Convert to a standard [`Duration`].
    #[must_use]
    pub const fn to_duration(&self) -> Duration {
        Duration::from_nanos(self.nanos)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.nanos / 1_000_000_000;
        let remaining_nanos = self.nanos % 1_000_000_000;
        let millis = remaining_nanos / 1_000_000;
        let micros = (remaining_nanos % 1_000_000) / 1_000;
        write!(f, "{total_secs}.{millis:03}{micros:03}s")
    }
}

// ---------------------------------------------------------------------------
// TickLoop
// ---------------------------------------------------------------------------

/// Fixed-timestep dispenser for driving blend ticks outside the ECS.
///
/// Feed wall-clock deltas with [`accumulate`](Self::accumulate), then drain
/// with [`next_tick`](Self::next_tick). The per-frame tick cap prevents an
/// unbounded catch-up burst after a stall.
#[derive(Debug, Clone)]
pub struct TickLoop {
    accumulated: u64,
    dt_nanos: u64,
    dt_secs: f32,
    max_ticks: u32,
    ticks_this_frame: u32,
}

impl TickLoop {
    /// Create a tick loop with the given fixed timestep in seconds.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(dt_secs: f32) -> Self {
        Self {
            accumulated: 0,
            dt_nanos: (f64::from(dt_secs) * 1_000_000_000.0) as u64,
            dt_secs,
            max_ticks: 8,
            ticks_this_frame: 0,
        }
    }

    /// Set the maximum number of ticks dispensed per frame.
    #[must_use]
    pub const fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Feed a frame delta and reset the per-frame tick counter.
    #[allow(clippy::cast_possible_truncation)]
    pub fn accumulate(&mut self, delta: Duration) {
        self.accumulated = self.accumulated.saturating_add(delta.as_nanos() as u64);
        self.ticks_this_frame = 0;
    }

    /// Take one tick's worth of time if available, returning the tick `dt`.
    ///
    /// Returns `None` once the accumulator is drained or the per-frame cap
    /// is hit.
    pub fn next_tick(&mut self) -> Option<f32> {
        if self.ticks_this_frame >= self.max_ticks {
            return None;
        }
        if self.accumulated >= self.dt_nanos {
            self.accumulated -= self.dt_nanos;
            self.ticks_this_frame += 1;
            return Some(self.dt_secs);
        }
        None
    }

    /// The fixed timestep in seconds.
    #[must_use]
    pub const fn dt(&self) -> f32 {
        self.dt_secs
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- SimTime ----

    #[test]
    fn simtime_new_is_zero() {
        assert_eq!(SimTime::new().nanos(), 0);
    }

    #[test]
    fn simtime_from_secs() {
        let t = SimTime::from_secs(2.5);
        assert_eq!(t.nanos(), 2_500_000_000);
    }

    #[test]
    fn simtime_advance_accumulates() {
        let mut t = SimTime::new();
        t.advance_secs(0.5);
        t.advance_secs(0.25);
        assert_eq!(t.nanos(), 750_000_000);
    }

    #[test]
    fn simtime_secs_conversions() {
        let t = SimTime::from_nanos(1_500_000_000);
        assert!((t.secs_f64() - 1.5).abs() < 1e-9);
        assert!((t.secs_f32() - 1.5).abs() < 1e-4);
    }

    #[test]
    fn simtime_advance_rounds_to_nearest_nano() {
        let mut t = SimTime::new();
        for _ in 0..3 {
            t.advance_secs(1.0 / 60.0);
        }
        // 1/60 s is 16_666_666.6 ns; truncation would land 2 ns short.
        assert_eq!(t.nanos(), 3 * 16_666_667);
        assert!((t.secs_f64() - 3.0 / 60.0).abs() < 1e-8);
    }

    #[test]
    fn simtime_tick_count() {
        let mut t = SimTime::new();
        for _ in 0..60 {
            t.advance_secs(1.0 / 60.0);
        }
        // 60 ticks of 1/60 s is one second of simulated time.
        assert_eq!(t.tick_count(1.0 / 60.0), 60);
        assert_eq!(t.tick_count(0.0), 0);
    }

    #[test]
    fn simtime_reset() {
        let mut t = SimTime::from_secs(3.0);
        t.reset();
        assert_eq!(t.nanos(), 0);
    }

    #[test]
    fn simtime_to_duration() {
        let t = SimTime::from_secs(1.5);
        assert_eq!(t.to_duration(), Duration::from_millis(1500));
    }

    #[test]
    fn simtime_display() {
        let t = SimTime::from_nanos(1_234_567_890);
        assert_eq!(format!("{t}"), "1.234567s");
    }

    #[test]
    fn simtime_ordering() {
        assert!(SimTime::from_secs(1.0) < SimTime::from_secs(2.0));
        assert_eq!(SimTime::from_secs(1.0), SimTime::from_secs(1.0));
    }

    // ---- TickLoop ----

    #[test]
    fn tickloop_dispenses_whole_ticks() {
        let mut ticks = TickLoop::new(0.01);
        ticks.accumulate(Duration::from_millis(35));
        let mut count = 0;
        while let Some(dt) = ticks.next_tick() {
            assert!((dt - 0.01).abs() < f32::EPSILON);
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[test]
    fn tickloop_caps_ticks_per_frame() {
        let mut ticks = TickLoop::new(0.01).with_max_ticks(2);
        ticks.accumulate(Duration::from_millis(100));
        let mut count = 0;
        while ticks.next_tick().is_some() {
            count += 1;
        }
        assert_eq!(count, 2);
    }

    #[test]
    fn tickloop_carries_remainder() {
        let mut ticks = TickLoop::new(0.01);
        ticks.accumulate(Duration::from_millis(15));
        assert!(ticks.next_tick().is_some());
        assert!(ticks.next_tick().is_none());
        // 5 ms carried over; another 5 ms completes a tick.
        ticks.accumulate(Duration::from_millis(5));
        assert!(ticks.next_tick().is_some());
    }

    #[test]
    fn tickloop_dt_accessor() {
        let ticks = TickLoop::new(1.0 / 120.0);
        assert!((ticks.dt() - 1.0 / 120.0).abs() < f32::EPSILON);
    }
}

//! Linear blend-weight ramp law.
//!
//! The ramp is linear, not eased: every tick moves the weight by
//! `(dt / RAMP_DIVISOR) * speed`. At `speed = 10` a full 0→1 ramp takes one
//! second; at `speed = 1` it takes ten.

/// Divisor in the rate law. `speed / RAMP_DIVISOR` is the weight change per
/// second.
pub const RAMP_DIVISOR: f32 = 10.0;

/// Default blend speed: a one-second full ramp.
pub const DEFAULT_SPEED: f32 = 10.0;

/// Maximum configurable blend speed (a 0.5-second full ramp).
pub const MAX_SPEED: f32 = 20.0;

/// Weight change for one tick of `dt` seconds at the given speed.
#[must_use]
pub fn weight_step(dt: f32, speed: f32) -> f32 {
    (dt / RAMP_DIVISOR) * speed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

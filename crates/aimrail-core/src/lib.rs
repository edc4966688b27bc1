// aimrail-core: system-set ordering, config, time, and errors for the
// aimrail IK blending toolkit.

pub mod config;
pub mod error;
pub mod time;

use bevy::prelude::*;

use crate::config::SimConfig;
use crate::time::SimTime;

// ---------------------------------------------------------------------------
// AimrailSet
// ---------------------------------------------------------------------------

/// System-set ordering for the blend pipeline, chained in `Update`:
/// scene sampling, then episode starts, then the per-tick blend.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AimrailSet {
    /// Sample scene object positions into the scene index.
    Sense,
    /// Handle episode-start events (target capture, registry flag flips).
    Retarget,
    /// Advance blend weights and emit IK directives.
    Blend,
}

// ---------------------------------------------------------------------------
// AimrailCorePlugin
// ---------------------------------------------------------------------------

/// Core plugin: inserts [`SimConfig`] and [`SimTime`], configures the
/// [`AimrailSet`] chain, and advances the simulation clock each frame.
pub struct AimrailCorePlugin;

impl Plugin for AimrailCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimTime>()
            .configure_sets(
                Update,
                (AimrailSet::Sense, AimrailSet::Retarget, AimrailSet::Blend).chain(),
            )
            .add_systems(Update, advance_sim_time.in_set(AimrailSet::Sense));

        if !app.world().contains_resource::<SimConfig>() {
            app.insert_resource(SimConfig::default());
        }
    }
}

/// Advances [`SimTime`] by one `control_dt` per frame.
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters are extracted by value
fn advance_sim_time(config: Res<SimConfig>, mut time: ResMut<SimTime>) {
    time.advance_secs(config.control_dt);
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::error::{AimrailError, ConfigError};
    pub use crate::time::{SimTime, TickLoop};
    pub use crate::{AimrailCorePlugin, AimrailSet};
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

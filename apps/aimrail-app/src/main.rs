//! Aimrail IK blending CLI.
//!
//! Provides two modes of operation:
//! - `headless`: Run a scripted scenario locally and print the IK
//!   directives each blend tick produces
//! - `info`: Print workspace crate versions and configuration

use std::path::PathBuf;
use std::time::Duration;

use bevy::prelude::*;
use clap::{Parser, Subcommand};

use aimrail_blend::AimrailBlendPlugin;
use aimrail_blend::components::{
    CharacterBody, IkBinding, SceneName, ScenePosition, SceneTagged,
};
use aimrail_blend::config::RigConfig;
use aimrail_blend::messages::{EpisodeStart, IkCommand};
use aimrail_blend::prelude::{BindingConfig, BodyPart, IkDirective, SceneTag};
use aimrail_core::AimrailCorePlugin;
use aimrail_core::config::SimConfig;
use aimrail_core::time::{SimTime, TickLoop};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Aimrail IK blending toolkit.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted scenario and print the resulting IK directives.
    Headless {
        /// Rig TOML file; each `[[binding]]` is started one second apart.
        /// Without this a built-in engage/re-target/release script runs.
        #[arg(short, long)]
        rig: Option<PathBuf>,

        /// Print every Nth directive (1 prints all of them).
        #[arg(short, long, default_value_t = 10)]
        print_every: u32,
    },

    /// Print crate information.
    Info,
}

// ---------------------------------------------------------------------------
// Headless mode
// ---------------------------------------------------------------------------

/// The built-in script: look at the player while reaching for a panel,
/// then let go of both.
fn default_rig() -> RigConfig {
    RigConfig {
        bindings: vec![
            BindingConfig::aim("player", BodyPart::Head).with_tracking(true),
            BindingConfig::aim("panel", BodyPart::RightHand),
            BindingConfig::release(BodyPart::RightHand),
            BindingConfig::release(BodyPart::Head),
        ],
    }
}

fn format_directive(directive: &IkDirective) -> String {
    match directive {
        IkDirective::LookAt { position, weights } => format!(
            "look_at    pos=({:+.2}, {:+.2}, {:+.2}) weight={:+.3} clamp={:.1}",
            position.x, position.y, position.z, weights.weight, weights.clamp
        ),
        IkDirective::Goal {
            part,
            position,
            weight,
        } => format!(
            "{:<10} pos=({:+.2}, {:+.2}, {:+.2}) weight={weight:+.3}",
            part.to_string(),
            position.x,
            position.y,
            position.z
        ),
    }
}

fn run_headless(rig: RigConfig, print_every: u32) {
    let mut app = App::new();
    app.add_plugins(AimrailCorePlugin);
    app.add_plugins(AimrailBlendPlugin);

    app.world_mut()
        .spawn((SceneName::new("panel"), ScenePosition::new(2.0, 1.2, 0.5)));
    let player = app
        .world_mut()
        .spawn((
            SceneTagged(SceneTag::Player),
            ScenePosition::new(0.0, 1.7, 4.0),
        ))
        .id();

    let character = app.world_mut().spawn(CharacterBody).id();
    let bindings: Vec<Entity> = rig
        .bindings
        .iter()
        .map(|config| {
            app.world_mut()
                .spawn(IkBinding::new(character, config.clone()))
                .id()
        })
        .collect();

    app.finish();
    app.cleanup();

    let control_dt = app.world().resource::<SimConfig>().control_dt;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let ticks_per_second = (1.0 / control_dt).round() as u32;
    // One second per episode, plus a tail second for the last fade-out.
    let total_seconds = bindings.len() as u32 + 1;

    println!(
        "headless: {} bindings, {:.0} Hz control, {total_seconds} s",
        bindings.len(),
        1.0 / control_dt,
    );

    // Outer loop plays scripted 30 fps frames; the tick loop converts them
    // into fixed control steps.
    #[allow(clippy::cast_possible_truncation)]
    let mut ticks = TickLoop::new(control_dt as f32);
    let frame_dt = Duration::from_secs_f64(1.0 / 30.0);
    let mut tick_index: u32 = 0;

    for _ in 0..(30 * total_seconds) {
        ticks.accumulate(frame_dt);
        while ticks.next_tick().is_some() {
            // Each binding's episode starts on a one-second boundary.
            if tick_index % ticks_per_second == 0 {
                let index = (tick_index / ticks_per_second) as usize;
                if let Some(&binding) = bindings.get(index) {
                    println!("-- starting binding {index}");
                    app.world_mut().write_message(EpisodeStart { binding });
                }
            }

            // The player strolls sideways so head tracking has something
            // to do.
            {
                let t = app.world().resource::<SimTime>().secs_f32();
                let mut position = app.world_mut().get_mut::<ScenePosition>(player).unwrap();
                position.0.x = (t * 0.5).sin() * 2.0;
            }

            app.update();

            let t = app.world().resource::<SimTime>().secs_f32();
            let commands: Vec<IkCommand> = app
                .world_mut()
                .resource_mut::<Messages<IkCommand>>()
                .drain()
                .collect();
            if tick_index % print_every.max(1) == 0 {
                for command in &commands {
                    println!("t={t:6.3}  {}", format_directive(&command.directive));
                }
            }
            tick_index += 1;
        }
    }
}

fn run_info() {
    println!("aimrail v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("crates:");
    println!("  aimrail-core        {}", env!("CARGO_PKG_VERSION"));
    println!("  aimrail-blend-core  {}", env!("CARGO_PKG_VERSION"));
    println!("  aimrail-blend       {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("edition: 2024");
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Headless { rig, print_every }) => {
            let rig = match rig {
                Some(path) => match RigConfig::from_file(&path) {
                    Ok(rig) => rig,
                    Err(err) => {
                        eprintln!("failed to load {}: {err}", path.display());
                        std::process::exit(1);
                    }
                },
                None => default_rig(),
            };
            run_headless(rig, print_every);
        }
        Some(Commands::Info) => run_info(),
        None => run_headless(default_rig(), 10),
    }
}

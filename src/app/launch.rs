use bevy::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

use crate::core::config::BallWorldConfig;
use crate::simulation::{BallWorld, SimulationHandle};

/// Startup options that are not part of the config files.
#[derive(Resource, Debug, Clone, Default)]
pub struct LaunchSettings {
    /// Fixed seed for the spawn position and heading.
    pub seed: Option<u64>,
    pub start_paused: bool,
}

/// What the config loader did, kept until the log subscriber is up.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConfigReport {
    pub used: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn log_config_report(report: Option<Res<ConfigReport>>) {
    let Some(report) = report else {
        return;
    };
    if report.used.is_empty() {
        info!("No config files found; using defaults");
    } else {
        info!("Config loaded from: {}", report.used.join(", "));
    }
    for e in &report.errors {
        warn!("CONFIG: {e}");
    }
    for w in &report.warnings {
        warn!("CONFIG WARNING: {w}");
    }
}

pub fn initial_world(cfg: &BallWorldConfig, launch: &LaunchSettings) -> BallWorld {
    let mut rng = match launch.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut world = BallWorld::from_config(cfg, &mut rng);
    world.paused = launch.start_paused;
    world
}

pub fn start_simulation(
    mut commands: Commands,
    cfg: Res<BallWorldConfig>,
    launch: Option<Res<LaunchSettings>>,
    existing: Option<Res<SimulationHandle>>,
    mut exit: EventWriter<AppExit>,
) {
    if existing.is_some() {
        return;
    }
    let launch = launch.as_deref().cloned().unwrap_or_default();
    let world = initial_world(&cfg, &launch);
    info!("Ball {} in container {}", world.ball, world.container);
    match SimulationHandle::spawn_with_log_interval(
        world,
        cfg.simulation.update_rate,
        cfg.simulation.log_interval,
    ) {
        Ok(sim) => commands.insert_resource(sim),
        Err(e) => {
            error!("failed to start simulation thread: {e}");
            exit.write(AppExit::error());
        }
    }
}

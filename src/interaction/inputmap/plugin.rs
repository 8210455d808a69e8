use bevy::prelude::*;

use super::parse::parse_input_toml;
use super::types::{ControlAction, ControlBindings};
use crate::core::config::BallWorldConfig;
use crate::simulation::SimulationHandle;

pub const DEFAULT_INPUT_PATH: &str = "assets/config/input.toml";

/// Loads key bindings and turns key presses into simulation commands.
pub struct ControlInputPlugin;
impl Plugin for ControlInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ControlBindings>()
            .add_systems(PreStartup, load_initial_bindings)
            .add_systems(Update, send_control_actions);
    }
}

/// Bindings from `raw`, falling back to the defaults when nothing usable
/// was parsed.
pub fn bindings_from_toml(raw: &str) -> (ControlBindings, Vec<String>) {
    let parsed = parse_input_toml(raw);
    if parsed.bindings.is_empty() {
        (ControlBindings::default(), parsed.errors)
    } else {
        (
            ControlBindings {
                bindings: parsed.bindings,
            },
            parsed.errors,
        )
    }
}

fn load_initial_bindings(mut commands: Commands) {
    let path = std::env::var("INPUT_CONFIG_PATH").unwrap_or_else(|_| DEFAULT_INPUT_PATH.into());
    let raw = match std::fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) => {
            info!("No input map at {path} ({e}); using default bindings");
            return;
        }
    };
    let (bindings, errors) = bindings_from_toml(&raw);
    for e in errors {
        error!("INPUT MAP ERROR: {e}");
    }
    info!("Input map loaded: {} bindings", bindings.bindings.len());
    commands.insert_resource(bindings);
}

pub fn send_control_actions(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<ControlBindings>,
    cfg: Res<BallWorldConfig>,
    sim: Option<Res<SimulationHandle>>,
    mut exit: EventWriter<AppExit>,
) {
    for action in bindings.just_pressed(&keys) {
        if action == ControlAction::Quit {
            info!("Quit requested");
            exit.write(AppExit::Success);
            continue;
        }
        let Some(cmd) = action.command(&cfg.controls) else {
            continue;
        };
        match sim.as_deref() {
            Some(sim) if sim.send(cmd) => debug!(action = action.name(), "sent {cmd:?}"),
            _ => warn!(action = action.name(), "simulation not running; dropped {cmd:?}"),
        }
    }
}

use bevy::prelude::*;

use crate::simulation::SimulationHandle;

/// Stops and joins the timing thread once an exit has been requested.
pub struct ShutdownPlugin;

impl Plugin for ShutdownPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Last, stop_simulation_on_exit);
    }
}

pub fn stop_simulation_on_exit(
    mut commands: Commands,
    mut exit: EventReader<AppExit>,
    sim: Option<ResMut<SimulationHandle>>,
) {
    if exit.read().last().is_none() {
        return;
    }
    let Some(mut sim) = sim else {
        return;
    };
    match sim.stop() {
        Ok(world) => info!(steps = world.steps(), "final ball {}", world.ball),
        Err(e) => warn!("simulation shutdown: {e}"),
    }
    commands.remove_resource::<SimulationHandle>();
}

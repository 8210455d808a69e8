use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::simulation::{ControlCommand, SimulationHandle};

/// Relays the latest window size to the simulation as new container extents.
pub fn relay_window_resize(
    mut resized: EventReader<WindowResized>,
    sim: Option<Res<SimulationHandle>>,
) {
    let Some(ev) = resized.read().last() else {
        return;
    };
    if ev.width <= 0.0 || ev.height <= 0.0 {
        // Minimized; keep the old extents.
        debug!(width = ev.width, height = ev.height, "ignoring degenerate resize");
        return;
    }
    let Some(sim) = sim else {
        return;
    };
    info!(width = ev.width, height = ev.height, "container resized");
    sim.send(ControlCommand::Resize {
        min_x: 0.0,
        min_y: 0.0,
        max_x: ev.width,
        max_y: ev.height,
    });
}

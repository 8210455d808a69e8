// This file is part of Bouncing Ball.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use super::launch::{log_config_report, start_simulation};
use super::resize::relay_window_resize;
use super::view::{
    draw_container_border, pull_frames, spawn_scene, sync_visuals, update_ball_info, FrameView,
};
use crate::interaction::inputmap::ControlInputPlugin;
use crate::interaction::session::{AutoClosePlugin, ShutdownPlugin};

/// Presentation layer: draws whatever the simulation thread last published
/// and forwards input and window events back to it as commands.
///
/// Expects a `BallWorldConfig` resource; starts the simulation thread at
/// startup unless a `SimulationHandle` was inserted already.
pub struct BallWorldPlugin;

impl Plugin for BallWorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameView>()
            .add_plugins((ControlInputPlugin, AutoClosePlugin, ShutdownPlugin))
            .add_systems(Startup, (log_config_report, start_simulation, spawn_scene).chain())
            .add_systems(
                Update,
                (
                    relay_window_resize,
                    pull_frames,
                    (sync_visuals, update_ball_info, draw_container_border),
                )
                    .chain(),
            );
    }
}

use bevy::prelude::*;

use crate::core::config::BallWorldConfig;

/// Run-time budget armed from `window.autoClose`. Absent when the key is 0.
#[derive(Resource, Debug)]
pub struct AutoClose {
    remaining: Timer,
}

impl AutoClose {
    pub fn from_config(cfg: &BallWorldConfig) -> Option<Self> {
        let secs = cfg.window.auto_close;
        (secs > 0.0).then(|| Self {
            remaining: Timer::from_seconds(secs, TimerMode::Once),
        })
    }
}

/// Ends the session after the configured time. The exit goes through the
/// regular `AppExit` path, so [`super::ShutdownPlugin`] still joins the
/// simulation thread.
pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, arm_auto_close)
            .add_systems(Update, expire_auto_close);
    }
}

pub fn arm_auto_close(mut commands: Commands, cfg: Res<BallWorldConfig>) {
    if let Some(auto) = AutoClose::from_config(&cfg) {
        info!(seconds = cfg.window.auto_close, "session will close automatically");
        commands.insert_resource(auto);
    }
}

pub fn expire_auto_close(
    mut commands: Commands,
    time: Res<Time>,
    auto: Option<ResMut<AutoClose>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut auto) = auto else {
        return;
    };
    if auto.remaining.tick(time.delta()).finished() {
        info!("auto close elapsed; exiting");
        exit.write(AppExit::Success);
        commands.remove_resource::<AutoClose>();
    }
}

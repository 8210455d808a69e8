use bevy::prelude::*;

use crate::core::config::ControlsConfig;
use crate::simulation::ControlCommand;

/// User-facing controls, named as in `input.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    TogglePause,
    SpeedUp,
    SpeedDown,
    RadiusUp,
    RadiusDown,
    Quit,
}

impl ControlAction {
    pub const ALL: [ControlAction; 6] = [
        ControlAction::TogglePause,
        ControlAction::SpeedUp,
        ControlAction::SpeedDown,
        ControlAction::RadiusUp,
        ControlAction::RadiusDown,
        ControlAction::Quit,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ControlAction::TogglePause => "TogglePause",
            ControlAction::SpeedUp => "SpeedUp",
            ControlAction::SpeedDown => "SpeedDown",
            ControlAction::RadiusUp => "RadiusUp",
            ControlAction::RadiusDown => "RadiusDown",
            ControlAction::Quit => "Quit",
        }
    }

    /// Simulation command for this action; `Quit` is handled by the app.
    pub fn command(self, controls: &ControlsConfig) -> Option<ControlCommand> {
        match self {
            ControlAction::TogglePause => Some(ControlCommand::TogglePause),
            ControlAction::SpeedUp => Some(ControlCommand::AdjustSpeed(controls.speed_step)),
            ControlAction::SpeedDown => Some(ControlCommand::AdjustSpeed(-controls.speed_step)),
            ControlAction::RadiusUp => Some(ControlCommand::AdjustRadius(controls.radius_step)),
            ControlAction::RadiusDown => Some(ControlCommand::AdjustRadius(-controls.radius_step)),
            ControlAction::Quit => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub key: KeyCode,
    pub action: ControlAction,
}

/// Key to action table. Several keys may drive one action.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ControlBindings {
    pub bindings: Vec<Binding>,
}

impl Default for ControlBindings {
    fn default() -> Self {
        use ControlAction::*;
        let table = [
            (KeyCode::Space, TogglePause),
            (KeyCode::KeyP, TogglePause),
            (KeyCode::ArrowUp, SpeedUp),
            (KeyCode::ArrowDown, SpeedDown),
            (KeyCode::ArrowRight, RadiusUp),
            (KeyCode::Equal, RadiusUp),
            (KeyCode::ArrowLeft, RadiusDown),
            (KeyCode::Minus, RadiusDown),
            (KeyCode::Escape, Quit),
        ];
        Self {
            bindings: table
                .into_iter()
                .map(|(key, action)| Binding { key, action })
                .collect(),
        }
    }
}

impl ControlBindings {
    /// Actions whose key went down this frame, in binding order, deduplicated.
    pub fn just_pressed(&self, keys: &ButtonInput<KeyCode>) -> Vec<ControlAction> {
        let mut out = Vec::new();
        for b in &self.bindings {
            if keys.just_pressed(b.key) && !out.contains(&b.action) {
                out.push(b.action);
            }
        }
        out
    }

    pub fn keys_for(&self, action: ControlAction) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.action == action)
            .map(|b| b.key)
    }
}

use std::fs;

use bouncing_ball::core::config::DEFAULT_CONFIG_PATHS;
use bouncing_ball::interaction::inputmap::{bindings_from_toml, ControlAction, ControlBindings};
use bouncing_ball::BallWorldConfig;

#[test]
fn shipped_config_matches_defaults() {
    let cfg = BallWorldConfig::load_from_file(DEFAULT_CONFIG_PATHS[0]).expect("parse shipped config");
    assert_eq!(cfg, BallWorldConfig::default());
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
}

#[test]
fn shipped_input_map_covers_every_action() {
    let raw = fs::read_to_string("assets/config/input.toml").expect("read input.toml");
    let (bindings, errors) = bindings_from_toml(&raw);
    assert!(errors.is_empty(), "{errors:?}");
    for action in ControlAction::ALL {
        assert!(
            bindings.keys_for(action).next().is_some(),
            "no key bound to {}",
            action.name()
        );
    }
    let defaults = ControlBindings::default();
    assert_eq!(bindings.bindings.len(), defaults.bindings.len());
    for b in &defaults.bindings {
        assert!(bindings.bindings.contains(b), "missing default binding {b:?}");
    }
}

#[test]
fn garbage_input_map_falls_back_to_defaults() {
    let (bindings, errors) = bindings_from_toml("not = [valid");
    assert!(!errors.is_empty());
    assert_eq!(bindings, ControlBindings::default());
}

use std::path::PathBuf;

use anyhow::{bail, Result};
use bevy::prelude::*;
use clap::Parser;

use bouncing_ball::core::config::DEFAULT_CONFIG_PATHS;
use bouncing_ball::{BallWorldConfig, BallWorldPlugin, ConfigReport, LaunchSettings};

#[derive(Parser, Debug)]
#[command(author, version, about = "A single ball bouncing inside the window", long_about = None)]
struct Args {
    /// Initial window width (overrides config).
    #[arg(long)]
    width: Option<f32>,
    /// Initial window height (overrides config).
    #[arg(long)]
    height: Option<f32>,
    /// Extra RON config layers applied after the defaults.
    #[arg(long = "config")]
    config: Vec<PathBuf>,
    /// Seed for the random spawn position and heading.
    #[arg(long)]
    seed: Option<u64>,
    /// Start with the ball paused.
    #[arg(long)]
    paused: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut paths: Vec<PathBuf> = DEFAULT_CONFIG_PATHS.iter().map(PathBuf::from).collect();
    paths.extend(args.config.iter().cloned());
    let (mut cfg, used, mut errors) = BallWorldConfig::load_layered(&paths);
    // The local override layer is optional; only report it when present but broken.
    errors.retain(|e| !(e.contains(DEFAULT_CONFIG_PATHS[1]) && e.contains("read error")));
    if let Some(w) = args.width {
        cfg.window.width = w;
    }
    if let Some(h) = args.height {
        cfg.window.height = h;
    }
    if cfg.window.width <= 0.0 || cfg.window.height <= 0.0 {
        bail!(
            "window size must be positive, got {}x{}",
            cfg.window.width,
            cfg.window.height
        );
    }
    let warnings = cfg.validate();

    let exit = App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: cfg.window.title.clone(),
                resolution: (cfg.window.width, cfg.window.height).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ConfigReport {
            used,
            errors,
            warnings,
        })
        .insert_resource(LaunchSettings {
            seed: args.seed,
            start_paused: args.paused,
        })
        .insert_resource(cfg)
        .add_plugins(BallWorldPlugin)
        .run();
    if let AppExit::Error(code) = exit {
        bail!("app exited with error code {code}");
    }
    Ok(())
}

use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

/// Layered config sources, later entries override earlier ones key-wise.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = [
    "assets/config/ball_world.ron",
    "assets/config/ball_world.local.ron",
];

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 480.0,
            title: "A World of Balls".into(),
            auto_close: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BallConfig {
    pub radius: f32,
    pub speed: f32,
    pub spawn_margin: f32,
    /// sRGB, 0..1 per channel.
    pub color: [f32; 3],
}
impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 100.0,
            speed: 5.0,
            spawn_margin: 10.0,
            color: [0.0, 0.0, 1.0],
        }
    }
}
impl BallConfig {
    pub fn color(&self) -> Color {
        let [r, g, b] = self.color;
        Color::srgb(r, g, b)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ContainerConfig {
    pub fill_color: [f32; 3],
    pub border_color: [f32; 3],
}
impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            fill_color: [0.0, 0.0, 0.0],
            border_color: [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub min_speed: f32,
    pub max_speed: f32,
    pub speed_step: f32,
    pub min_radius: f32,
    pub radius_step: f32,
    /// Gap kept between the largest allowed ball and the container edge.
    pub radius_edge_gap: f32,
}
impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            min_speed: 2.0,
            max_speed: 20.0,
            speed_step: 1.0,
            min_radius: 10.0,
            radius_step: 5.0,
            radius_edge_gap: 8.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Steps per second.
    pub update_rate: u32,
    /// Seconds between stats log lines; 0 disables.
    pub log_interval: f32,
}
impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            update_rate: 30,
            log_interval: 5.0,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, Default, PartialEq)]
#[serde(default)]
pub struct BallWorldConfig {
    pub window: WindowConfig,
    pub ball: BallConfig,
    pub container: ContainerConfig,
    pub controls: ControlsConfig,
    pub simulation: SimulationConfig,
}

fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
    use ron::value::Value;
    match (base, overlay) {
        (Value::Map(bm), Value::Map(om)) => {
            for (k, v) in om.into_iter() {
                let existing = bm.iter_mut().find(|(ek, _)| **ek == k).map(|(_, ev)| ev);
                if let Some(ev) = existing {
                    merge_value(ev, v);
                } else {
                    bm.insert(k, v);
                }
            }
        }
        (b, o) => *b = o,
    }
}

impl BallWorldConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Merges every readable RON file in order, then deserializes the result.
    /// Returns the config, the paths that contributed, and per-file errors.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        for p in paths {
            let path_ref = p.as_ref();
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.as_os_str().to_string_lossy().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        let Some(val) = merged else {
            return (Self::default(), used, errors);
        };
        match val.into_rust::<BallWorldConfig>() {
            Ok(cfg) => (cfg, used, errors),
            Err(e) => {
                errors.push(format!(
                    "failed to deserialize merged config; using defaults: {e}"
                ));
                (Self::default(), used, errors)
            }
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.width * self.window.height > 10_000_000.0 {
            w.push(format!(
                "very large window area: {}x{}",
                self.window.width, self.window.height
            ));
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        } else if self.window.auto_close > 0.0 && self.window.auto_close < 0.01 {
            w.push(format!(
                "window.autoClose {} very small; closes almost immediately",
                self.window.auto_close
            ));
        }
        if self.ball.radius <= 0.0 {
            w.push("ball.radius must be > 0".into());
        }
        let min_dim = self.window.width.min(self.window.height);
        if self.ball.radius + self.ball.spawn_margin > min_dim * 0.5 {
            w.push(format!(
                "ball.radius {} + spawn_margin {} does not fit a {}x{} window; ball will spawn centered",
                self.ball.radius, self.ball.spawn_margin, self.window.width, self.window.height
            ));
        }
        if self.ball.radius > min_dim * 0.5 {
            w.push(format!(
                "ball.radius {} wider than a {}x{} window; shrunk to {} at spawn",
                self.ball.radius,
                self.window.width,
                self.window.height,
                min_dim * 0.5
            ));
        }
        if self.ball.spawn_margin < 0.0 {
            w.push("ball.spawn_margin negative".into());
        }
        if self.ball.speed <= 0.0 {
            w.push("ball.speed must be > 0 (a resting ball has no heading)".into());
        }
        if self.ball.color.iter().any(|c| !(0.0..=1.0).contains(c)) {
            w.push(format!("ball.color {:?} outside 0..1", self.ball.color));
        }
        let c = &self.controls;
        if c.min_speed > c.max_speed {
            w.push(format!(
                "controls.min_speed ({}) greater than max_speed ({})",
                c.min_speed, c.max_speed
            ));
        }
        if c.min_speed <= 0.0 {
            w.push("controls.min_speed must be > 0".into());
        }
        if !(c.min_speed..=c.max_speed).contains(&self.ball.speed) {
            w.push(format!(
                "ball.speed {} outside controls range {}..{}",
                self.ball.speed, c.min_speed, c.max_speed
            ));
        }
        if c.speed_step <= 0.0 {
            w.push("controls.speed_step must be > 0".into());
        }
        if c.radius_step <= 0.0 {
            w.push("controls.radius_step must be > 0".into());
        }
        if c.min_radius <= 0.0 {
            w.push("controls.min_radius must be > 0".into());
        }
        if c.radius_edge_gap < 0.0 {
            w.push("controls.radius_edge_gap negative".into());
        }
        if self.simulation.update_rate == 0 {
            w.push("simulation.update_rate is 0; treated as 1 step per second".into());
        }
        if self.simulation.update_rate > 1_000 {
            w.push(format!(
                "simulation.update_rate {} very high; sleep granularity will dominate",
                self.simulation.update_rate
            ));
        }
        if self.simulation.log_interval < 0.0 {
            w.push("simulation.log_interval negative -> logging disabled".into());
        }
        w
    }
}

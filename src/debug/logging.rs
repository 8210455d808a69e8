use std::time::{Duration, Instant};

use bevy::prelude::*;

use crate::simulation::world::BallWorld;

/// Periodic one-line summary of the simulation, emitted from the timing thread.
pub struct StatsLogger {
    interval: Option<Duration>,
    last_log: Instant,
    last_steps: u64,
}

impl StatsLogger {
    /// `interval_secs <= 0` disables logging.
    pub fn new(interval_secs: f32) -> Self {
        let interval = (interval_secs > 0.0).then(|| Duration::from_secs_f32(interval_secs));
        Self {
            interval,
            last_log: Instant::now(),
            last_steps: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval.is_some()
    }

    /// Logs when the interval has elapsed. Returns true if a line was written.
    pub fn maybe_log(&mut self, world: &BallWorld) -> bool {
        let Some(interval) = self.interval else {
            return false;
        };
        let elapsed = self.last_log.elapsed();
        if elapsed < interval {
            return false;
        }
        let steps = world.steps();
        let rate = (steps - self.last_steps) as f32 / elapsed.as_secs_f32().max(1e-6);
        info!("{}", stats_line(world, rate));
        self.last_log = Instant::now();
        self.last_steps = steps;
        true
    }
}

fn stats_line(world: &BallWorld, rate: f32) -> String {
    let ball = &world.ball;
    format!(
        "SIM steps={} rate={:.1}/s paused={} pos=({:.1},{:.1}) speed={:.2} radius={:.1} container={}",
        world.steps(),
        rate,
        world.paused,
        ball.x,
        ball.y,
        ball.speed(),
        ball.radius,
        world.container
    )
}

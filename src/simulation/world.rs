use bevy::prelude::*;
use rand::Rng;

use crate::core::config::BallWorldConfig;
use crate::physics::{Ball, Container};

/// Requests from the input side. Only the simulation thread applies these,
/// so the ball and container have a single writer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    SetPaused(bool),
    TogglePause,
    /// Target scalar speed; clamped to the configured range.
    SetSpeed(f32),
    /// Relative change of the scalar speed.
    AdjustSpeed(f32),
    /// Target radius; clamped to what the current container allows.
    SetRadius(f32),
    AdjustRadius(f32),
    /// New container extents (min_x, min_y, max_x, max_y).
    Resize {
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    },
    Stop,
}

/// Control ranges copied out of the config so the world is self-contained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlLimits {
    pub min_speed: f32,
    pub max_speed: f32,
    pub min_radius: f32,
    pub radius_edge_gap: f32,
}

impl ControlLimits {
    pub fn from_config(cfg: &BallWorldConfig) -> Self {
        Self {
            min_speed: cfg.controls.min_speed,
            max_speed: cfg.controls.max_speed,
            min_radius: cfg.controls.min_radius,
            radius_edge_gap: cfg.controls.radius_edge_gap,
        }
    }

    /// Radius slider ceiling for `container`: half the smaller side minus the
    /// edge gap, never below the floor and never above the half side.
    pub fn max_radius(&self, container: &Container) -> f32 {
        let half = container.max_radius();
        (half - self.radius_edge_gap).max(self.min_radius).min(half)
    }
}

/// Snapshot handed to the renderer after every step or applied command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub ball: Ball,
    pub container: Container,
    pub paused: bool,
    pub steps: u64,
}

/// Everything the simulation owns: one ball, one container, the pause flag.
#[derive(Debug, Clone)]
pub struct BallWorld {
    pub ball: Ball,
    pub container: Container,
    pub paused: bool,
    pub limits: ControlLimits,
    steps: u64,
}

impl BallWorld {
    pub fn new(ball: Ball, container: Container, limits: ControlLimits) -> Self {
        Self {
            ball,
            container,
            paused: false,
            limits,
            steps: 0,
        }
    }

    /// Window-sized container with a randomly placed ball, as at startup.
    /// A configured radius that cannot fit the window is shrunk first.
    pub fn from_config<R: Rng + ?Sized>(cfg: &BallWorldConfig, rng: &mut R) -> Self {
        let container = Container::from_size(cfg.window.width, cfg.window.height);
        let ball = Ball::spawn(
            rng,
            &container,
            fitted_radius(cfg.ball.radius, &container),
            cfg.ball.speed,
            cfg.ball.spawn_margin,
            cfg.ball.color(),
        );
        Self::new(ball, container, ControlLimits::from_config(cfg))
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// One timer tick: steps the ball unless paused. Returns true when the
    /// ball moved and a redraw is due.
    pub fn tick(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.ball.step(&self.container);
        self.steps += 1;
        true
    }

    pub fn frame(&self) -> Frame {
        Frame {
            ball: self.ball,
            container: self.container,
            paused: self.paused,
            steps: self.steps,
        }
    }

    /// Applies a control command. `Stop` is the runner's concern and is a
    /// no-op here.
    pub fn apply(&mut self, cmd: ControlCommand) {
        debug!(?cmd, "control command");
        match cmd {
            ControlCommand::SetPaused(p) => self.paused = p,
            ControlCommand::TogglePause => self.paused = !self.paused,
            ControlCommand::SetSpeed(s) => self.set_speed(s),
            ControlCommand::AdjustSpeed(d) => self.set_speed(self.ball.speed() + d),
            ControlCommand::SetRadius(r) => self.set_radius(r),
            ControlCommand::AdjustRadius(d) => self.set_radius(self.ball.radius + d),
            ControlCommand::Resize {
                min_x,
                min_y,
                max_x,
                max_y,
            } => self.resize(min_x, min_y, max_x, max_y),
            ControlCommand::Stop => {}
        }
    }

    fn set_speed(&mut self, speed: f32) {
        let target = speed.max(self.limits.min_speed).min(self.limits.max_speed);
        self.ball.set_speed(target);
    }

    fn set_radius(&mut self, radius: f32) {
        let max = self.limits.max_radius(&self.container);
        let target = radius.clamp(self.limits.min_radius.min(max), max);
        self.ball.set_radius(target, &self.container);
    }

    fn resize(&mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) {
        self.container.resize(min_x, min_y, max_x, max_y);
        self.ball.radius = fitted_radius(self.ball.radius, &self.container);
        self.ball.recenter(&self.container);
    }
}

/// Largest radius not above `radius` that fits `container`, logging any cut.
fn fitted_radius(radius: f32, container: &Container) -> f32 {
    let fit = container.max_radius();
    if radius > fit {
        warn!(radius, fit, "ball does not fit container {container}; shrinking");
        fit
    } else {
        radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn world() -> BallWorld {
        let ball = Ball {
            x: 100.0,
            y: 100.0,
            radius: 10.0,
            speed_x: 3.0,
            speed_y: 4.0,
            color: Color::WHITE,
        };
        BallWorld::new(
            ball,
            Container::from_size(200.0, 200.0),
            ControlLimits::from_config(&BallWorldConfig::default()),
        )
    }

    #[test]
    fn paused_tick_does_not_move() {
        let mut w = world();
        w.apply(ControlCommand::TogglePause);
        assert!(!w.tick());
        assert_eq!((w.ball.x, w.ball.y), (100.0, 100.0));
        assert_eq!(w.steps(), 0);
        w.apply(ControlCommand::SetPaused(false));
        assert!(w.tick());
        assert_eq!((w.ball.x, w.ball.y), (103.0, 104.0));
        assert_eq!(w.steps(), 1);
    }

    #[test]
    fn speed_is_clamped_and_keeps_heading() {
        let mut w = world();
        w.apply(ControlCommand::SetSpeed(10.0));
        assert!((w.ball.speed_x - 6.0).abs() < 1e-5);
        assert!((w.ball.speed_y - 8.0).abs() < 1e-5);
        w.apply(ControlCommand::SetSpeed(500.0));
        assert!((w.ball.speed() - 20.0).abs() < 1e-4);
        w.apply(ControlCommand::AdjustSpeed(-100.0));
        assert!((w.ball.speed() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn radius_is_clamped_to_container() {
        let mut w = world();
        w.apply(ControlCommand::SetRadius(1_000.0));
        // half of 200 minus the 8 unit gap
        assert_eq!(w.ball.radius, 92.0);
        assert!(w.container.contains_circle(w.ball.x, w.ball.y, w.ball.radius));
        w.apply(ControlCommand::AdjustRadius(-1_000.0));
        assert_eq!(w.ball.radius, 10.0);
    }

    #[test]
    fn radius_growth_recenters_near_wall() {
        let mut w = world();
        w.ball.x = 185.0;
        w.ball.y = 15.0;
        w.apply(ControlCommand::SetRadius(40.0));
        assert_eq!((w.ball.x, w.ball.y), (160.0, 40.0));
    }

    #[test]
    fn shrink_resize_recenters_ball() {
        let mut w = world();
        w.ball.x = 180.0;
        w.ball.y = 150.0;
        w.apply(ControlCommand::Resize {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 120.0,
            max_y: 100.0,
        });
        assert_eq!(w.container, Container::from_size(120.0, 100.0));
        assert_eq!((w.ball.x, w.ball.y), (110.0, 90.0));
        assert_eq!((w.ball.speed_x, w.ball.speed_y), (3.0, 4.0));
    }

    #[test]
    fn resize_below_radius_shrinks_ball() {
        let mut w = world();
        w.ball.radius = 80.0;
        w.apply(ControlCommand::Resize {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 300.0,
            max_y: 60.0,
        });
        assert_eq!(w.ball.radius, 30.0);
        assert!(w.container.contains_circle(w.ball.x, w.ball.y, w.ball.radius));
    }

    #[test]
    fn from_config_spawns_inside_window() {
        let cfg = BallWorldConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let w = BallWorld::from_config(&cfg, &mut rng);
        assert_eq!(w.container, Container::from_size(640.0, 480.0));
        assert_eq!(w.ball.radius, 100.0);
        assert!(w.container.contains_circle(w.ball.x, w.ball.y, w.ball.radius));
        assert!(!w.paused);
    }

    #[test]
    fn from_config_shrinks_ball_for_small_window() {
        let mut cfg = BallWorldConfig::default();
        cfg.window.width = 150.0;
        cfg.window.height = 150.0;
        let mut w = BallWorld::from_config(&cfg, &mut StdRng::seed_from_u64(7));
        assert_eq!(w.ball.radius, 75.0);
        assert_eq!((w.ball.x, w.ball.y), (75.0, 75.0));
        for _ in 0..20 {
            w.tick();
            assert!(
                w.container.contains_circle(w.ball.x, w.ball.y, w.ball.radius),
                "escaped at {}",
                w.ball
            );
        }
    }
}

use std::fmt;

use bevy::prelude::*;
use rand::Rng;

use super::container::Container;

/// The single moving body.
///
/// Velocity is kept as orthogonal components; the heading is implicit in the
/// `(speed_x, speed_y)` pair after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    pub color: Color,
}

impl Ball {
    /// Builds a ball from a scalar speed and a heading in degrees.
    ///
    /// Angles grow clockwise from +x because screen y points down.
    pub fn new(x: f32, y: f32, radius: f32, speed: f32, angle_deg: f32, color: Color) -> Self {
        let angle = angle_deg.to_radians();
        Self {
            x,
            y,
            radius,
            speed_x: speed * angle.cos(),
            speed_y: speed * angle.sin(),
            color,
        }
    }

    /// Random placement fully inside `container` with `margin` to spare on
    /// every side, and a random whole-degree heading.
    ///
    /// Falls back to the container center when the margin leaves no room.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        container: &Container,
        radius: f32,
        speed: f32,
        margin: f32,
        color: Color,
    ) -> Self {
        let pad = radius + margin;
        let (cx, cy) = container.center();
        let x_lo = container.min_x + pad;
        let x_hi = container.max_x - pad;
        let y_lo = container.min_y + pad;
        let y_hi = container.max_y - pad;
        let x = if x_lo < x_hi { rng.gen_range(x_lo..x_hi) } else { cx };
        let y = if y_lo < y_hi { rng.gen_range(y_lo..y_hi) } else { cy };
        if x_lo >= x_hi || y_lo >= y_hi {
            warn!(
                radius,
                margin,
                center_x = x_lo >= x_hi,
                center_y = y_lo >= y_hi,
                "container {container} too small for spawn margin; centering ball"
            );
        }
        let angle_deg = rng.gen_range(0..360) as f32;
        Self::new(x, y, radius, speed, angle_deg, color)
    }

    /// Advances one fixed time unit and reflects off any penetrated wall.
    ///
    /// Axes are resolved independently, so a corner hit flips both components
    /// in the same step. If `radius` exceeds half the container's smaller
    /// dimension both walls of an axis count as penetrated and the result
    /// oscillates; callers keep the radius within [`Container::max_radius`].
    pub fn step(&mut self, container: &Container) {
        self.x += self.speed_x;
        self.y += self.speed_y;

        if self.x - self.radius < container.min_x {
            self.x = container.min_x + self.radius;
            self.speed_x = -self.speed_x;
        } else if self.x + self.radius > container.max_x {
            self.x = container.max_x - self.radius;
            self.speed_x = -self.speed_x;
        }

        if self.y - self.radius < container.min_y {
            self.y = container.min_y + self.radius;
            self.speed_y = -self.speed_y;
        } else if self.y + self.radius > container.max_y {
            self.y = container.max_y - self.radius;
            self.speed_y = -self.speed_y;
        }
    }

    /// Scalar speed magnitude.
    pub fn speed(&self) -> f32 {
        self.speed_x.hypot(self.speed_y)
    }

    /// Scales both components by `new_speed / speed()`, keeping the heading.
    /// A stationary ball has no heading and is sent along +x.
    pub fn set_speed(&mut self, new_speed: f32) {
        let current = self.speed();
        if current <= f32::EPSILON {
            self.speed_x = new_speed;
            self.speed_y = 0.0;
            return;
        }
        let ratio = new_speed / current;
        self.speed_x *= ratio;
        self.speed_y *= ratio;
    }

    /// Pulls the center back inside `container` per axis, using the same
    /// clamp targets as the wall collision. Velocity is left alone.
    pub fn recenter(&mut self, container: &Container) {
        if self.x - self.radius < container.min_x {
            self.x = container.min_x + self.radius;
        } else if self.x + self.radius > container.max_x {
            self.x = container.max_x - self.radius;
        }
        if self.y - self.radius < container.min_y {
            self.y = container.min_y + self.radius;
        } else if self.y + self.radius > container.max_y {
            self.y = container.max_y - self.radius;
        }
    }

    /// Changes the radius and recenters so the circle stays inside.
    pub fn set_radius(&mut self, radius: f32, container: &Container) {
        self.radius = radius;
        self.recenter(container);
    }
}

impl fmt::Display for Ball {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@({:.0},{:.0}) r={:.0} Speed=({:.2},{:.2})",
            self.x, self.y, self.radius, self.speed_x, self.speed_y
        )
    }
}

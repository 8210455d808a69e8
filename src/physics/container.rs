use std::fmt;

/// Axis-aligned rectangular boundary the ball bounces inside.
///
/// Coordinates are screen space: origin at the top-left, y grows downward.
/// Callers keep `min_x < max_x` and `min_y < max_y`; nothing here checks it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Container {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Container anchored at the origin, sized like a window's client area.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Overwrites all four extents in place. No validation.
    pub fn resize(&mut self, min_x: f32, min_y: f32, max_x: f32, max_y: f32) {
        self.min_x = min_x;
        self.min_y = min_y;
        self.max_x = max_x;
        self.max_y = max_y;
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) * 0.5,
            (self.min_y + self.max_y) * 0.5,
        )
    }

    /// Largest radius a circle can have and still fit on both axes.
    pub fn max_radius(&self) -> f32 {
        self.width().min(self.height()) * 0.5
    }

    /// True when the circle at (`x`, `y`) with `radius` lies fully inside.
    pub fn contains_circle(&self, x: f32, y: f32, radius: f32) -> bool {
        x - radius >= self.min_x
            && x + radius <= self.max_x
            && y - radius >= self.min_y
            && y + radius <= self.max_y
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.0},{:.0}]-[{:.0},{:.0}]",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_overwrites_extents() {
        let mut c = Container::from_size(640.0, 480.0);
        c.resize(10.0, 20.0, 300.0, 200.0);
        assert_eq!(c, Container::new(10.0, 20.0, 300.0, 200.0));
        assert_eq!(c.width(), 290.0);
        assert_eq!(c.height(), 180.0);
    }

    #[test]
    fn containment_is_inclusive_at_walls() {
        let c = Container::from_size(200.0, 200.0);
        assert!(c.contains_circle(10.0, 10.0, 10.0));
        assert!(c.contains_circle(190.0, 190.0, 10.0));
        assert!(!c.contains_circle(9.5, 100.0, 10.0));
        assert!(!c.contains_circle(100.0, 190.5, 10.0));
    }

    #[test]
    fn max_radius_uses_smaller_dimension() {
        let c = Container::from_size(640.0, 480.0);
        assert_eq!(c.max_radius(), 240.0);
        assert_eq!(c.center(), (320.0, 240.0));
    }
}

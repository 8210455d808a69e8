//! Single-ball physics: the container boundary and the ball's step update.

pub mod ball;
pub mod container;

pub use ball::Ball;
pub use container::Container;

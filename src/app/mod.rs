pub mod game;
pub mod launch;
pub mod resize;
pub mod view;

pub use game::BallWorldPlugin;
pub use launch::{ConfigReport, LaunchSettings};

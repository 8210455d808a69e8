pub mod app;
pub mod core;
pub mod debug;
pub mod interaction;
pub mod physics;
pub mod simulation;

// Curated re-exports
pub use crate::app::{BallWorldPlugin, ConfigReport, LaunchSettings};
pub use crate::core::config::{BallWorldConfig, WindowConfig};
pub use crate::physics::{Ball, Container};
pub use crate::simulation::{BallWorld, ControlCommand, Frame, SimulationHandle};

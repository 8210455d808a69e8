//! Owned simulation state and the fixed-rate timing thread that drives it.

pub mod runner;
pub mod world;

pub use runner::{tick_interval, SimulationHandle};
pub use world::{BallWorld, ControlCommand, ControlLimits, Frame};

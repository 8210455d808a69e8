pub mod config;

pub use config::{
    BallConfig, BallWorldConfig, ContainerConfig, ControlsConfig, SimulationConfig, WindowConfig,
    DEFAULT_CONFIG_PATHS,
};

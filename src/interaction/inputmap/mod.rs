pub mod parse;
pub mod plugin;
pub mod types;

pub use plugin::{bindings_from_toml, ControlInputPlugin};
pub use types::{ControlAction, ControlBindings};

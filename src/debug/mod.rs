//! Debug module: feature gated runtime stats logging.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
pub mod logging;

#[cfg(feature = "debug")]
pub use logging::StatsLogger;

//! Configuration for the Veld viewer: RON persistence plus CLI overrides.

pub mod cli;
pub mod config;
pub mod error;

pub use cli::CliArgs;
pub use config::{CameraConfig, Config, DebugConfig, FogConfig, GroundConfig, WindowConfig};
pub use error::ConfigError;

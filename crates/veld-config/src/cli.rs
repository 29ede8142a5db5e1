//! Command-line argument parsing for the Veld viewer.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Veld viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "veld", about = "Veld 3D viewer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Path to the ground texture image.
    #[arg(long)]
    pub texture: Option<String>,

    /// Disable fog.
    #[arg(long)]
    pub no_fog: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref path) = args.texture {
            self.ground.texture_path = path.clone();
        }
        if args.no_fog {
            self.fog.enabled = false;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            height: None,
            texture: Some("alt/ground.png".to_string()),
            no_fog: false,
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.ground.texture_path, "alt/ground.png");
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 720);
        assert!(config.fog.enabled);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs {
            width: None,
            height: None,
            texture: None,
            no_fog: false,
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_no_fog() {
        let mut config = Config::default();
        let args = CliArgs {
            width: None,
            height: None,
            texture: None,
            no_fog: true,
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert!(!config.fog.enabled);
    }
}

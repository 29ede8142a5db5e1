//! The binary entry point for the Veld viewer.

use clap::Parser;
use tracing::error;
use winit::event_loop::{ControlFlow, EventLoop};

use veld_app::{PlatformDirs, ViewerApp};
use veld_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(path) => PlatformDirs::resolve_with_root(path),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                std::process::exit(1);
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
        std::process::exit(1);
    }

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };
    config.apply_cli_overrides(&args);

    veld_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ViewerApp::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        error!("Event loop terminated with error: {e}");
        std::process::exit(1);
    }
}

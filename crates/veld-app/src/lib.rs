//! Native application wiring for the Veld viewer.
//!
//! Connects the viewport lifecycle core to winit and wgpu: window creation,
//! event dispatch, the redraw-backed frame clock, and asset loading.

pub mod app;
pub mod assets;
pub mod clock;
pub mod platform;

pub use app::{ViewerApp, WindowSurface};
pub use assets::{checkerboard, load_ground_texture};
pub use clock::WinitFrameClock;
pub use platform::{PlatformDirs, PlatformError};

//! Viewport lifecycle management for the Veld viewer.
//!
//! This crate is the seam between the host (window system, display refresh)
//! and the rendering session. The host supplies a [`FrameClock`] and a
//! [`ResizeBus`]; the [`Viewport`] owns one rendering session from mount to
//! unmount, and the [`SceneContainer`] toggles that session on and off.

pub mod container;
pub mod frame;
pub mod resize;
pub mod surface;
pub mod viewport;

pub use container::SceneContainer;
pub use frame::{FrameClock, FrameRequest, ManualFrameClock, frame_request_from_id};
pub use resize::{ResizeBus, ResizeSubscription};
pub use surface::RenderSurface;
pub use viewport::{LifecycleState, MountError, Viewport};

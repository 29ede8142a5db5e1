//! Input state tracking for the Veld viewer.

pub mod mouse;

pub use mouse::MouseState;

//! Orbit camera controls for the Veld viewer.

pub mod orbit;

pub use orbit::OrbitControls;

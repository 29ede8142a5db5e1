//! Scene content for the Veld viewer: procedural geometry, fog, and the
//! deterministic demo scene population.

pub mod content;
pub mod fog;
pub mod geometry;

pub use content::{GROUND_TEXTURE_KEY, SceneContent, SceneObject, SceneParams, Transform};
pub use fog::FogSettings;
pub use geometry::{MeshData, plane, uv_sphere};

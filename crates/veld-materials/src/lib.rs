//! Material kinds and GPU material data for the Veld viewer.
//!
//! Materials are a closed set of shading models resolved through an explicit
//! table, replacing any string-keyed dispatch at runtime.

pub mod kind;
pub mod material;

pub use kind::{MaterialKind, ShadingProfile};
pub use material::{MaterialParams, MaterialUniform};

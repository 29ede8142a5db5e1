//! Point lighting for the Veld viewer.

pub mod point;

pub use point::{LightRig, LightsBlock, PointLight, PointLightGpu, attenuation};

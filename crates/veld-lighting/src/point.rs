//! Point light: localized light source with inverse-square attenuation.
//!
//! Provides [`PointLight`] (CPU), [`PointLightGpu`] (GPU), [`LightsBlock`]
//! (the uniform block uploaded once per scene), and [`LightRig`], the fixed
//! three-light arrangement the demo scene uses.

use bytemuck::{Pod, Zeroable};

/// CPU-side point light descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    /// Position in world coordinates.
    pub position: glam::Vec3,
    /// Linear RGB color.
    pub color: glam::Vec3,
    /// Luminous intensity. Higher values push the light further.
    pub intensity: f32,
    /// Maximum radius of effect. `0.0` means unbounded range.
    pub range: f32,
}

impl PointLight {
    /// A white light of intensity 1 with unbounded range.
    pub fn white_at(position: glam::Vec3) -> Self {
        Self {
            position,
            color: glam::Vec3::ONE,
            intensity: 1.0,
            range: 0.0,
        }
    }
}

/// Compute attenuation at a given distance from a point light.
///
/// Unbounded lights (`range == 0.0`) do not attenuate. Bounded lights use
/// inverse-square falloff (+1.0 prevents the singularity at d=0) with a
/// smooth window that reaches exactly zero at the cutoff range.
pub fn attenuation(distance: f32, range: f32) -> f32 {
    if range <= 0.0 {
        return 1.0;
    }
    if distance >= range {
        return 0.0;
    }
    let inv_sq = 1.0 / (distance * distance + 1.0);
    let ratio = distance / range;
    let t = (1.0 - ratio * ratio).max(0.0);
    inv_sq * t * t
}

/// Per-light GPU data, 32 bytes, std140-compatible.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PointLightGpu {
    /// xyz = position (world space), w = range (0 = unbounded).
    pub position_range: [f32; 4],
    /// xyz = color (linear RGB), w = intensity.
    pub color_intensity: [f32; 4],
}

impl From<&PointLight> for PointLightGpu {
    fn from(light: &PointLight) -> Self {
        Self {
            position_range: [
                light.position.x,
                light.position.y,
                light.position.z,
                light.range,
            ],
            color_intensity: [
                light.color.x,
                light.color.y,
                light.color.z,
                light.intensity,
            ],
        }
    }
}

/// Uniform block holding the active light list.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightsBlock {
    /// x = number of active lights; y, z, w pad to 16 bytes.
    pub counts: [u32; 4],
    /// Fixed-capacity light array; entries past `counts[0]` are zeroed.
    pub lights: [PointLightGpu; LightsBlock::MAX_LIGHTS],
}

impl LightsBlock {
    /// Maximum number of lights in the uniform block.
    pub const MAX_LIGHTS: usize = 8;

    /// Size in bytes of the uniform block.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}

/// A fixed arrangement of point lights for one scene.
#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    lights: Vec<PointLight>,
}

impl LightRig {
    /// The demo scene's rig: three white lights, intensity 1, unbounded,
    /// at (0, 200, 0), (100, 200, 100), and (-100, -200, -100).
    pub fn fixed() -> Self {
        Self {
            lights: vec![
                PointLight::white_at(glam::Vec3::new(0.0, 200.0, 0.0)),
                PointLight::white_at(glam::Vec3::new(100.0, 200.0, 100.0)),
                PointLight::white_at(glam::Vec3::new(-100.0, -200.0, -100.0)),
            ],
        }
    }

    /// The lights in declaration order.
    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Number of lights in the rig.
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Returns `true` if the rig holds no lights.
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Pack the rig into the GPU uniform block, truncating past capacity.
    pub fn to_block(&self) -> LightsBlock {
        let mut block = LightsBlock::zeroed();
        let count = self.lights.len().min(LightsBlock::MAX_LIGHTS);
        block.counts[0] = count as u32;
        for (slot, light) in block.lights.iter_mut().zip(self.lights.iter().take(count)) {
            *slot = light.into();
        }
        block
    }
}

//! Material parameters and their packed GPU representation.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::kind::MaterialKind;

/// CPU-side material description attached to a scene object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialParams {
    /// Shading model.
    pub kind: MaterialKind,
    /// Surface color in linear RGBA.
    pub color: [f32; 4],
    /// Render both faces of each triangle.
    pub double_sided: bool,
    /// UV tiling factor applied in both axes when a texture is bound.
    pub uv_repeat: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            kind: MaterialKind::Basic,
            color: [1.0, 1.0, 1.0, 1.0],
            double_sided: false,
            uv_repeat: 1.0,
        }
    }
}

impl MaterialParams {
    /// A material of the given kind with the given color.
    pub fn new(kind: MaterialKind, color: [f32; 4]) -> Self {
        Self {
            kind,
            color,
            ..Self::default()
        }
    }

    /// Pack the material and its resolved shading profile for GPU upload.
    pub fn to_uniform(&self) -> MaterialUniform {
        let profile = self.kind.profile();
        MaterialUniform {
            color: self.color,
            params: [
                if profile.lit { 1.0 } else { 0.0 },
                profile.specular_strength,
                profile.shininess,
                self.uv_repeat,
            ],
        }
    }
}

/// GPU-friendly packed material data, 32 bytes, std140-compatible.
///
/// `params` carries `(lit, specular_strength, shininess, uv_repeat)`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MaterialUniform {
    /// Surface color in linear RGBA.
    pub color: [f32; 4],
    /// Resolved shading parameters.
    pub params: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_uniform_size_and_alignment() {
        assert_eq!(std::mem::size_of::<MaterialUniform>(), 32);
        assert!(std::mem::align_of::<MaterialUniform>() >= 4);
    }

    #[test]
    fn test_uniform_carries_profile() {
        let mat = MaterialParams::new(MaterialKind::Phong, [1.0, 0.5, 0.0, 1.0]);
        let uniform = mat.to_uniform();
        assert_eq!(uniform.color, [1.0, 0.5, 0.0, 1.0]);
        assert_eq!(uniform.params[0], 1.0); // lit
        assert_eq!(uniform.params[1], 1.0); // specular strength
        assert_eq!(uniform.params[2], 30.0); // shininess
        assert_eq!(uniform.params[3], 1.0); // uv repeat
    }

    #[test]
    fn test_basic_uniform_is_unlit() {
        let uniform = MaterialParams::new(MaterialKind::Basic, [1.0; 4]).to_uniform();
        assert_eq!(uniform.params[0], 0.0);
    }

    #[test]
    fn test_uv_repeat_forwarded() {
        let mat = MaterialParams {
            uv_repeat: 80.0,
            ..MaterialParams::new(MaterialKind::Standard, [0.27, 0.27, 0.27, 1.0])
        };
        let uniform = mat.to_uniform();
        assert_eq!(uniform.params[3], 80.0);
    }

    #[test]
    fn test_default_material_is_white_basic() {
        let mat = MaterialParams::default();
        assert_eq!(mat.kind, MaterialKind::Basic);
        assert_eq!(mat.color, [1.0, 1.0, 1.0, 1.0]);
        assert!(!mat.double_sided);
    }
}

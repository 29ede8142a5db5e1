//! The closed set of material shading models.

use serde::{Deserialize, Serialize};

/// Shading model for a scene object's surface.
///
/// Unknown names resolve to [`MaterialKind::Basic`], the unlit fallback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// Unlit: surface color only, no lighting response.
    #[default]
    Basic,
    /// Diffuse-only lighting, no specular highlight.
    Lambert,
    /// Diffuse plus a sharp specular highlight.
    Phong,
    /// Rough dielectric response with a broad, dim highlight.
    Standard,
}

/// Resolved shading parameters for one [`MaterialKind`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingProfile {
    /// Whether lights are evaluated at all.
    pub lit: bool,
    /// Specular highlight strength in `[0.0, 1.0]`.
    pub specular_strength: f32,
    /// Specular exponent. Higher values tighten the highlight.
    pub shininess: f32,
}

/// The dispatch table: one profile per kind, total over the enum.
const PROFILES: [(MaterialKind, ShadingProfile); 4] = [
    (
        MaterialKind::Basic,
        ShadingProfile {
            lit: false,
            specular_strength: 0.0,
            shininess: 1.0,
        },
    ),
    (
        MaterialKind::Lambert,
        ShadingProfile {
            lit: true,
            specular_strength: 0.0,
            shininess: 1.0,
        },
    ),
    (
        MaterialKind::Phong,
        ShadingProfile {
            lit: true,
            specular_strength: 1.0,
            shininess: 30.0,
        },
    ),
    (
        MaterialKind::Standard,
        ShadingProfile {
            lit: true,
            specular_strength: 0.25,
            shininess: 16.0,
        },
    ),
];

impl MaterialKind {
    /// Parse a material kind from a configuration name.
    ///
    /// Falls back to [`MaterialKind::Basic`] for anything unrecognized.
    pub fn from_name(name: &str) -> Self {
        match name {
            "basic" => Self::Basic,
            "lambert" => Self::Lambert,
            "phong" => Self::Phong,
            "standard" => Self::Standard,
            _ => Self::Basic,
        }
    }

    /// Resolve this kind through the shading table.
    pub fn profile(self) -> ShadingProfile {
        PROFILES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, profile)| *profile)
            .expect("shading table covers every material kind")
    }
}

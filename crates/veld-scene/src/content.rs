//! Deterministic scene population: the fixed demo content and its lookup.

use glam::{Quat, Vec3};

use veld_lighting::LightRig;
use veld_materials::{MaterialKind, MaterialParams};

use crate::fog::FogSettings;
use crate::geometry::{MeshData, plane, uv_sphere};

/// Rigid transform applied to a scene object's geometry at upload time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// World-space translation.
    pub translation: Vec3,
    /// World-space rotation.
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    /// Transform an object-space point into world space.
    pub fn apply_point(&self, p: [f32; 3]) -> [f32; 3] {
        (self.rotation * Vec3::from(p) + self.translation).into()
    }

    /// Rotate an object-space normal into world space.
    pub fn apply_normal(&self, n: [f32; 3]) -> [f32; 3] {
        (self.rotation * Vec3::from(n)).into()
    }
}

/// One renderable object in the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObject {
    /// Stable name for lookup.
    pub name: String,
    /// Object-space geometry.
    pub mesh: MeshData,
    /// Surface material.
    pub material: MaterialParams,
    /// Placement in the world.
    pub transform: Transform,
    /// Whether this object casts shadows.
    pub cast_shadow: bool,
    /// Whether this object receives shadows.
    pub receive_shadow: bool,
    /// Key of the texture bound to this object, if any.
    pub texture_key: Option<String>,
}

/// Parameters for building the scene. Defaults reproduce the fixed demo.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    /// Clear color behind everything.
    pub background: [f32; 3],
    /// Fog settings.
    pub fog: FogSettings,
    /// Sphere radius.
    pub sphere_radius: f32,
    /// Sphere longitudinal resolution.
    pub sphere_segments: u32,
    /// Sphere latitudinal resolution.
    pub sphere_rings: u32,
    /// Height the sphere hovers at.
    pub sphere_height: f32,
    /// Sphere surface color.
    pub sphere_color: [f32; 4],
    /// Ground plane side length.
    pub ground_size: f32,
    /// Ground surface color.
    pub ground_color: [f32; 4],
    /// Ground texture tiling factor.
    pub ground_repeat: f32,
    /// Camera vertical field of view in degrees.
    pub camera_fov_degrees: f32,
    /// Camera near clip plane.
    pub camera_near: f32,
    /// Camera far clip plane.
    pub camera_far: f32,
    /// Camera starting position; the camera looks at the origin.
    pub camera_position: [f32; 3],
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            background: [0.8, 0.19, 1.0],
            fog: FogSettings::default(),
            sphere_radius: 1.0,
            sphere_segments: 32,
            sphere_rings: 16,
            sphere_height: 5.0,
            sphere_color: [1.0, 1.0, 1.0, 1.0],
            ground_size: 900.0,
            ground_color: [0.27, 0.27, 0.27, 1.0],
            ground_repeat: 80.0,
            camera_fov_degrees: 45.0,
            camera_near: 0.1,
            camera_far: 1000.0,
            camera_position: [5.0, 5.0, 5.0],
        }
    }
}

/// Key under which the ground texture is registered with the renderer.
pub const GROUND_TEXTURE_KEY: &str = "ground";

/// Root container of all renderable content for one viewport session.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneContent {
    /// Clear color.
    pub background: [f32; 3],
    /// Fog settings.
    pub fog: FogSettings,
    /// Renderable objects in declaration order.
    pub objects: Vec<SceneObject>,
    /// Point lights.
    pub lights: LightRig,
}

impl SceneContent {
    /// Build the scene. The same parameters always produce identical content.
    pub fn build(params: &SceneParams) -> Self {
        let sphere = SceneObject {
            name: "sphere".to_string(),
            mesh: uv_sphere(
                params.sphere_radius,
                params.sphere_segments,
                params.sphere_rings,
            ),
            material: MaterialParams::new(MaterialKind::Phong, params.sphere_color),
            transform: Transform {
                translation: Vec3::new(0.0, params.sphere_height, 0.0),
                rotation: Quat::IDENTITY,
            },
            cast_shadow: true,
            receive_shadow: false,
            texture_key: None,
        };

        // The plane is generated facing +Z and rotated a quarter turn about
        // X to lie horizontal, so both faces must be rendered.
        let ground = SceneObject {
            name: "ground".to_string(),
            mesh: plane(params.ground_size),
            material: MaterialParams {
                double_sided: true,
                uv_repeat: params.ground_repeat,
                ..MaterialParams::new(MaterialKind::Standard, params.ground_color)
            },
            transform: Transform {
                translation: Vec3::ZERO,
                rotation: Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
            },
            cast_shadow: false,
            receive_shadow: true,
            texture_key: Some(GROUND_TEXTURE_KEY.to_string()),
        };

        Self {
            background: params.background,
            fog: params.fog,
            objects: vec![sphere, ground],
            lights: LightRig::fixed(),
        }
    }

    /// Look up an object by its stable name.
    pub fn object_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_is_deterministic() {
        let a = SceneContent::build(&SceneParams::default());
        let b = SceneContent::build(&SceneParams::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_object_and_light_counts() {
        let scene = SceneContent::build(&SceneParams::default());
        assert_eq!(scene.objects.len(), 2);
        assert_eq!(scene.lights.len(), 3);
        assert!(scene.fog.enabled);
    }

    #[test]
    fn test_sphere_hovers_at_five() {
        let scene = SceneContent::build(&SceneParams::default());
        let sphere = scene.object_by_name("sphere").unwrap();
        assert_eq!(sphere.transform.translation, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(sphere.material.kind, MaterialKind::Phong);
        assert!(sphere.cast_shadow);
        assert!(sphere.texture_key.is_none());
    }

    #[test]
    fn test_ground_rotated_quarter_turn() {
        let scene = SceneContent::build(&SceneParams::default());
        let ground = scene.object_by_name("ground").unwrap();
        let expected = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2);
        assert!(ground.transform.rotation.abs_diff_eq(expected, 1e-6));
        assert!(ground.material.double_sided);
        assert_eq!(ground.material.uv_repeat, 80.0);
        assert_eq!(ground.material.kind, MaterialKind::Standard);
        assert_eq!(ground.texture_key.as_deref(), Some(GROUND_TEXTURE_KEY));
    }

    #[test]
    fn test_rotated_plane_lies_horizontal() {
        let scene = SceneContent::build(&SceneParams::default());
        let ground = scene.object_by_name("ground").unwrap();
        // The +Z object-space normal must end up vertical in world space.
        let n = ground.transform.apply_normal([0.0, 0.0, 1.0]);
        assert!(n[0].abs() < 1e-6);
        assert!(n[2].abs() < 1e-6);
        assert!(
            (n[1].abs() - 1.0).abs() < 1e-6,
            "ground normal not vertical: {n:?}"
        );
    }

    #[test]
    fn test_lookup_by_name() {
        let scene = SceneContent::build(&SceneParams::default());
        assert!(scene.object_by_name("sphere").is_some());
        assert!(scene.object_by_name("ground").is_some());
        assert!(scene.object_by_name("camera").is_none());
    }

    #[test]
    fn test_transform_apply_point() {
        let t = Transform {
            translation: Vec3::new(0.0, 5.0, 0.0),
            rotation: Quat::IDENTITY,
        };
        assert_eq!(t.apply_point([1.0, 0.0, 0.0]), [1.0, 5.0, 0.0]);
    }

    #[test]
    fn test_default_params_match_demo_constants() {
        let p = SceneParams::default();
        assert_eq!(p.ground_size, 900.0);
        assert_eq!(p.ground_repeat, 80.0);
        assert_eq!(p.sphere_height, 5.0);
        assert_eq!(p.camera_fov_degrees, 45.0);
        assert_eq!(p.camera_position, [5.0, 5.0, 5.0]);
    }
}

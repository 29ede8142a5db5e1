//! Lit rendering pipeline: point-light shading with exponential-squared fog.
//!
//! Uses [`VertexPositionNormalUv`] geometry with the camera uniform at
//! `@group(0)`, the environment (fog + lights) at `@group(1)`, and the
//! material at `@group(2)`. The material's resolved shading profile selects
//! between unlit, diffuse-only, and specular responses in the shader.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};

use veld_lighting::{LightRig, LightsBlock};
use veld_materials::MaterialUniform;
use veld_scene::FogSettings;

use crate::buffer::{MeshBuffer, VertexPositionNormalUv};

/// Uniform buffer for camera view-projection matrix and position.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// xyz = camera world position.
    pub camera_pos: [f32; 4],
}

/// Uniform block for everything the scene contributes to shading:
/// fog parameters and the point light list.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct EnvironmentUniform {
    /// rgb = fog color, w = fog enabled flag.
    pub fog_color_enabled: [f32; 4],
    /// x = fog density; remaining components pad to 16 bytes.
    pub fog_params: [f32; 4],
    /// Light count and fixed-capacity light array.
    pub lights: LightsBlock,
}

impl EnvironmentUniform {
    /// Pack fog settings and a light rig for GPU upload.
    pub fn new(fog: &FogSettings, rig: &LightRig) -> Self {
        Self {
            fog_color_enabled: [
                fog.color[0],
                fog.color[1],
                fog.color[2],
                if fog.enabled { 1.0 } else { 0.0 },
            ],
            fog_params: [fog.density, 0.0, 0.0, 0.0],
            lights: rig.to_block(),
        }
    }

    /// Size in bytes of the uniform block.
    pub const SIZE: u64 = std::mem::size_of::<Self>() as u64;
}

/// Lit rendering pipeline: camera at group 0, environment at group 1,
/// material at group 2.
pub struct LitPipeline {
    /// The underlying wgpu render pipeline.
    pub pipeline: wgpu::RenderPipeline,
    /// Camera uniform bind group layout (group 0).
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    /// Environment uniform bind group layout (group 1).
    pub environment_bind_group_layout: wgpu::BindGroupLayout,
    /// Material uniform bind group layout (group 2).
    pub material_bind_group_layout: wgpu::BindGroupLayout,
}

impl LitPipeline {
    /// Create a new lit pipeline.
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
        cull_mode: Option<wgpu::Face>,
    ) -> Self {
        let camera_bind_group_layout = camera_layout(device, "lit-camera-bgl");
        let environment_bind_group_layout = environment_layout(device, "lit-environment-bgl");
        let material_bind_group_layout = material_layout(device, "lit-material-bgl");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("lit-pipeline-layout"),
            bind_group_layouts: &[
                &camera_bind_group_layout,
                &environment_bind_group_layout,
                &material_bind_group_layout,
            ],
            immediate_size: 0,
        });

        let pipeline = build_pipeline(
            device,
            "lit-pipeline",
            &pipeline_layout,
            shader,
            surface_format,
            depth_format,
            cull_mode,
        );

        Self {
            pipeline,
            camera_bind_group_layout,
            environment_bind_group_layout,
            material_bind_group_layout,
        }
    }
}

/// Draw lit geometry with the given bind groups.
pub fn draw_lit<'a>(
    render_pass: &mut wgpu::RenderPass<'a>,
    pipeline: &LitPipeline,
    camera_bind_group: &'a wgpu::BindGroup,
    environment_bind_group: &'a wgpu::BindGroup,
    material_bind_group: &'a wgpu::BindGroup,
    mesh: &'a MeshBuffer,
) {
    render_pass.set_pipeline(&pipeline.pipeline);
    render_pass.set_bind_group(0, camera_bind_group, &[]);
    render_pass.set_bind_group(1, environment_bind_group, &[]);
    render_pass.set_bind_group(2, material_bind_group, &[]);
    mesh.bind(render_pass);
    mesh.draw(render_pass);
}

pub(crate) fn camera_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(std::mem::size_of::<CameraUniform>() as u64),
            },
            count: None,
        }],
    })
}

pub(crate) fn environment_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(EnvironmentUniform::SIZE),
            },
            count: None,
        }],
    })
}

pub(crate) fn material_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: NonZeroU64::new(std::mem::size_of::<MaterialUniform>() as u64),
            },
            count: None,
        }],
    })
}

pub(crate) fn build_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    surface_format: wgpu::TextureFormat,
    depth_format: Option<wgpu::TextureFormat>,
    cull_mode: Option<wgpu::Face>,
) -> wgpu::RenderPipeline {
    let depth_stencil = depth_format.map(|format| wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::GreaterEqual, // reverse-Z
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[VertexPositionNormalUv::layout()],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            unclipped_depth: false,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
        },
        depth_stencil,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: surface_format,
                blend: None, // opaque
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        multiview_mask: None,
        cache: None,
    })
}

/// The WGSL source code for the lit shader.
pub const LIT_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
};

struct PointLight {
    position_range: vec4<f32>,
    color_intensity: vec4<f32>,
};

struct Environment {
    fog_color_enabled: vec4<f32>,
    fog_params: vec4<f32>,
    light_counts: vec4<u32>,
    lights: array<PointLight, 8>,
};

struct Material {
    color: vec4<f32>,
    // x = lit, y = specular strength, z = shininess, w = uv repeat
    params: vec4<f32>,
};

@group(0) @binding(0) var<uniform> camera: CameraUniform;
@group(1) @binding(0) var<uniform> env: Environment;
@group(2) @binding(0) var<uniform> material: Material;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(in.position, 1.0);
    out.world_pos = in.position;
    out.normal = in.normal;
    out.uv = in.uv * material.params.w;
    return out;
}

fn attenuation(dist: f32, range: f32) -> f32 {
    if (range <= 0.0) {
        return 1.0;
    }
    if (dist >= range) {
        return 0.0;
    }
    let inv_sq = 1.0 / (dist * dist + 1.0);
    let ratio = dist / range;
    let t = max(1.0 - ratio * ratio, 0.0);
    return inv_sq * t * t;
}

fn shade(base: vec3<f32>, world_pos: vec3<f32>, raw_normal: vec3<f32>) -> vec3<f32> {
    if (material.params.x < 0.5) {
        return base;
    }
    let view_dir = normalize(camera.camera_pos.xyz - world_pos);
    var n = normalize(raw_normal);
    // Flip toward the viewer so double-sided surfaces light correctly.
    if (dot(n, view_dir) < 0.0) {
        n = -n;
    }
    var diffuse = vec3<f32>(0.0);
    var specular = vec3<f32>(0.0);
    let count = env.light_counts.x;
    for (var i = 0u; i < count; i = i + 1u) {
        let light = env.lights[i];
        let to_light = light.position_range.xyz - world_pos;
        let dist = length(to_light);
        let l = to_light / max(dist, 1e-4);
        let radiance = light.color_intensity.rgb * light.color_intensity.w
            * attenuation(dist, light.position_range.w);
        diffuse += radiance * max(dot(n, l), 0.0);
        let h = normalize(l + view_dir);
        specular += radiance * material.params.y
            * pow(max(dot(n, h), 0.0), material.params.z);
    }
    let ambient = vec3<f32>(0.08);
    return base * (ambient + diffuse) + specular;
}

fn apply_fog(color: vec3<f32>, world_pos: vec3<f32>) -> vec3<f32> {
    if (env.fog_color_enabled.w < 0.5) {
        return color;
    }
    let dist = length(camera.camera_pos.xyz - world_pos);
    let x = env.fog_params.x * dist;
    let factor = 1.0 - exp(-x * x);
    return mix(color, env.fog_color_enabled.rgb, factor);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let shaded = shade(material.color.rgb, in.world_pos, in.normal);
    return vec4<f32>(apply_fog(shaded, in.world_pos), material.color.a);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_uniform_size() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }

    #[test]
    fn test_environment_uniform_size() {
        // fog (16) + params (16) + counts (16) + 8 lights * 32
        assert_eq!(EnvironmentUniform::SIZE, 16 + 16 + 16 + 8 * 32);
    }

    #[test]
    fn test_environment_packs_fog_and_lights() {
        let fog = FogSettings::default();
        let rig = LightRig::fixed();
        let env = EnvironmentUniform::new(&fog, &rig);
        assert_eq!(env.fog_color_enabled[3], 1.0);
        assert_eq!(env.fog_params[0], 0.005);
        assert_eq!(env.lights.counts[0], 3);
    }

    #[test]
    fn test_environment_disabled_fog_flag() {
        let fog = FogSettings {
            enabled: false,
            ..FogSettings::default()
        };
        let env = EnvironmentUniform::new(&fog, &LightRig::fixed());
        assert_eq!(env.fog_color_enabled[3], 0.0);
    }

    #[test]
    fn test_lit_shader_declares_entry_points() {
        assert!(LIT_SHADER_SOURCE.contains("fn vs_main"));
        assert!(LIT_SHADER_SOURCE.contains("fn fs_main"));
        assert!(LIT_SHADER_SOURCE.contains("array<PointLight, 8>"));
    }
}

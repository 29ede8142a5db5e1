//! Textured rendering pipeline: the lit shading model plus a tiled texture.
//!
//! Shares the camera/environment/material group layout with the lit
//! pipeline and adds the texture + sampler at `@group(3)`. The material's
//! `uv_repeat` scales the texture coordinates in the vertex stage, so a
//! repeat-wrap sampler tiles the image across the surface.

use crate::buffer::MeshBuffer;
use crate::lit_pipeline::{build_pipeline, camera_layout, environment_layout, material_layout};

/// Textured rendering pipeline: camera at group 0, environment at group 1,
/// material at group 2, texture at group 3.
pub struct TexturedPipeline {
    /// The underlying wgpu render pipeline.
    pub pipeline: wgpu::RenderPipeline,
    /// Camera uniform bind group layout (group 0).
    pub camera_bind_group_layout: wgpu::BindGroupLayout,
    /// Environment uniform bind group layout (group 1).
    pub environment_bind_group_layout: wgpu::BindGroupLayout,
    /// Material uniform bind group layout (group 2).
    pub material_bind_group_layout: wgpu::BindGroupLayout,
}

impl TexturedPipeline {
    /// Create a new textured pipeline.
    ///
    /// `texture_bind_group_layout` is the layout for group 3 (texture + sampler).
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        depth_format: Option<wgpu::TextureFormat>,
        cull_mode: Option<wgpu::Face>,
        texture_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let camera_bind_group_layout = camera_layout(device, "textured-camera-bgl");
        let environment_bind_group_layout = environment_layout(device, "textured-environment-bgl");
        let material_bind_group_layout = material_layout(device, "textured-material-bgl");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("textured-pipeline-layout"),
            bind_group_layouts: &[
                &camera_bind_group_layout,
                &environment_bind_group_layout,
                &material_bind_group_layout,
                texture_bind_group_layout,
            ],
            immediate_size: 0,
        });

        let pipeline = build_pipeline(
            device,
            "textured-pipeline",
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

/// Draw textured geometry with the given bind groups.
#[allow(clippy::too_many_arguments)]
pub fn draw_textured<'a>(
    render_pass: &mut wgpu::RenderPass<'a>,
    pipeline: &TexturedPipeline,
    camera_bind_group: &'a wgpu::BindGroup,
    environment_bind_group: &'a wgpu::BindGroup,
    material_bind_group: &'a wgpu::BindGroup,
    texture_bind_group: &'a wgpu::BindGroup,
    mesh: &'a MeshBuffer,
) {
    render_pass.set_pipeline(&pipeline.pipeline);
    render_pass.set_bind_group(0, camera_bind_group, &[]);
    render_pass.set_bind_group(1, environment_bind_group, &[]);
    render_pass.set_bind_group(2, material_bind_group, &[]);
    render_pass.set_bind_group(3, texture_bind_group, &[]);
    mesh.bind(render_pass);
    mesh.draw(render_pass);
}

/// The WGSL source code for the textured shader.
pub const TEXTURED_SHADER_SOURCE: &str = r#"
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
@group(3) @binding(0) var surface_texture: texture_2d<f32>;
@group(3) @binding(1) var surface_sampler: sampler;

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
    let texel = textureSample(surface_texture, surface_sampler, in.uv);
    let base = material.color.rgb * texel.rgb;
    let shaded = shade(base, in.world_pos, in.normal);
    return vec4<f32>(apply_fog(shaded, in.world_pos), material.color.a * texel.a);
}
"#;

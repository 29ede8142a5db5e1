//! Uploads a [`SceneContent`] to the GPU once and redraws it every frame.

use std::sync::Arc;

use veld_scene::{SceneContent, SceneObject};

use crate::buffer::{BufferAllocator, IndexData, MeshBuffer, VertexPositionNormalUv};
use crate::camera::Camera;
use crate::depth::DepthBuffer;
use crate::gpu::{RenderContext, SurfaceError};
use crate::lit_pipeline::{EnvironmentUniform, LIT_SHADER_SOURCE, LitPipeline, draw_lit};
use crate::pass::{FrameEncoder, RenderPassBuilder};
use crate::shader::ShaderLibrary;
use crate::texture::{ManagedTexture, TextureError, TextureManager, WrapMode};
use crate::textured_pipeline::{TEXTURED_SHADER_SOURCE, TexturedPipeline, draw_textured};

/// Decoded image pixels handed to the renderer for upload.
#[derive(Clone, Debug)]
pub struct TexturePixels {
    /// RGBA8 pixel data, row-major.
    pub data: Vec<u8>,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
}

/// Errors from scene upload.
#[derive(Debug, thiserror::Error)]
pub enum SceneRendererError {
    /// A scene object references a texture that was not provided.
    #[error("texture '{0}' was not provided to the renderer")]
    MissingTexture(String),

    /// Texture creation failed.
    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// One scene object resident on the GPU.
struct GpuObject {
    mesh: MeshBuffer,
    material_bind_group: wgpu::BindGroup,
    texture: Option<Arc<ManagedTexture>>,
}

/// Renders one uploaded scene from a camera into the window surface.
///
/// The scene is static after upload; only the camera uniform changes per
/// frame, and only the surface and depth buffer change on resize.
pub struct SceneRenderer {
    context: RenderContext,
    depth: DepthBuffer,
    lit: LitPipeline,
    textured: TexturedPipeline,
    camera_buffer: wgpu::Buffer,
    lit_camera_bind_group: wgpu::BindGroup,
    textured_camera_bind_group: wgpu::BindGroup,
    lit_environment_bind_group: wgpu::BindGroup,
    textured_environment_bind_group: wgpu::BindGroup,
    objects: Vec<GpuObject>,
    background: wgpu::Color,
}

impl SceneRenderer {
    /// Upload the scene and build all pipelines and bind groups.
    ///
    /// `textures` maps the scene's texture keys to decoded pixels; every key
    /// referenced by a scene object must be present.
    pub fn new(
        context: RenderContext,
        scene: &SceneContent,
        textures: &[(String, TexturePixels)],
    ) -> Result<Self, SceneRendererError> {
        use wgpu::util::DeviceExt;

        let device = &context.device;
        let width = context.surface_config.width;
        let height = context.surface_config.height;

        let depth = DepthBuffer::new(device, width, height);

        let mut shaders = ShaderLibrary::new();
        let lit_shader = shaders.load_from_source(device, "lit", LIT_SHADER_SOURCE);
        let textured_shader = shaders.load_from_source(device, "textured", TEXTURED_SHADER_SOURCE);

        let mut texture_manager = TextureManager::new(device);

        // A pipeline renders both faces when any of its objects demands it.
        let lit_cull = cull_mode(scene.objects.iter().filter(|o| o.texture_key.is_none()));
        let textured_cull = cull_mode(scene.objects.iter().filter(|o| o.texture_key.is_some()));

        let lit = LitPipeline::new(
            device,
            &lit_shader,
            context.surface_format,
            Some(DepthBuffer::FORMAT),
            lit_cull,
        );
        let textured = TexturedPipeline::new(
            device,
            &textured_shader,
            context.surface_format,
            Some(DepthBuffer::FORMAT),
            textured_cull,
            texture_manager.bind_group_layout(),
        );

        // Camera uniform: written every frame, shared by both pipelines.
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("camera-uniform"),
            contents: bytemuck::cast_slice(&[Camera::default().to_uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lit_camera_bind_group = uniform_bind_group(
            device,
            "lit-camera-bg",
            &lit.camera_bind_group_layout,
            &camera_buffer,
        );
        let textured_camera_bind_group = uniform_bind_group(
            device,
            "textured-camera-bg",
            &textured.camera_bind_group_layout,
            &camera_buffer,
        );

        // Environment uniform: fog + lights, static for the scene's lifetime.
        let environment = EnvironmentUniform::new(&scene.fog, &scene.lights);
        let environment_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("environment-uniform"),
            contents: bytemuck::cast_slice(&[environment]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lit_environment_bind_group = uniform_bind_group(
            device,
            "lit-environment-bg",
            &lit.environment_bind_group_layout,
            &environment_buffer,
        );
        let textured_environment_bind_group = uniform_bind_group(
            device,
            "textured-environment-bg",
            &textured.environment_bind_group_layout,
            &environment_buffer,
        );

        let allocator = BufferAllocator::new(device);
        let mut objects = Vec::with_capacity(scene.objects.len());

        for object in &scene.objects {
            let vertices = world_space_vertices(object);
            let mesh = allocator.create_mesh(
                &object.name,
                bytemuck::cast_slice(&vertices),
                IndexData::U32(&object.mesh.indices),
            );

            let material_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{}-material", object.name)),
                contents: bytemuck::cast_slice(&[object.material.to_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM,
            });

            let texture = match &object.texture_key {
                Some(key) => {
                    let pixels = textures
                        .iter()
                        .find(|(name, _)| name == key)
                        .map(|(_, pixels)| pixels)
                        .ok_or_else(|| SceneRendererError::MissingTexture(key.clone()))?;
                    Some(texture_manager.create_texture(
                        device,
                        &context.queue,
                        key,
                        &pixels.data,
                        pixels.width,
                        pixels.height,
                        wgpu::TextureFormat::Rgba8UnormSrgb,
                        WrapMode::Repeat,
                    )?)
                }
                None => None,
            };

            let material_layout = if texture.is_some() {
                &textured.material_bind_group_layout
            } else {
                &lit.material_bind_group_layout
            };
            let material_bind_group = uniform_bind_group(
                device,
                &format!("{}-material-bg", object.name),
                material_layout,
                &material_buffer,
            );

            objects.push(GpuObject {
                mesh,
                material_bind_group,
                texture,
            });
        }

        let background = wgpu::Color {
            r: scene.background[0] as f64,
            g: scene.background[1] as f64,
            b: scene.background[2] as f64,
            a: 1.0,
        };

        log::info!(
            "Scene uploaded: {} objects, {} lights, fog {}",
            objects.len(),
            scene.lights.len(),
            if scene.fog.enabled { "on" } else { "off" },
        );

        Ok(Self {
            context,
            depth,
            lit,
            textured,
            camera_buffer,
            lit_camera_bind_group,
            textured_camera_bind_group,
            lit_environment_bind_group,
            textured_environment_bind_group,
            objects,
            background,
        })
    }

    /// Draw the scene from the given camera.
    pub fn render(&mut self, camera: &Camera) -> Result<(), SurfaceError> {
        self.context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[camera.to_uniform()]),
        );

        let surface_texture = self.context.get_current_texture()?;
        let mut frame = FrameEncoder::new(
            &self.context.device,
            Arc::new(self.context.queue.clone()),
            surface_texture,
        );

        {
            let builder = RenderPassBuilder::new()
                .clear_color(self.background)
                .depth(
                    self.depth
                        .texture
                        .create_view(&wgpu::TextureViewDescriptor::default()),
                    DepthBuffer::CLEAR_VALUE,
                )
                .label("scene-pass");
            let mut pass = frame.begin_render_pass(&builder);

            for object in &self.objects {
                match &object.texture {
                    Some(texture) => draw_textured(
                        &mut pass,
                        &self.textured,
                        &self.textured_camera_bind_group,
                        &self.textured_environment_bind_group,
                        &object.material_bind_group,
                        &texture.bind_group,
                        &object.mesh,
                    ),
                    None => draw_lit(
                        &mut pass,
                        &self.lit,
                        &self.lit_camera_bind_group,
                        &self.lit_environment_bind_group,
                        &object.material_bind_group,
                        &object.mesh,
                    ),
                }
            }
        }

        frame.submit();
        Ok(())
    }

    /// Resize the surface and depth buffer together.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.depth
            .resize(&self.context.device, width.max(1), height.max(1));
    }

    /// Current surface size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (
            self.context.surface_config.width,
            self.context.surface_config.height,
        )
    }
}

/// Build a single-entry uniform bind group.
fn uniform_bind_group(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

/// Bake an object's transform into its vertices for upload.
fn world_space_vertices(object: &SceneObject) -> Vec<VertexPositionNormalUv> {
    object
        .mesh
        .positions
        .iter()
        .zip(&object.mesh.normals)
        .zip(&object.mesh.uvs)
        .map(|((position, normal), uv)| VertexPositionNormalUv {
            position: object.transform.apply_point(*position),
            normal: object.transform.apply_normal(*normal),
            uv: *uv,
        })
        .collect()
}

/// Back-face culling unless any object drawn by the pipeline is double-sided.
fn cull_mode<'a>(mut objects: impl Iterator<Item = &'a SceneObject>) -> Option<wgpu::Face> {
    if objects.any(|o| o.material.double_sided) {
        None
    } else {
        Some(wgpu::Face::Back)
    }
}

//! wgpu rendering for the Veld viewer: GPU context, surface management,
//! camera, pipelines, and the scene renderer driven by the viewport.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod lit_pipeline;
pub mod pass;
pub mod scene_renderer;
pub mod shader;
pub mod surface;
pub mod texture;
pub mod textured_pipeline;

pub use buffer::{BufferAllocator, IndexData, MeshBuffer, VertexPositionNormalUv};
pub use camera::Camera;
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use lit_pipeline::{
    CameraUniform, EnvironmentUniform, LIT_SHADER_SOURCE, LitPipeline, draw_lit,
};
pub use pass::{DepthAttachmentConfig, FrameEncoder, RenderPassBuilder};
pub use scene_renderer::{SceneRenderer, SceneRendererError, TexturePixels};
pub use shader::{ShaderError, ShaderLibrary};
pub use surface::{PhysicalSize, SurfaceResizeEvent, SurfaceWrapper};
pub use texture::{ManagedTexture, TextureError, TextureManager, WrapMode};
pub use textured_pipeline::{TEXTURED_SHADER_SOURCE, TexturedPipeline, draw_textured};

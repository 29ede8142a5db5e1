//! The seam between the viewport and the rasterizer.

use veld_render::Camera;
use veld_scene::SceneContent;

/// The rendering surface a viewport draws into.
///
/// The viewport treats the rasterizer as opaque: draw the scene from a
/// camera, track an output size. The production implementation wraps the
/// wgpu scene renderer; tests substitute a recording fake.
pub trait RenderSurface {
    /// Error produced by a failed draw. Frame errors are logged and the
    /// frame is skipped; they do not tear the session down.
    type Error: std::fmt::Display;

    /// Draw the scene from the camera into the surface.
    fn render(&mut self, scene: &SceneContent, camera: &Camera) -> Result<(), Self::Error>;

    /// Apply a new output size in physical pixels.
    fn set_size(&mut self, width: u32, height: u32);

    /// Current output size in physical pixels.
    fn size(&self) -> (u32, u32);
}

//! The toggle container owning at most one viewport.

use tracing::debug;

use veld_render::PhysicalSize;
use veld_scene::{SceneContent, SceneParams};

use crate::frame::FrameClock;
use crate::resize::ResizeBus;
use crate::surface::RenderSurface;
use crate::viewport::{MountError, Viewport};

/// Holds a mounted flag's worth of state: either one live [`Viewport`] or
/// nothing. Mounting builds a fresh session; unmounting tears it down.
/// Redundant toggles are no-ops.
pub struct SceneContainer<R, C, F>
where
    R: RenderSurface,
    C: FrameClock + Clone,
    F: FnMut(&SceneContent, u32, u32) -> Result<R, MountError>,
{
    params: SceneParams,
    make_surface: F,
    clock: C,
    resize_bus: ResizeBus,
    size: PhysicalSize,
    viewport: Option<Viewport<R, C>>,
}

impl<R, C, F> SceneContainer<R, C, F>
where
    R: RenderSurface,
    C: FrameClock + Clone,
    F: FnMut(&SceneContent, u32, u32) -> Result<R, MountError>,
{
    /// Create an unmounted container.
    ///
    /// `make_surface` builds a render surface for each mount; the clock and
    /// bus are shared across every session this container creates.
    pub fn new(
        params: SceneParams,
        make_surface: F,
        clock: C,
        resize_bus: ResizeBus,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            params,
            make_surface,
            clock,
            resize_bus,
            size: PhysicalSize { width, height },
            viewport: None,
        }
    }

    /// Whether a viewport is currently mounted.
    pub fn is_mounted(&self) -> bool {
        self.viewport.is_some()
    }

    /// Mount or unmount the viewport. Redundant calls are no-ops.
    pub fn set_mounted(&mut self, mounted: bool) -> Result<(), MountError> {
        match (mounted, self.viewport.is_some()) {
            (true, false) => {
                let viewport = Viewport::mount(
                    &self.params,
                    self.size.width,
                    self.size.height,
                    &mut self.make_surface,
                    self.clock.clone(),
                    &self.resize_bus,
                )?;
                self.viewport = Some(viewport);
            }
            (false, true) => {
                if let Some(mut viewport) = self.viewport.take() {
                    viewport.unmount();
                }
            }
            _ => {
                debug!(mounted, "redundant toggle ignored");
            }
        }
        Ok(())
    }

    /// Flip the mounted flag.
    pub fn toggle(&mut self) -> Result<(), MountError> {
        self.set_mounted(!self.is_mounted())
    }

    /// Record the current host dimensions, used for the next mount.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.size = PhysicalSize { width, height };
    }

    /// The mounted viewport, if any.
    pub fn viewport(&self) -> Option<&Viewport<R, C>> {
        self.viewport.as_ref()
    }

    /// The mounted viewport, if any, mutably.
    pub fn viewport_mut(&mut self) -> Option<&mut Viewport<R, C>> {
        self.viewport.as_mut()
    }
}

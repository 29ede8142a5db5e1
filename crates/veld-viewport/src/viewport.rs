//! The viewport: one rendering session from mount to unmount.

use glam::Vec3;
use tracing::{debug, info, trace, warn};

use veld_controls::OrbitControls;
use veld_input::MouseState;
use veld_render::{Camera, PhysicalSize};
use veld_scene::{SceneContent, SceneParams};

use crate::frame::{FrameClock, FrameRequest};
use crate::resize::{ResizeBus, ResizeSubscription};
use crate::surface::RenderSurface;

/// Lifecycle state of a viewport.
///
/// `Unmounting` is reachable from `Running` only; `Running` is the only
/// state in which frames render and resizes are honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleState {
    /// Setup in progress. Spans the body of [`Viewport::mount`]; a
    /// successfully constructed viewport is already `Running`.
    Mounting,
    /// Live: frames render, resizes apply.
    Running,
    /// Ordered teardown in progress. Spans the body of
    /// [`Viewport::unmount`].
    Unmounting,
    /// Torn down; every callback is a no-op.
    Unmounted,
}

/// Errors that abort a mount.
///
/// A mount failure is fatal to this viewport instance and surfaces to the
/// owning container; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    /// The mount area has no usable dimensions.
    #[error("viewport mount area is degenerate ({width}x{height})")]
    DegenerateSize { width: u32, height: u32 },

    /// Render surface construction failed.
    #[error("render surface construction failed: {0}")]
    Surface(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// One rendering session: scene, camera, surface, controls, and the frame
/// loop, owned together and torn down together.
pub struct Viewport<R: RenderSurface, C: FrameClock> {
    state: LifecycleState,
    scene: SceneContent,
    camera: Camera,
    surface: R,
    controls: OrbitControls,
    clock: C,
    resize: ResizeSubscription,
    pending_frame: Option<FrameRequest>,
    frames_rendered: u64,
    size: PhysicalSize,
}

impl<R: RenderSurface, C: FrameClock> Viewport<R, C> {
    /// Mount a new viewport: build the scene, camera, render surface, and
    /// controls, subscribe to resizes, and request the first frame.
    ///
    /// `make_surface` receives the built scene and the mount dimensions.
    /// Any failure aborts the mount; partially built resources are dropped.
    pub fn mount(
        params: &SceneParams,
        width: u32,
        height: u32,
        make_surface: impl FnOnce(&SceneContent, u32, u32) -> Result<R, MountError>,
        clock: C,
        resize_bus: &ResizeBus,
    ) -> Result<Self, MountError> {
        if width == 0 || height == 0 {
            return Err(MountError::DegenerateSize { width, height });
        }

        debug!(width, height, "mounting viewport");

        let scene = SceneContent::build(params);

        let mut camera = Camera::perspective(
            params.camera_fov_degrees.to_radians(),
            width as f32 / height as f32,
            params.camera_near,
            params.camera_far,
        );
        camera.position = Vec3::from(params.camera_position);
        camera.look_at(Vec3::ZERO);

        let surface = make_surface(&scene, width, height)?;
        let controls = OrbitControls::framing(camera.position, Vec3::ZERO);

        // Everything is built; go live. Subscribing and requesting the
        // first frame are the last steps so a failed mount leaves nothing
        // registered with the host.
        let resize = resize_bus.subscribe();
        let pending_frame = Some(clock.request());

        info!(
            objects = scene.objects.len(),
            lights = scene.lights.len(),
            "viewport running"
        );

        Ok(Self {
            state: LifecycleState::Running,
            scene,
            camera,
            surface,
            controls,
            clock,
            resize,
            pending_frame,
            frames_rendered: 0,
            size: PhysicalSize { width, height },
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The camera for this session.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The scene for this session.
    pub fn scene(&self) -> &SceneContent {
        &self.scene
    }

    /// The render surface for this session.
    pub fn surface(&self) -> &R {
        &self.surface
    }

    /// The orbit controls for this session.
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// Run one frame: apply any pending resize, feed input to the
    /// controls, draw, and request the next frame.
    ///
    /// A frame that fires after teardown began is a no-op.
    pub fn frame(&mut self, mouse: &MouseState) {
        if self.state != LifecycleState::Running {
            trace!(state = ?self.state, "frame callback ignored");
            return;
        }

        // The request that scheduled this frame has fired.
        self.pending_frame = None;

        if let Some(size) = self.resize.take() {
            self.apply_resize(size);
        }

        self.controls.update(mouse, &mut self.camera);

        if let Err(error) = self.surface.render(&self.scene, &self.camera) {
            warn!(%error, "frame skipped");
        }
        self.frames_rendered += 1;

        self.pending_frame = Some(self.clock.request());
    }

    /// Apply new dimensions directly, outside the bus path.
    ///
    /// Ignored unless running. Idempotent: unchanged dimensions mutate
    /// nothing, and a degenerate height is skipped entirely.
    pub fn handle_resize(&mut self, width: u32, height: u32) {
        if self.state != LifecycleState::Running {
            trace!(state = ?self.state, "resize ignored");
            return;
        }
        self.apply_resize(PhysicalSize { width, height });
    }

    fn apply_resize(&mut self, size: PhysicalSize) {
        if size.width == 0 || size.height == 0 {
            debug!(
                width = size.width,
                height = size.height,
                "skipping degenerate resize"
            );
            return;
        }
        if size == self.size {
            return;
        }

        self.size = size;
        self.surface.set_size(size.width, size.height);
        self.camera
            .set_aspect_ratio(size.width as f32, size.height as f32);
        debug!(width = size.width, height = size.height, "viewport resized");
    }

    /// Tear the session down in order: resize subscription first, then the
    /// pending frame request, then the controls, then the owned resources
    /// when the viewport is dropped.
    ///
    /// Only reachable from `Running`; calling again is a no-op.
    pub fn unmount(&mut self) {
        if self.state != LifecycleState::Running {
            debug!(state = ?self.state, "unmount ignored");
            return;
        }
        self.state = LifecycleState::Unmounting;

        self.resize.cancel();
        if let Some(request) = self.pending_frame.take() {
            self.clock.cancel(request);
        }
        self.controls.detach();

        self.state = LifecycleState::Unmounted;
        info!(frames = self.frames_rendered, "viewport unmounted");
    }
}

impl<R: RenderSurface, C: FrameClock> Drop for Viewport<R, C> {
    fn drop(&mut self) {
        // A viewport dropped while running still releases its listeners.
        self.unmount();
    }
}

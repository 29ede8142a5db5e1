//! Window creation and event handling via winit.
//!
//! [`ViewerApp`] implements winit's [`ApplicationHandler`]: it creates the
//! window and GPU state on resume, forwards events into the viewport
//! lifecycle, and drives frames from `RedrawRequested`.

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use veld_config::Config;
use veld_input::MouseState;
use veld_render::{
    Camera, SceneRenderer, SurfaceError, SurfaceResizeEvent, SurfaceWrapper,
    init_render_context_blocking,
};
use veld_scene::{FogSettings, GROUND_TEXTURE_KEY, SceneContent, SceneParams};
use veld_viewport::{MountError, RenderSurface, ResizeBus, SceneContainer};

use crate::assets::load_ground_texture;
use crate::clock::WinitFrameClock;

/// Builds one render surface per mount.
type SurfaceFactory =
    Box<dyn FnMut(&SceneContent, u32, u32) -> Result<WindowSurface, MountError>>;

type Container = SceneContainer<WindowSurface, WinitFrameClock, SurfaceFactory>;

/// The viewport's render surface backed by the wgpu scene renderer.
pub struct WindowSurface {
    renderer: SceneRenderer,
}

impl RenderSurface for WindowSurface {
    type Error = SurfaceError;

    fn render(&mut self, _scene: &SceneContent, camera: &Camera) -> Result<(), SurfaceError> {
        // The scene was uploaded at mount and is static afterwards.
        self.renderer.render(camera)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    fn size(&self) -> (u32, u32) {
        self.renderer.size()
    }
}

/// Application state for the viewer window.
pub struct ViewerApp {
    config: Config,
    window: Option<Arc<Window>>,
    container: Option<Container>,
    mouse: MouseState,
    resize_bus: ResizeBus,
    surface: SurfaceWrapper,
}

impl ViewerApp {
    /// Create the application from a loaded configuration.
    pub fn new(config: Config) -> Self {
        let surface = SurfaceWrapper::new(config.window.width, config.window.height, 1.0);
        Self {
            config,
            window: None,
            container: None,
            mouse: MouseState::new(),
            resize_bus: ResizeBus::new(),
            surface,
        }
    }

    /// Forward a normalized surface change into the viewport lifecycle.
    fn publish_resize(&mut self, resize: SurfaceResizeEvent) {
        if let Some(container) = &mut self.container {
            container.set_size(resize.physical.width, resize.physical.height);
        }
        self.resize_bus
            .publish(resize.physical.width, resize.physical.height);
    }

    /// Map the configuration onto the scene parameters.
    fn scene_params(&self) -> SceneParams {
        let config = &self.config;
        SceneParams {
            fog: FogSettings {
                enabled: config.fog.enabled,
                color: config.fog.color,
                density: config.fog.density,
            },
            ground_size: config.ground.size,
            ground_repeat: config.ground.repeat,
            camera_fov_degrees: config.camera.fov_degrees,
            camera_near: config.camera.near,
            camera_far: config.camera.far,
            camera_position: config.camera.position,
            ..SceneParams::default()
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(error) => {
                error!(%error, "window creation failed");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.surface = SurfaceWrapper::new(size.width, size.height, window.scale_factor());
        let clock = WinitFrameClock::new(Arc::clone(&window));

        let texture = load_ground_texture(Path::new(&self.config.ground.texture_path));
        let textures = vec![(GROUND_TEXTURE_KEY.to_string(), texture)];

        let vsync = self.config.window.vsync;
        let factory_window = Arc::clone(&window);
        let make_surface: SurfaceFactory = Box::new(move |scene, _width, _height| {
            let context = init_render_context_blocking(Arc::clone(&factory_window), vsync)
                .map_err(|e| MountError::Surface(Box::new(e)))?;
            let renderer = SceneRenderer::new(context, scene, &textures)
                .map_err(|e| MountError::Surface(Box::new(e)))?;
            Ok(WindowSurface { renderer })
        });

        let mut container = SceneContainer::new(
            self.scene_params(),
            make_surface,
            clock,
            self.resize_bus.clone(),
            size.width.max(1),
            size.height.max(1),
        );

        if let Err(error) = container.set_mounted(true) {
            error!(%error, "initial mount failed");
            event_loop.exit();
            return;
        }

        self.window = Some(window);
        self.container = Some(container);
        info!("viewer ready: drag to orbit, scroll to zoom, M toggles the scene");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(resize) = self.surface.handle_resize(size.width, size.height) {
                    self.publish_resize(resize);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    if let Some(resize) = self.surface.handle_scale_factor_changed(
                        scale_factor,
                        size.width,
                        size.height,
                    ) {
                        self.publish_resize(resize);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::KeyM => {
                    if let Some(container) = &mut self.container {
                        match container.toggle() {
                            Ok(()) => {
                                info!(mounted = container.is_mounted(), "scene toggled")
                            }
                            Err(error) => {
                                error!(%error, "remount failed");
                                event_loop.exit();
                            }
                        }
                        // Input accumulated while unmounted must not reach
                        // the fresh session's first frame.
                        self.mouse.clear_transients();
                    }
                }
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse.on_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse.on_scroll(delta);
            }
            WindowEvent::CursorEntered { .. } => {
                self.mouse.on_cursor_entered();
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse.on_cursor_left();
            }
            WindowEvent::RedrawRequested => {
                if let Some(container) = &mut self.container
                    && let Some(viewport) = container.viewport_mut()
                {
                    viewport.frame(&self.mouse);
                }
                self.mouse.clear_transients();
            }
            _ => {}
        }
    }
}

//! Orbit camera controller: drag to orbit a target, scroll to zoom.

use glam::Vec3;
use winit::event::MouseButton;

use veld_input::MouseState;
use veld_render::Camera;

/// Orbit-style camera controller bound to a target point.
///
/// Left-drag orbits (pitch clamped away from the poles), the scroll wheel
/// zooms (distance clamped), and [`update`](Self::update) writes the
/// resulting pose into the camera each frame. [`detach`](Self::detach)
/// releases the input binding; a detached controller ignores all input,
/// which the viewport relies on during teardown.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    /// Horizontal orbit angle in radians (azimuth).
    pub yaw: f32,
    /// Vertical orbit angle in radians (elevation above the horizon).
    pub pitch: f32,
    /// Distance from the target in world units.
    pub distance: f32,
    /// Point the camera orbits and looks at.
    pub target: Vec3,
    /// Minimum allowed zoom distance.
    pub distance_min: f32,
    /// Maximum allowed zoom distance.
    pub distance_max: f32,
    /// Mouse sensitivity for orbit rotation.
    pub orbit_sensitivity: f32,
    /// Scroll wheel zoom sensitivity (world units per line).
    pub zoom_sensitivity: f32,
    /// Minimum orbit pitch in radians.
    pub pitch_min: f32,
    /// Maximum orbit pitch in radians.
    pub pitch_max: f32,
    attached: bool,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 20.0_f32.to_radians(),
            distance: 10.0,
            target: Vec3::ZERO,
            distance_min: 1.0,
            distance_max: 500.0,
            orbit_sensitivity: 0.005,
            zoom_sensitivity: 1.0,
            pitch_min: -80.0_f32.to_radians(),
            pitch_max: 80.0_f32.to_radians(),
            attached: true,
        }
    }
}

impl OrbitControls {
    /// Build controls framing the given camera position around a target.
    ///
    /// The derived angles reproduce the position exactly, so the first
    /// update leaves the camera where the mount placed it.
    pub fn framing(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().max(1e-4);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);
        Self {
            yaw,
            pitch,
            distance,
            target,
            ..Self::default()
        }
    }

    /// Whether input is still bound to this controller.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Release the input binding. Further input is ignored.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Apply one frame of input and write the resulting pose to the camera.
    pub fn update(&mut self, mouse: &MouseState, camera: &mut Camera) {
        if !self.attached {
            return;
        }

        if mouse.is_button_pressed(MouseButton::Left) {
            let delta = mouse.delta();
            self.yaw -= delta.x * self.orbit_sensitivity;
            self.pitch += delta.y * self.orbit_sensitivity;
            self.pitch = self.pitch.clamp(self.pitch_min, self.pitch_max);
        }

        let scroll = mouse.scroll();
        if scroll.abs() > 1e-6 {
            self.distance -= scroll * self.zoom_sensitivity;
            self.distance = self.distance.clamp(self.distance_min, self.distance_max);
        }

        camera.position = self.target + self.offset();
        camera.look_at(self.target);
    }

    /// Camera offset from the target via spherical coordinates.
    fn offset(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(
            self.distance * cos_pitch * sin_yaw,
            self.distance * sin_pitch,
            self.distance * cos_pitch * cos_yaw,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::{ElementState, MouseScrollDelta};

    #[test]
    fn test_framing_reproduces_position() {
        let position = Vec3::new(5.0, 5.0, 5.0);
        let mut controls = OrbitControls::framing(position, Vec3::ZERO);
        let mut camera = Camera::default();
        let mouse = MouseState::new();
        controls.update(&mouse, &mut camera);
        assert!(
            (camera.position - position).length() < 1e-3,
            "camera at {:?}",
            camera.position
        );
    }

    #[test]
    fn test_framing_distance() {
        let controls = OrbitControls::framing(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO);
        assert!((controls.distance - 75.0_f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_drag_orbits_camera() {
        let mut controls = OrbitControls::framing(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO);
        let yaw_before = controls.yaw;
        let mut camera = Camera::default();

        let mut mouse = MouseState::new();
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.clear_transients();
        mouse.on_cursor_moved(50.0, 0.0);

        controls.update(&mouse, &mut camera);
        assert!((controls.yaw - yaw_before).abs() > 1e-6);
        // Distance from target is preserved while orbiting.
        assert!((camera.position.length() - controls.distance).abs() < 1e-3);
    }

    #[test]
    fn test_drag_without_button_does_nothing() {
        let mut controls = OrbitControls::framing(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO);
        let yaw_before = controls.yaw;
        let mut camera = Camera::default();

        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(50.0, 30.0);

        controls.update(&mouse, &mut camera);
        assert_eq!(controls.yaw, yaw_before);
    }

    #[test]
    fn test_pitch_clamped_at_poles() {
        let mut controls = OrbitControls::framing(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO);
        let mut camera = Camera::default();

        let mut mouse = MouseState::new();
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.clear_transients();
        mouse.on_cursor_moved(0.0, 100_000.0);

        controls.update(&mouse, &mut camera);
        assert!(controls.pitch <= controls.pitch_max + 1e-6);
        assert!(controls.pitch >= controls.pitch_min - 1e-6);
    }

    #[test]
    fn test_zoom_clamps_at_min_and_max() {
        let mut controls = OrbitControls::framing(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO);
        let mut camera = Camera::default();

        let mut mouse = MouseState::new();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 10_000.0));
        controls.update(&mouse, &mut camera);
        assert!((controls.distance - controls.distance_min).abs() < 1e-6);

        mouse.clear_transients();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, -100_000.0));
        controls.update(&mouse, &mut camera);
        assert!((controls.distance - controls.distance_max).abs() < 1e-6);
    }

    #[test]
    fn test_detached_controls_ignore_input() {
        let mut controls = OrbitControls::framing(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO);
        controls.detach();
        assert!(!controls.is_attached());

        let mut camera = Camera::default();
        let pose_before = camera.clone();

        let mut mouse = MouseState::new();
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(500.0, 500.0);
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 5.0));

        controls.update(&mouse, &mut camera);
        assert_eq!(camera, pose_before);
    }

    #[test]
    fn test_camera_always_looks_at_target() {
        let mut controls = OrbitControls::framing(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO);
        let mut camera = Camera::default();
        let mouse = MouseState::new();
        controls.update(&mouse, &mut camera);

        let expected = (controls.target - camera.position).normalize();
        assert!((camera.forward() - expected).length() < 1e-4);
    }
}

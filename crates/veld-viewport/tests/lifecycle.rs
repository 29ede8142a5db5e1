//! End-to-end lifecycle tests driving a container through mount, resize,
//! and unmount with a deterministic clock and a recording surface.

use std::cell::RefCell;
use std::rc::Rc;

use veld_input::MouseState;
use veld_render::Camera;
use veld_scene::{SceneContent, SceneParams};
use veld_viewport::{ManualFrameClock, MountError, RenderSurface, ResizeBus, SceneContainer};

/// Records every render and resize the viewport issues.
#[derive(Default)]
struct Recording {
    renders: u64,
    resizes: Vec<(u32, u32)>,
}

struct RecordingSurface {
    size: (u32, u32),
    log: Rc<RefCell<Recording>>,
}

impl RenderSurface for RecordingSurface {
    type Error = String;

    fn render(&mut self, _scene: &SceneContent, _camera: &Camera) -> Result<(), String> {
        self.log.borrow_mut().renders += 1;
        Ok(())
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.log.borrow_mut().resizes.push((width, height));
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }
}

fn build(
    clock: &ManualFrameClock,
    bus: &ResizeBus,
    log: &Rc<RefCell<Recording>>,
) -> SceneContainer<
    RecordingSurface,
    ManualFrameClock,
    impl FnMut(&SceneContent, u32, u32) -> Result<RecordingSurface, MountError>,
> {
    let log = Rc::clone(log);
    SceneContainer::new(
        SceneParams::default(),
        move |_scene, w, h| {
            Ok(RecordingSurface {
                size: (w, h),
                log: Rc::clone(&log),
            })
        },
        clock.clone(),
        bus.clone(),
        800,
        600,
    )
}

/// Drive every due frame through the viewport, like one display refresh.
fn tick(
    clock: &ManualFrameClock,
    container: &mut SceneContainer<
        RecordingSurface,
        ManualFrameClock,
        impl FnMut(&SceneContent, u32, u32) -> Result<RecordingSurface, MountError>,
    >,
    mouse: &MouseState,
) {
    while clock.fire() {
        if let Some(viewport) = container.viewport_mut() {
            viewport.frame(mouse);
        }
    }
}

#[test]
fn mount_resize_unmount_end_to_end() {
    let clock = ManualFrameClock::new();
    let bus = ResizeBus::new();
    let log = Rc::new(RefCell::new(Recording::default()));
    let mouse = MouseState::new();
    let mut container = build(&clock, &bus, &log);

    // Mount at 800x600: aspect ≈ 1.333, one pending frame, one subscriber.
    container.set_mounted(true).unwrap();
    {
        let viewport = container.viewport().unwrap();
        assert!((viewport.camera().aspect_ratio - 800.0 / 600.0).abs() < 1e-4);
    }
    assert_eq!(clock.pending_count(), 1);
    assert_eq!(bus.subscriber_count(), 1);

    // A few frames render and keep exactly one request pending.
    tick(&clock, &mut container, &mouse);
    tick(&clock, &mut container, &mouse);
    assert_eq!(log.borrow().renders, 2);
    assert_eq!(clock.pending_count(), 1);

    // Resize to 400x300: same aspect, new surface size, visible next frame.
    bus.publish(400, 300);
    tick(&clock, &mut container, &mouse);
    {
        let viewport = container.viewport().unwrap();
        assert!((viewport.camera().aspect_ratio - 400.0 / 300.0).abs() < 1e-4);
        assert_eq!(viewport.surface().size(), (400, 300));
    }
    assert_eq!(log.borrow().resizes, vec![(400, 300)]);

    // Unmount: no further frame executes, a late resize mutates nothing.
    let renders_before = log.borrow().renders;
    container.set_mounted(false).unwrap();
    assert_eq!(clock.pending_count(), 0);
    assert_eq!(bus.subscriber_count(), 0);

    bus.publish(1234, 999);
    tick(&clock, &mut container, &mouse);
    assert_eq!(log.borrow().renders, renders_before);
    assert_eq!(log.borrow().resizes, vec![(400, 300)]);
}

#[test]
fn repeated_cycles_hold_one_loop_and_one_listener() {
    let clock = ManualFrameClock::new();
    let bus = ResizeBus::new();
    let log = Rc::new(RefCell::new(Recording::default()));
    let mouse = MouseState::new();
    let mut container = build(&clock, &bus, &log);

    for _ in 0..4 {
        container.set_mounted(true).unwrap();
        assert_eq!(clock.pending_count(), 1);
        assert_eq!(bus.subscriber_count(), 1);

        tick(&clock, &mut container, &mouse);
        assert_eq!(clock.pending_count(), 1);

        container.set_mounted(false).unwrap();
        assert_eq!(clock.pending_count(), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }
}

#[test]
fn scene_population_identical_across_mounts() {
    let clock = ManualFrameClock::new();
    let bus = ResizeBus::new();
    let log = Rc::new(RefCell::new(Recording::default()));
    let mut container = build(&clock, &bus, &log);

    container.set_mounted(true).unwrap();
    let first = container.viewport().unwrap().scene().clone();
    container.set_mounted(false).unwrap();
    container.set_mounted(true).unwrap();
    let second = container.viewport().unwrap().scene().clone();

    assert_eq!(first, second);
    assert_eq!(first.objects.len(), 2);
    assert_eq!(first.lights.len(), 3);
    assert!(first.fog.enabled);
    let sphere = first.object_by_name("sphere").unwrap();
    assert_eq!(sphere.transform.translation.y, 5.0);
}

#[test]
fn resize_between_frames_is_visible_to_the_very_next_frame() {
    let clock = ManualFrameClock::new();
    let bus = ResizeBus::new();
    let log = Rc::new(RefCell::new(Recording::default()));
    let mouse = MouseState::new();
    let mut container = build(&clock, &bus, &log);

    container.set_mounted(true).unwrap();
    tick(&clock, &mut container, &mouse);

    // Two publishes between frames coalesce; only the latest applies.
    bus.publish(1000, 500);
    bus.publish(640, 480);
    tick(&clock, &mut container, &mouse);

    assert_eq!(log.borrow().resizes, vec![(640, 480)]);
    let viewport = container.viewport().unwrap();
    assert!((viewport.camera().aspect_ratio - 640.0 / 480.0).abs() < 1e-4);
}

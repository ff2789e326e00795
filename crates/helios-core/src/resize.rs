use crate::error::HeliosError;
use crate::events::{subscribe, EventKind, InputEvent, ListenerGuard, SharedSurface};
use std::cell::RefCell;
use std::rc::Rc;

/// Anything with a drawable size that follows the viewport.
pub trait ResizeTarget {
    fn set_size(&mut self, width: u32, height: u32);
}

/// Perspective camera whose projection depends on the viewport aspect ratio.
pub trait ProjectionCamera {
    fn set_aspect(&mut self, aspect: f32);
    fn update_projection(&mut self);
}

/// Push one viewport size into a renderer and camera.
/// A zero height keeps the previous aspect ratio.
pub fn apply_resize<R, C>(renderer: &mut R, camera: &mut C, width: u32, height: u32)
where
    R: ResizeTarget + ?Sized,
    C: ProjectionCamera + ?Sized,
{
    renderer.set_size(width, height);
    if height == 0 {
        log::warn!("Ignoring zero-height viewport ({width}x0) for camera aspect");
        return;
    }
    camera.set_aspect(width as f32 / height as f32);
    camera.update_projection();
}

/// Keeps a renderer and a camera in sync with viewport resizes.
/// Stops on `stop()` or drop.
pub struct ResizeSync {
    _guard: ListenerGuard,
}

impl ResizeSync {
    pub fn start<R, C>(
        surface: &SharedSurface,
        renderer: Rc<RefCell<R>>,
        camera: Rc<RefCell<C>>,
    ) -> Result<Self, HeliosError>
    where
        R: ResizeTarget + 'static,
        C: ProjectionCamera + 'static,
    {
        let guard = subscribe(surface, EventKind::Resize, move |event| {
            if let InputEvent::Resize { width, height } = *event {
                log::debug!("Viewport resized to {width}x{height}");
                apply_resize(&mut *renderer.borrow_mut(), &mut *camera.borrow_mut(), width, height);
            }
        })?;
        Ok(Self { _guard: guard })
    }

    /// Stop watching resizes. Consumes the handle, so it runs at most once.
    pub fn stop(self) {
        log::debug!("Resize sync stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LocalEventBus;

    #[derive(Default)]
    struct RecordingRenderer {
        sizes: Vec<(u32, u32)>,
    }

    impl ResizeTarget for RecordingRenderer {
        fn set_size(&mut self, width: u32, height: u32) {
            self.sizes.push((width, height));
        }
    }

    struct RecordingCamera {
        aspect: f32,
        projection_updates: u32,
    }

    impl ProjectionCamera for RecordingCamera {
        fn set_aspect(&mut self, aspect: f32) {
            self.aspect = aspect;
        }

        fn update_projection(&mut self) {
            self.projection_updates += 1;
        }
    }

    fn setup() -> (
        Rc<LocalEventBus>,
        SharedSurface,
        Rc<RefCell<RecordingRenderer>>,
        Rc<RefCell<RecordingCamera>>,
    ) {
        let bus = Rc::new(LocalEventBus::new());
        let surface: SharedSurface = bus.clone();
        let renderer = Rc::new(RefCell::new(RecordingRenderer::default()));
        let camera = Rc::new(RefCell::new(RecordingCamera {
            aspect: 1.0,
            projection_updates: 0,
        }));
        (bus, surface, renderer, camera)
    }

    #[test]
    fn test_resize_updates_renderer_and_camera() {
        let (bus, surface, renderer, camera) = setup();
        let _sync = ResizeSync::start(&surface, renderer.clone(), camera.clone()).unwrap();

        bus.dispatch(&InputEvent::Resize {
            width: 1600,
            height: 900,
        });

        assert_eq!(renderer.borrow().sizes, vec![(1600, 900)]);
        assert!((camera.borrow().aspect - 16.0 / 9.0).abs() < f32::EPSILON);
        assert_eq!(camera.borrow().projection_updates, 1);
    }

    #[test]
    fn test_stop_then_resize_is_noop() {
        let (bus, surface, renderer, camera) = setup();
        let sync = ResizeSync::start(&surface, renderer.clone(), camera.clone()).unwrap();
        sync.stop();

        bus.dispatch(&InputEvent::Resize {
            width: 800,
            height: 600,
        });

        assert!(renderer.borrow().sizes.is_empty());
        assert_eq!(camera.borrow().aspect, 1.0);
        assert_eq!(camera.borrow().projection_updates, 0);
        assert_eq!(bus.listener_count(EventKind::Resize), 0);
    }

    #[test]
    fn test_zero_height_keeps_aspect() {
        let (_, _, renderer, camera) = setup();
        apply_resize(&mut *renderer.borrow_mut(), &mut *camera.borrow_mut(), 640, 0);
        assert_eq!(renderer.borrow().sizes, vec![(640, 0)]);
        assert_eq!(camera.borrow().aspect, 1.0);
        assert_eq!(camera.borrow().projection_updates, 0);
    }

    #[test]
    fn test_ignores_other_events() {
        let (bus, surface, renderer, camera) = setup();
        let _sync = ResizeSync::start(&surface, renderer.clone(), camera).unwrap();
        bus.dispatch(&InputEvent::DoubleClick);
        assert!(renderer.borrow().sizes.is_empty());
    }
}

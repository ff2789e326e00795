//! Fullscreen control over a vendor-prefixed platform API.
//!
//! Which API exists is probed once at startup by the host and injected here,
//! so every operation can report `FullscreenError::Unsupported` instead of
//! asserting.

use crate::config::FullscreenConfig;
use crate::error::{FullscreenError, HeliosError};
use crate::events::{subscribe, EventKind, InputEvent, ListenerGuard, SharedSurface};
use std::rc::Rc;

/// Vendor flavour of the fullscreen API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenApi {
    Webkit,
    Moz,
}

impl FullscreenApi {
    /// Document member whose presence identifies this API.
    pub fn probe_member(self) -> &'static str {
        match self {
            FullscreenApi::Webkit => "webkitCancelFullScreen",
            FullscreenApi::Moz => "mozCancelFullScreen",
        }
    }

    /// Pick the first API whose probe member `has_member` reports, webkit first.
    pub fn detect(has_member: impl Fn(&str) -> bool) -> Option<FullscreenApi> {
        [FullscreenApi::Webkit, FullscreenApi::Moz]
            .into_iter()
            .find(|api| has_member(api.probe_member()))
    }
}

/// Platform side of fullscreen: performs the vendor-specific calls.
pub trait FullscreenHost {
    /// Element handle accepted by `request`.
    type Element: Clone + 'static;

    fn is_fullscreen(&self, api: FullscreenApi) -> Result<bool, FullscreenError>;

    /// Request fullscreen on `element`, or on the document root when `None`.
    fn request(&self, api: FullscreenApi, element: Option<&Self::Element>)
        -> Result<(), FullscreenError>;

    fn cancel(&self, api: FullscreenApi) -> Result<(), FullscreenError>;
}

pub struct FullscreenControl<H: FullscreenHost> {
    host: H,
    api: Option<FullscreenApi>,
}

impl<H: FullscreenHost> FullscreenControl<H> {
    pub fn new(host: H, api: Option<FullscreenApi>) -> Self {
        match api {
            Some(api) => log::info!("Fullscreen API: {:?}", api),
            None => log::info!("Fullscreen API not available"),
        }
        Self { host, api }
    }

    pub fn available(&self) -> bool {
        self.api.is_some()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn activated(&self) -> Result<bool, FullscreenError> {
        self.host.is_fullscreen(self.require_api()?)
    }

    pub fn request(&self, element: Option<&H::Element>) -> Result<(), FullscreenError> {
        self.host.request(self.require_api()?, element)
    }

    pub fn cancel(&self) -> Result<(), FullscreenError> {
        self.host.cancel(self.require_api()?)
    }

    /// Leave fullscreen if active, otherwise enter it on `element`.
    pub fn toggle(&self, element: Option<&H::Element>) -> Result<(), FullscreenError> {
        if self.activated()? {
            self.cancel()
        } else {
            self.request(element)
        }
    }

    fn require_api(&self) -> Result<FullscreenApi, FullscreenError> {
        self.api.ok_or(FullscreenError::Unsupported)
    }
}

/// Options for `bind_key`.
pub struct BindKeyOptions<E> {
    /// Character code whose key-press toggles fullscreen.
    pub char_code: u32,
    /// Also toggle on double-click.
    pub dblclick: bool,
    /// Element to make fullscreen; the document root when `None`.
    pub element: Option<E>,
}

impl<E> Default for BindKeyOptions<E> {
    fn default() -> Self {
        Self {
            char_code: crate::constants::DEFAULT_FULLSCREEN_KEY as u32,
            dblclick: false,
            element: None,
        }
    }
}

impl<E> From<&FullscreenConfig> for BindKeyOptions<E> {
    fn from(config: &FullscreenConfig) -> Self {
        Self {
            char_code: config.key as u32,
            dblclick: config.dblclick,
            element: None,
        }
    }
}

/// Listeners registered by `bind_key`. Released by `unbind()` or drop.
pub struct FullscreenBinding {
    key_press: ListenerGuard,
    double_click: Option<ListenerGuard>,
}

impl FullscreenBinding {
    pub fn has_double_click(&self) -> bool {
        self.double_click.is_some()
    }

    pub fn unbind(self) {
        let FullscreenBinding {
            key_press,
            double_click,
        } = self;
        key_press.release();
        if let Some(guard) = double_click {
            guard.release();
        }
        log::info!("Fullscreen key binding removed");
    }
}

/// Toggle fullscreen on matching key-presses (and double-clicks if asked).
pub fn bind_key<H: FullscreenHost + 'static>(
    control: &Rc<FullscreenControl<H>>,
    surface: &SharedSurface,
    options: BindKeyOptions<H::Element>,
) -> Result<FullscreenBinding, HeliosError> {
    let char_code = options.char_code;
    let element = options.element;

    let key_control = control.clone();
    let key_element = element.clone();
    let key_press = subscribe(surface, EventKind::KeyPress, move |event| {
        if let InputEvent::KeyPress { char_code: code } = *event {
            if code == char_code {
                toggle_logged(&key_control, key_element.as_ref());
            }
        }
    })?;

    let double_click = if options.dblclick {
        let click_control = control.clone();
        Some(subscribe(surface, EventKind::DoubleClick, move |_| {
            toggle_logged(&click_control, element.as_ref());
        })?)
    } else {
        None
    };

    log::info!(
        "Fullscreen bound to char code {} (dblclick: {})",
        char_code,
        options.dblclick
    );
    Ok(FullscreenBinding {
        key_press,
        double_click,
    })
}

fn toggle_logged<H: FullscreenHost>(control: &FullscreenControl<H>, element: Option<&H::Element>) {
    if let Err(e) = control.toggle(element) {
        log::warn!("Fullscreen toggle failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LocalEventBus;
    use std::cell::{Cell, RefCell};

    /// Host double that flips a flag and records requested elements.
    #[derive(Default)]
    struct FakeFullscreen {
        active: Cell<bool>,
        requests: RefCell<Vec<Option<&'static str>>>,
        cancels: Cell<u32>,
    }

    impl FullscreenHost for FakeFullscreen {
        type Element = &'static str;

        fn is_fullscreen(&self, _api: FullscreenApi) -> Result<bool, FullscreenError> {
            Ok(self.active.get())
        }

        fn request(
            &self,
            _api: FullscreenApi,
            element: Option<&Self::Element>,
        ) -> Result<(), FullscreenError> {
            self.requests.borrow_mut().push(element.copied());
            self.active.set(true);
            Ok(())
        }

        fn cancel(&self, _api: FullscreenApi) -> Result<(), FullscreenError> {
            self.cancels.set(self.cancels.get() + 1);
            self.active.set(false);
            Ok(())
        }
    }

    fn setup(api: Option<FullscreenApi>) -> (Rc<LocalEventBus>, SharedSurface, Rc<FullscreenControl<FakeFullscreen>>) {
        let bus = Rc::new(LocalEventBus::new());
        let surface: SharedSurface = bus.clone();
        let control = Rc::new(FullscreenControl::new(FakeFullscreen::default(), api));
        (bus, surface, control)
    }

    #[test]
    fn test_detect_prefers_webkit() {
        assert_eq!(FullscreenApi::detect(|_| true), Some(FullscreenApi::Webkit));
        assert_eq!(
            FullscreenApi::detect(|m| m == "mozCancelFullScreen"),
            Some(FullscreenApi::Moz)
        );
        assert_eq!(FullscreenApi::detect(|_| false), None);
    }

    #[test]
    fn test_unsupported_operations_error() {
        let (_, _, control) = setup(None);
        assert!(!control.available());
        assert_eq!(control.activated(), Err(FullscreenError::Unsupported));
        assert_eq!(control.request(None), Err(FullscreenError::Unsupported));
        assert_eq!(control.cancel(), Err(FullscreenError::Unsupported));
        assert!(control.host().requests.borrow().is_empty());
    }

    #[test]
    fn test_toggle_requests_then_cancels() {
        let (_, _, control) = setup(Some(FullscreenApi::Webkit));
        assert!(control.available());
        control.toggle(Some(&"canvas")).unwrap();
        assert_eq!(control.activated(), Ok(true));
        control.toggle(Some(&"canvas")).unwrap();
        assert_eq!(control.activated(), Ok(false));
        assert_eq!(*control.host().requests.borrow(), vec![Some("canvas")]);
        assert_eq!(control.host().cancels.get(), 1);
    }

    #[test]
    fn test_bind_key_toggles_on_matching_char_only() {
        let (bus, surface, control) = setup(Some(FullscreenApi::Moz));
        let options = BindKeyOptions {
            char_code: 'a' as u32,
            ..Default::default()
        };
        let binding = bind_key(&control, &surface, options).unwrap();
        assert!(!binding.has_double_click());

        bus.dispatch(&InputEvent::KeyPress { char_code: 'b' as u32 });
        assert_eq!(control.activated(), Ok(false));

        bus.dispatch(&InputEvent::KeyPress { char_code: 'a' as u32 });
        assert_eq!(control.activated(), Ok(true));

        bus.dispatch(&InputEvent::KeyPress { char_code: 'a' as u32 });
        assert_eq!(control.activated(), Ok(false));

        binding.unbind();
        bus.dispatch(&InputEvent::KeyPress { char_code: 'a' as u32 });
        assert_eq!(control.activated(), Ok(false));
        assert_eq!(bus.listener_count(EventKind::KeyPress), 0);
    }

    #[test]
    fn test_bind_key_defaults_to_f_without_dblclick() {
        let (bus, surface, control) = setup(Some(FullscreenApi::Webkit));
        let _binding = bind_key(&control, &surface, BindKeyOptions::default()).unwrap();
        assert_eq!(bus.listener_count(EventKind::DoubleClick), 0);

        bus.dispatch(&InputEvent::DoubleClick);
        assert_eq!(control.activated(), Ok(false));

        bus.dispatch(&InputEvent::KeyPress { char_code: 102 });
        assert_eq!(control.activated(), Ok(true));
        assert_eq!(*control.host().requests.borrow(), vec![None]);
    }

    #[test]
    fn test_dblclick_binding_and_unbind() {
        let (bus, surface, control) = setup(Some(FullscreenApi::Webkit));
        let options = BindKeyOptions {
            dblclick: true,
            element: Some("viewport"),
            ..Default::default()
        };
        let binding = bind_key(&control, &surface, options).unwrap();
        assert!(binding.has_double_click());

        bus.dispatch(&InputEvent::DoubleClick);
        assert_eq!(control.activated(), Ok(true));
        assert_eq!(*control.host().requests.borrow(), vec![Some("viewport")]);

        binding.unbind();
        assert_eq!(bus.listener_count(EventKind::DoubleClick), 0);
        assert_eq!(bus.listener_count(EventKind::KeyPress), 0);
        bus.dispatch(&InputEvent::DoubleClick);
        assert_eq!(control.activated(), Ok(true));
    }

    #[test]
    fn test_unsupported_binding_does_not_panic() {
        let (bus, surface, control) = setup(None);
        let _binding = bind_key(&control, &surface, BindKeyOptions::default()).unwrap();
        bus.dispatch(&InputEvent::KeyPress { char_code: 102 });
        assert!(control.host().requests.borrow().is_empty());
    }

    #[test]
    fn test_options_from_config() {
        let config = FullscreenConfig {
            key: 'g',
            dblclick: true,
        };
        let options: BindKeyOptions<()> = (&config).into();
        assert_eq!(options.char_code, 103);
        assert!(options.dblclick);
        assert!(options.element.is_none());
    }
}

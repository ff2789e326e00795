//! Browser-backed `EventSurface`.
//!
//! Resize and blur are window events; key and double-click events are
//! observed on the document. Each registration owns its wasm closure, so
//! removing the registration is what frees it. The free is deferred to a
//! microtask because a listener may remove itself while it runs.

use helios_core::error::HeliosError;
use helios_core::events::{EventKind, EventSurface, InputEvent, KeyEvent, Listener, ListenerId};
use helios_core::keyboard::Modifiers;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

struct Registration {
    target: web_sys::EventTarget,
    kind: EventKind,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

pub struct DomEventSurface {
    window: web_sys::Window,
    document: web_sys::Document,
    next_id: Cell<u64>,
    registrations: RefCell<HashMap<ListenerId, Registration>>,
}

impl DomEventSurface {
    pub fn new(window: web_sys::Window, document: web_sys::Document) -> Self {
        Self {
            window,
            document,
            next_id: Cell::new(0),
            registrations: RefCell::new(HashMap::new()),
        }
    }

    fn target_for(&self, kind: EventKind) -> web_sys::EventTarget {
        match kind {
            EventKind::Resize | EventKind::Blur => self.window.clone().into(),
            EventKind::KeyDown | EventKind::KeyUp | EventKind::KeyPress | EventKind::DoubleClick => {
                self.document.clone().into()
            }
        }
    }
}

impl EventSurface for DomEventSurface {
    fn listen(&self, kind: EventKind, listener: Listener) -> Result<ListenerId, HeliosError> {
        let window = self.window.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            if let Some(input) = translate(&window, kind, &event) {
                listener(&input);
            }
        });

        let target = self.target_for(kind);
        target
            .add_event_listener_with_callback(kind.dom_name(), closure.as_ref().unchecked_ref())
            .map_err(|e| HeliosError::ListenerRegistration {
                kind: kind.dom_name(),
                reason: format!("{e:?}"),
            })?;

        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.registrations.borrow_mut().insert(
            id,
            Registration {
                target,
                kind,
                closure,
            },
        );
        Ok(id)
    }

    fn unlisten(&self, id: ListenerId) -> bool {
        let Some(registration) = self.registrations.borrow_mut().remove(&id) else {
            return false;
        };
        if let Err(e) = registration.target.remove_event_listener_with_callback(
            registration.kind.dom_name(),
            registration.closure.as_ref().unchecked_ref(),
        ) {
            log::warn!(
                "Failed to remove {} listener: {e:?}",
                registration.kind.dom_name()
            );
        }
        // The closure may be the one currently executing.
        wasm_bindgen_futures::spawn_local(async move {
            drop(registration);
        });
        true
    }
}

/// Current window inner size in CSS pixels.
pub fn window_size(window: &web_sys::Window) -> (u32, u32) {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
}

fn translate(window: &web_sys::Window, kind: EventKind, event: &web_sys::Event) -> Option<InputEvent> {
    match kind {
        EventKind::Resize => {
            let (width, height) = window_size(window);
            Some(InputEvent::Resize { width, height })
        }
        EventKind::Blur => Some(InputEvent::Blur),
        EventKind::DoubleClick => Some(InputEvent::DoubleClick),
        EventKind::KeyDown => key_event(event).map(InputEvent::KeyDown),
        EventKind::KeyUp => key_event(event).map(InputEvent::KeyUp),
        EventKind::KeyPress => event
            .dyn_ref::<web_sys::KeyboardEvent>()
            .map(|key| InputEvent::KeyPress {
                char_code: key.char_code(),
            }),
    }
}

fn key_event(event: &web_sys::Event) -> Option<KeyEvent> {
    let key = event.dyn_ref::<web_sys::KeyboardEvent>()?;
    Some(KeyEvent::with_modifiers(
        key.key_code(),
        Modifiers {
            shift: key.shift_key(),
            ctrl: key.ctrl_key(),
            alt: key.alt_key(),
            meta: key.meta_key(),
        },
    ))
}

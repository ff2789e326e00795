//! Input event surface abstraction.
//!
//! Components register listeners on an `EventSurface` and receive a
//! `ListenerGuard` back. The guard deregisters on `release()` or drop, so a
//! listener can never outlive the component that owns it.

use crate::error::HeliosError;
use crate::keyboard::Modifiers;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Raw key transition as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyEvent {
    pub key_code: u32,
    /// Modifier keys held when the event fired.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key_code: u32) -> Self {
        Self {
            key_code,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(key_code: u32, modifiers: Modifiers) -> Self {
        Self {
            key_code,
            modifiers,
        }
    }
}

/// Host-independent input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Viewport resized; dimensions in CSS pixels.
    Resize { width: u32, height: u32 },
    KeyDown(KeyEvent),
    KeyUp(KeyEvent),
    /// Character-producing key press.
    KeyPress { char_code: u32 },
    DoubleClick,
    /// Window lost focus.
    Blur,
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            InputEvent::Resize { .. } => EventKind::Resize,
            InputEvent::KeyDown(_) => EventKind::KeyDown,
            InputEvent::KeyUp(_) => EventKind::KeyUp,
            InputEvent::KeyPress { .. } => EventKind::KeyPress,
            InputEvent::DoubleClick => EventKind::DoubleClick,
            InputEvent::Blur => EventKind::Blur,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Resize,
    KeyDown,
    KeyUp,
    KeyPress,
    DoubleClick,
    Blur,
}

impl EventKind {
    /// DOM event type name.
    pub fn dom_name(self) -> &'static str {
        match self {
            EventKind::Resize => "resize",
            EventKind::KeyDown => "keydown",
            EventKind::KeyUp => "keyup",
            EventKind::KeyPress => "keypress",
            EventKind::DoubleClick => "dblclick",
            EventKind::Blur => "blur",
        }
    }
}

/// Identity of one registration on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub type Listener = Rc<dyn Fn(&InputEvent)>;

/// Something listeners can be attached to: the browser window/document,
/// or an in-memory bus.
pub trait EventSurface {
    fn listen(&self, kind: EventKind, listener: Listener) -> Result<ListenerId, HeliosError>;

    /// Remove a registration. Returns false if it was not registered.
    ///
    /// May be called from inside the listener being removed. The listener
    /// gets no further events, but implementations must keep it alive until
    /// the running call returns.
    fn unlisten(&self, id: ListenerId) -> bool;
}

pub type SharedSurface = Rc<dyn EventSurface>;

/// Register `listener` and wrap the registration in a guard.
pub fn subscribe(
    surface: &SharedSurface,
    kind: EventKind,
    listener: impl Fn(&InputEvent) + 'static,
) -> Result<ListenerGuard, HeliosError> {
    let id = surface.listen(kind, Rc::new(listener))?;
    log::debug!("Listening for {} ({:?})", kind.dom_name(), id);
    Ok(ListenerGuard {
        surface: surface.clone(),
        id: Some(id),
    })
}

/// Scoped registration. Deregisters exactly once.
pub struct ListenerGuard {
    surface: SharedSurface,
    id: Option<ListenerId>,
}

impl ListenerGuard {
    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    /// Deregister now. Returns whether the surface still held the listener.
    pub fn release(mut self) -> bool {
        self.release_inner()
    }

    fn release_inner(&mut self) -> bool {
        match self.id.take() {
            Some(id) => self.surface.unlisten(id),
            None => false,
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release_inner();
    }
}

/// In-memory surface. Events are delivered synchronously by `dispatch`.
#[derive(Default)]
pub struct LocalEventBus {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, EventKind, Listener)>>,
}

impl LocalEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every listener of its kind, in registration order.
    /// Listeners removed by an earlier listener during the same dispatch are skipped.
    pub fn dispatch(&self, event: &InputEvent) {
        let kind = event.kind();
        let snapshot: Vec<(ListenerId, Listener)> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(id, _, l)| (*id, l.clone()))
            .collect();

        for (id, listener) in snapshot {
            if self.is_registered(id) {
                listener(event);
            }
        }
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .count()
    }

    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|(i, _, _)| *i == id)
    }
}

impl EventSurface for LocalEventBus {
    fn listen(&self, kind: EventKind, listener: Listener) -> Result<ListenerId, HeliosError> {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, kind, listener));
        Ok(id)
    }

    fn unlisten(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(i, _, _)| *i != id);
        listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus() -> (Rc<LocalEventBus>, SharedSurface) {
        let bus = Rc::new(LocalEventBus::new());
        let surface: SharedSurface = bus.clone();
        (bus, surface)
    }

    #[test]
    fn test_dispatch_reaches_matching_kind_only() {
        let (bus, surface) = bus();
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        let _guard = subscribe(&surface, EventKind::DoubleClick, move |_| h.set(h.get() + 1)).unwrap();

        bus.dispatch(&InputEvent::DoubleClick);
        bus.dispatch(&InputEvent::KeyPress { char_code: 102 });
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_release_deregisters_once() {
        let (bus, surface) = bus();
        let guard = subscribe(&surface, EventKind::Blur, |_| {}).unwrap();
        assert!(guard.is_active());
        assert_eq!(bus.listener_count(EventKind::Blur), 1);
        assert!(guard.release());
        assert_eq!(bus.listener_count(EventKind::Blur), 0);
    }

    #[test]
    fn test_drop_deregisters() {
        let (bus, surface) = bus();
        {
            let _guard = subscribe(&surface, EventKind::Resize, |_| {}).unwrap();
            assert_eq!(bus.listener_count(EventKind::Resize), 1);
        }
        assert_eq!(bus.listener_count(EventKind::Resize), 0);
    }

    #[test]
    fn test_listener_removed_mid_dispatch_is_skipped() {
        let (bus, surface) = bus();
        let second_hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));

        let slot_in_first = slot.clone();
        let _first = subscribe(&surface, EventKind::DoubleClick, move |_| {
            // Drop the second listener's guard from inside the first listener.
            slot_in_first.borrow_mut().take();
        })
        .unwrap();

        let h = second_hits.clone();
        let second = subscribe(&surface, EventKind::DoubleClick, move |_| h.set(h.get() + 1)).unwrap();
        *slot.borrow_mut() = Some(second);

        bus.dispatch(&InputEvent::DoubleClick);
        assert_eq!(second_hits.get(), 0);
        assert_eq!(bus.listener_count(EventKind::DoubleClick), 1);
    }

    #[test]
    fn test_listener_can_release_itself() {
        let (bus, surface) = bus();
        let hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));

        let h = hits.clone();
        let own_slot = slot.clone();
        let guard = subscribe(&surface, EventKind::KeyPress, move |_| {
            h.set(h.get() + 1);
            if let Some(guard) = own_slot.borrow_mut().take() {
                assert!(guard.release());
            }
        })
        .unwrap();
        *slot.borrow_mut() = Some(guard);

        bus.dispatch(&InputEvent::KeyPress { char_code: 102 });
        bus.dispatch(&InputEvent::KeyPress { char_code: 102 });
        assert_eq!(hits.get(), 1);
        assert_eq!(bus.listener_count(EventKind::KeyPress), 0);
    }

    #[test]
    fn test_unlisten_unknown_id() {
        let bus = LocalEventBus::new();
        assert!(!bus.unlisten(ListenerId(42)));
    }
}

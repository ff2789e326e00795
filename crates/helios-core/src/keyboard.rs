//! Keyboard state polling.
//!
//! `KeyboardState` records the last known pressed/released state per key
//! code plus the modifier flags of the most recent key event.
//! `KeyboardTracker` feeds it from an `EventSurface`.

use crate::error::HeliosError;
use crate::events::{subscribe, EventKind, InputEvent, KeyEvent, ListenerGuard, SharedSurface};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::str::FromStr;

/// Named keys resolvable in a descriptor, with their key codes.
pub const KEY_ALIASES: [(&str, u32); 8] = [
    ("left", 37),
    ("up", 38),
    ("right", 39),
    ("down", 40),
    ("space", 32),
    ("pageup", 33),
    ("pagedown", 34),
    ("tab", 9),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
    Meta,
}

impl Modifier {
    pub fn from_name(name: &str) -> Option<Modifier> {
        match name {
            "shift" => Some(Modifier::Shift),
            "ctrl" => Some(Modifier::Ctrl),
            "alt" => Some(Modifier::Alt),
            "meta" => Some(Modifier::Meta),
            _ => None,
        }
    }
}

/// Modifier flags as reported by a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn get(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Shift => self.shift,
            Modifier::Ctrl => self.ctrl,
            Modifier::Alt => self.alt,
            Modifier::Meta => self.meta,
        }
    }
}

/// One resolved `+`-separated descriptor token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyToken {
    Modifier(Modifier),
    Code(u32),
    /// Empty token; never pressed.
    Unknown,
}

impl KeyToken {
    /// Resolve a token: modifier name, then alias, then the code of its
    /// upper-cased first character. Modifier names match exactly, so
    /// `"Shift"` is the S key; alias names ignore case.
    pub fn resolve(token: &str) -> KeyToken {
        if let Some(modifier) = Modifier::from_name(token) {
            return KeyToken::Modifier(modifier);
        }
        let lower = token.to_ascii_lowercase();
        if let Some((_, code)) = KEY_ALIASES.iter().find(|(name, _)| *name == lower) {
            return KeyToken::Code(*code);
        }
        match token.chars().next() {
            Some(first) => {
                let upper = first.to_uppercase().next().unwrap_or(first);
                KeyToken::Code(upper as u32)
            }
            None => KeyToken::Unknown,
        }
    }
}

/// Parsed key descriptor such as `"shift+a"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    tokens: Vec<KeyToken>,
}

impl KeyCombo {
    pub fn tokens(&self) -> &[KeyToken] {
        &self.tokens
    }
}

impl From<&str> for KeyCombo {
    fn from(descriptor: &str) -> Self {
        Self {
            tokens: descriptor.split('+').map(KeyToken::resolve).collect(),
        }
    }
}

impl FromStr for KeyCombo {
    type Err = std::convert::Infallible;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(descriptor))
    }
}

/// Point-in-time keyboard state.
#[derive(Debug, Default)]
pub struct KeyboardState {
    key_codes: HashMap<u32, bool>,
    modifiers: Modifiers,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Modifier flags are replaced wholesale by the
    /// event's, so they always reflect the latest key event.
    pub fn on_key_change(&mut self, event: &KeyEvent, pressed: bool) {
        self.key_codes.insert(event.key_code, pressed);
        self.modifiers = event.modifiers;
    }

    pub fn is_code_down(&self, key_code: u32) -> bool {
        self.key_codes.get(&key_code).copied().unwrap_or(false)
    }

    /// True only if every token of `descriptor` is currently down.
    pub fn pressed(&self, descriptor: &str) -> bool {
        descriptor
            .split('+')
            .all(|token| self.token_down(KeyToken::resolve(token)))
    }

    /// Same as `pressed`, for a descriptor parsed ahead of time.
    pub fn combo_pressed(&self, combo: &KeyCombo) -> bool {
        combo.tokens.iter().all(|token| self.token_down(*token))
    }

    /// Forget everything, e.g. when focus leaves the window and key-ups will be missed.
    pub fn reset(&mut self) {
        self.key_codes.clear();
        self.modifiers = Modifiers::default();
    }

    fn token_down(&self, token: KeyToken) -> bool {
        match token {
            KeyToken::Modifier(m) => self.modifiers.get(m),
            KeyToken::Code(code) => self.is_code_down(code),
            KeyToken::Unknown => false,
        }
    }
}

/// Keeps a `KeyboardState` current from key-down/key-up events.
pub struct KeyboardTracker {
    state: Rc<RefCell<KeyboardState>>,
    _key_down: ListenerGuard,
    _key_up: ListenerGuard,
}

impl KeyboardTracker {
    /// Register key-down and key-up listeners on `surface`.
    pub fn attach(surface: &SharedSurface) -> Result<Self, HeliosError> {
        let state = Rc::new(RefCell::new(KeyboardState::new()));

        let down_state = state.clone();
        let key_down = subscribe(surface, EventKind::KeyDown, move |event| {
            if let InputEvent::KeyDown(key) = event {
                down_state.borrow_mut().on_key_change(key, true);
            }
        })?;

        let up_state = state.clone();
        let key_up = subscribe(surface, EventKind::KeyUp, move |event| {
            if let InputEvent::KeyUp(key) = event {
                up_state.borrow_mut().on_key_change(key, false);
            }
        })?;

        log::info!("Keyboard tracking attached");
        Ok(Self {
            state,
            _key_down: key_down,
            _key_up: key_up,
        })
    }

    pub fn pressed(&self, descriptor: &str) -> bool {
        self.state.borrow().pressed(descriptor)
    }

    /// Shared handle to the underlying state.
    pub fn state(&self) -> Rc<RefCell<KeyboardState>> {
        self.state.clone()
    }

    /// Stop listening. Consuming `self` makes a second destroy impossible;
    /// dropping the tracker has the same effect.
    pub fn destroy(self) {
        log::info!("Keyboard tracking detached");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::LocalEventBus;

    const KEY_A: u32 = 65;
    const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    fn tracker() -> (Rc<LocalEventBus>, KeyboardTracker) {
        let bus = Rc::new(LocalEventBus::new());
        let surface: SharedSurface = bus.clone();
        let tracker = KeyboardTracker::attach(&surface).unwrap();
        (bus, tracker)
    }

    #[test]
    fn test_token_resolution_order() {
        assert_eq!(KeyToken::resolve("shift"), KeyToken::Modifier(Modifier::Shift));
        assert_eq!(KeyToken::resolve("left"), KeyToken::Code(37));
        assert_eq!(KeyToken::resolve("LEFT"), KeyToken::Code(37));
        assert_eq!(KeyToken::resolve("tab"), KeyToken::Code(9));
        assert_eq!(KeyToken::resolve("a"), KeyToken::Code(KEY_A));
        assert_eq!(KeyToken::resolve("A"), KeyToken::Code(KEY_A));
        // Only the first character counts outside the tables.
        assert_eq!(KeyToken::resolve("abc"), KeyToken::Code(KEY_A));
        assert_eq!(KeyToken::resolve(""), KeyToken::Unknown);
    }

    #[test]
    fn test_down_then_up_in_order() {
        let mut state = KeyboardState::new();
        assert!(!state.pressed("a"));
        state.on_key_change(&KeyEvent::new(KEY_A), true);
        assert!(state.pressed("a"));
        state.on_key_change(&KeyEvent::new(KEY_A), false);
        assert!(!state.pressed("a"));
    }

    #[test]
    fn test_shift_combo_requires_both() {
        let mut state = KeyboardState::new();
        state.on_key_change(&KeyEvent::new(KEY_A), true);
        assert!(!state.pressed("shift+a"));

        state.on_key_change(&KeyEvent::with_modifiers(KEY_A, SHIFT), true);
        assert!(state.pressed("shift+a"));
        assert!(state.pressed("a+shift"));
        assert!(!state.pressed("shift+b"));
        assert!(!state.pressed("ctrl+a"));
    }

    #[test]
    fn test_modifiers_follow_latest_event() {
        let mut state = KeyboardState::new();
        state.on_key_change(&KeyEvent::with_modifiers(16, SHIFT), true);
        assert!(state.pressed("shift"));
        // An unrelated key event without shift clears the flag even though
        // no shift key-up was seen.
        state.on_key_change(&KeyEvent::new(KEY_A), true);
        assert!(!state.pressed("shift"));
    }

    #[test]
    fn test_alias_lookup() {
        let mut state = KeyboardState::new();
        state.on_key_change(&KeyEvent::new(37), true);
        assert!(state.pressed("left"));
        assert!(state.pressed("Left"));
        assert!(!state.pressed("right"));
    }

    #[test]
    fn test_capitalized_modifier_name_is_a_letter() {
        assert_eq!(KeyToken::resolve("Shift"), KeyToken::Code(83));

        let mut state = KeyboardState::new();
        state.on_key_change(&KeyEvent::new(83), true);
        assert!(state.pressed("Shift"));
        assert!(!state.pressed("shift"));
    }

    #[test]
    fn test_empty_token_is_never_pressed() {
        let mut state = KeyboardState::new();
        state.on_key_change(&KeyEvent::with_modifiers(16, SHIFT), true);
        assert!(!state.pressed("shift+"));
        assert!(!state.pressed(""));
    }

    #[test]
    fn test_combo_matches_string_query() {
        let mut state = KeyboardState::new();
        state.on_key_change(&KeyEvent::with_modifiers(32, SHIFT), true);
        let combo: KeyCombo = "shift+space".parse().unwrap();
        assert_eq!(combo.tokens().len(), 2);
        assert!(state.combo_pressed(&combo));
        assert_eq!(state.combo_pressed(&combo), state.pressed("shift+space"));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = KeyboardState::new();
        state.on_key_change(&KeyEvent::with_modifiers(KEY_A, SHIFT), true);
        state.reset();
        assert!(!state.pressed("a"));
        assert!(!state.pressed("shift"));
    }

    #[test]
    fn test_tracker_follows_events() {
        let (bus, tracker) = tracker();
        bus.dispatch(&InputEvent::KeyDown(KeyEvent::with_modifiers(KEY_A, SHIFT)));
        assert!(tracker.pressed("shift+a"));
        bus.dispatch(&InputEvent::KeyUp(KeyEvent::new(KEY_A)));
        assert!(!tracker.pressed("a"));
        assert!(!tracker.pressed("shift"));
    }

    #[test]
    fn test_destroy_unregisters_both_listeners() {
        let (bus, tracker) = tracker();
        let state = tracker.state();
        assert_eq!(bus.listener_count(EventKind::KeyDown), 1);
        assert_eq!(bus.listener_count(EventKind::KeyUp), 1);

        tracker.destroy();
        assert_eq!(bus.listener_count(EventKind::KeyDown), 0);
        assert_eq!(bus.listener_count(EventKind::KeyUp), 0);

        bus.dispatch(&InputEvent::KeyDown(KeyEvent::new(KEY_A)));
        assert!(!state.borrow().pressed("a"));
    }
}

pub mod clock;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod fullscreen;
pub mod keyboard;
pub mod palette;
pub mod phase;
pub mod resize;

pub use color::{RawRgb, Rgb8};
pub use error::{FullscreenError, HeliosError};
pub use events::{EventKind, EventSurface, InputEvent, ListenerGuard, LocalEventBus, SharedSurface};
pub use phase::Phase;

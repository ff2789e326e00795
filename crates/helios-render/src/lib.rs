pub mod actors;
pub mod renderable;
pub mod renderer;
pub mod rig;
pub mod sky;

pub use actors::{SkyDome, StarField, SunLight, SunSphere, VisualPhaseActor};
pub use renderer::{SkyFrameUniforms, SkyRenderer};
pub use rig::SkyRig;
pub use sky::{gradient_at, SkyDomeUniforms};

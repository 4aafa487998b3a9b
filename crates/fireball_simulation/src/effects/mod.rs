//! Visual effects (asset lookup + playback state)
//!
//! ECS ответственность:
//! - Catalog: effect id → EffectData
//! - EffectInstance: intensity, renderer target, playing
//! - Events: EffectPlayback (Started / Stopped)
//!
//! Host ответственность:
//! - Particles, shaders, attach к костям

pub mod catalog;
pub mod instance;

pub use catalog::{EffectCatalog, EffectData, EffectId};
pub use instance::{
    spawn_effect, stop_effect, EffectInstance, EffectPlacement, EffectPlayback, EffectRenderer,
};

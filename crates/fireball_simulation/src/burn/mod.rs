//! Burn — поджог и damage-over-time
//!
//! Архитектура:
//! - IgniteConfig / Igniter: параметры поджога
//! - Burning: status effect (один на персонажа)
//! - Systems: tick_burning, ignite_on_contact

pub mod config;
pub mod status;
pub mod systems;

pub use config::{IgniteConfig, Igniter};
pub use status::{BurnPhase, BurnTick, Burning};
pub use systems::{ignite, ignite_on_contact, tick_burning};

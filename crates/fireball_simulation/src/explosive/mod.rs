//! Explosive — предмет, взрывающийся при контакте
//!
//! Архитектура:
//! - BlastConfig / AreaEffect: параметры + exemption policy
//! - impulse: radial impulse math
//! - impact: BlastWorld::impact + resolve_blast_contacts система

pub mod config;
pub mod impact;
pub mod impulse;

pub use config::{AreaEffect, BlastConfig, BlastExtent, ImpulseExemption, EFFECT_REFERENCE_RADIUS};
pub use impact::{resolve_blast_contacts, BlastContact, BlastReport, BlastResolved, BlastWorld};
pub use impulse::{blast_effect_transform, radial_impulse, BLAST_FALLOFF_EXPONENT};

//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: персонажи (Character, Health, LastInteraction, Player, Dead)
//! - ragdoll: устойчивость и rig (Ragdoll, CharacterRig, BodyPart, VfxRenderer)
//! - item: предметы (Item — last handler)

pub mod actor;
pub mod item;
pub mod ragdoll;

// Re-exports для удобного импорта
pub use actor::*;
pub use item::*;
pub use ragdoll::*;

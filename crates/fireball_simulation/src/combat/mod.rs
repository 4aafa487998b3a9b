//! Combat module (host-driven contacts)
//!
//! ECS ответственность:
//! - Game state: Health, Ragdoll, LastInteraction, Burning
//! - Combat rules: blast resolution, ignition, burn ticks
//! - Events: DamageRequest → DamageDealt, EntityDied
//!
//! Host ответственность:
//! - Физический контакт → ContactStarted
//! - VFX по EffectPlayback событиям

use bevy::prelude::*;

pub mod contact;
pub mod damage;

// Re-export основных типов
pub use contact::{CharacterLookup, ContactStarted};
pub use damage::{apply_damage, mark_dead, DamageDealt, DamageRequest, DamageType, EntityDied};

use crate::burn::{ignite_on_contact, tick_burning};
use crate::effects::EffectPlayback;
use crate::explosive::{resolve_blast_contacts, BlastResolved};

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate.
///
/// Порядок выполнения:
/// 1. tick_burning — горение (свежий поджог этого тика стартует с elapsed = 0)
/// 2. ignite_on_contact — прямой контакт Igniter (до взрыва: blast видит Burning)
/// 3. resolve_blast_contacts — ContactStarted → impact
/// 4. apply_damage — DamageRequest → Health
/// 5. mark_dead — EntityDied → Dead + ragdoll Inert
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<ContactStarted>()
            .add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<EffectPlayback>()
            .add_event::<BlastResolved>();

        app.add_systems(
            FixedUpdate,
            (
                tick_burning,
                ignite_on_contact,
                resolve_blast_contacts,
                apply_damage,
                mark_dead,
            )
                .chain(),
        );
    }
}

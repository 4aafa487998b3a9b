//! Impact resolution: контакт → эффект, урон, поджог, impulse
//!
//! Порядок (один вызов `impact` = один контакт, без состояния между вызовами):
//! 1. Blast эффект в точке контакта
//! 2. Overlap query по BLAST_QUERY_MASK
//! 3. Affected characters = {предмет, игрок}
//! 4. Character pass: урон, destabilize, поджог, last interaction
//! 5. Body pass: radial impulse (один на тело, слой берётся у тела, не у коллайдера)
//!
//! Поджог в одном dispatch видят все последующие impact'ы (`Burning` вставляется
//! deferred, поэтому подожжённые цели передаются явно через `ignited_this_run`).

use std::collections::HashSet;

use bevy::ecs::error::Result;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::config::{AreaEffect, BlastConfig, BlastExtent};
use super::impulse::{blast_effect_transform, radial_impulse, BLAST_FALLOFF_EXPONENT};
use crate::burn::{ignite, Burning};
use crate::collision_layers::{layer_name, memberships, BLAST_QUERY_MASK, IMPULSE_EXCLUDED_LAYERS};
use crate::combat::{ContactStarted, DamageRequest, DamageType};
use crate::components::{
    Character, CharacterRig, Dead, Health, Item, LastInteraction, Player, Ragdoll, RagdollState,
};
use crate::effects::{spawn_effect, EffectCatalog, EffectPlacement, EffectRenderer};
use crate::error::ConfigError;
use crate::logger;

/// Геометрия контакта (точка, нормаль, reference up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlastContact {
    pub point: Vec3,
    pub normal: Vec3,
    pub up: Vec3,
}

impl From<&ContactStarted> for BlastContact {
    fn from(contact: &ContactStarted) -> Self {
        Self {
            point: contact.point,
            normal: contact.normal,
            up: contact.source_up(),
        }
    }
}

/// Итог одного impact
#[derive(Debug, Clone, PartialEq)]
pub struct BlastReport {
    pub effect: Entity,
    /// Персонажи, получившие урон
    pub characters: Vec<Entity>,
    /// Персонажи, подожжённые взрывом
    pub ignited: Vec<Entity>,
    /// Тела, получившие impulse
    pub bodies: Vec<Entity>,
}

/// Event: взрыв разрешён (observability, host звук/камера)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct BlastResolved {
    pub explosive: Entity,
    pub point: Vec3,
    pub effect: Entity,
    pub characters: Vec<Entity>,
    pub ignited: Vec<Entity>,
    pub bodies: Vec<Entity>,
}

/// Коллайдер из overlap query
#[derive(Debug, Clone, Copy)]
struct BlastHit {
    collider: Entity,
    /// Rigid body, к которому прикреплён коллайдер
    body: Option<Entity>,
    position: Vec3,
    layer: Group,
}

/// SystemParam: всё, что трогает взрыв
#[derive(SystemParam)]
pub struct BlastWorld<'w, 's> {
    commands: Commands<'w, 's>,
    catalog: Res<'w, EffectCatalog>,
    time: Res<'w, Time>,
    damage_requests: EventWriter<'w, DamageRequest>,
    players: Query<'w, 's, Entity, (With<Player>, With<Character>)>,
    characters: Query<
        'w,
        's,
        (
            Entity,
            &'static Transform,
            &'static Health,
            Option<&'static CharacterRig>,
            &'static mut Ragdoll,
            &'static mut LastInteraction,
            Has<Player>,
            Has<Dead>,
            Option<&'static Burning>,
        ),
        With<Character>,
    >,
    colliders: Query<
        'w,
        's,
        (
            Entity,
            &'static Transform,
            Option<&'static CollisionGroups>,
            Option<&'static BlastExtent>,
            Option<&'static ChildOf>,
        ),
        With<Collider>,
    >,
    transforms: Query<'w, 's, &'static Transform>,
    bodies: Query<
        'w,
        's,
        (
            &'static RigidBody,
            Option<&'static mut Velocity>,
            Option<&'static CollisionGroups>,
        ),
    >,
}

impl BlastWorld<'_, '_> {
    /// Взрыв предмета `explosive` в точке контакта
    ///
    /// # Errors
    /// `ConfigError::UnknownEffect` — blast (или burn) эффект не зарегистрирован.
    /// Проверяется до любого урона: невидимый взрыв недопустим.
    ///
    /// `ignited_this_run` — цели, подожжённые ранее в этом же dispatch
    /// (их `Burning` ещё в command queue). Считаются уже горящими.
    pub fn impact(
        &mut self,
        explosive: Entity,
        area: &AreaEffect,
        responsible: Option<Entity>,
        contact: BlastContact,
        ignited_this_run: &mut HashSet<Entity>,
    ) -> Result<BlastReport, ConfigError> {
        let blast = &area.blast;
        if let Some(igniter) = &area.igniter {
            self.catalog.resolve(&igniter.effect_id)?;
        }

        // 1. Эффект
        let transform =
            blast_effect_transform(contact.point, contact.normal, contact.up, blast.effect_scale());
        let effect = spawn_effect(
            &mut self.commands,
            &self.catalog,
            &blast.effect_id,
            EffectPlacement::World(transform),
            EffectRenderer::Default,
        )?;

        // 2. Overlap query
        let hits = self.overlap(contact.point, blast.radius);

        // 3. Pre-seed
        let player = self.players.iter().next();
        let mut affected_characters: HashSet<Entity> = HashSet::new();
        affected_characters.insert(explosive);
        affected_characters.extend(player);

        let mut affected_bodies: HashSet<Entity> = HashSet::new();
        if area.exemption.exempts_own_body() {
            affected_bodies.insert(explosive);
        }
        if area.exemption.exempts_player() {
            affected_bodies.extend(player);
        }

        let mut report = BlastReport {
            effect,
            characters: Vec::new(),
            ignited: Vec::new(),
            bodies: Vec::new(),
        };

        // 4. Characters до bodies
        self.character_pass(
            area,
            responsible,
            contact.point,
            &mut affected_characters,
            ignited_this_run,
            &mut report,
        )?;

        // 5. Bodies
        self.body_pass(blast, contact.point, &hits, &mut affected_bodies, &mut report);

        logger::log(&format!(
            "💥 Blast {:?} at {:?} (r={}, exemption={:?}): {} characters, {} ignited, {} bodies",
            explosive,
            contact.point,
            blast.radius,
            area.exemption,
            report.characters.len(),
            report.ignited.len(),
            report.bodies.len()
        ));

        Ok(report)
    }

    fn character_pass(
        &mut self,
        area: &AreaEffect,
        responsible: Option<Entity>,
        center: Vec3,
        affected: &mut HashSet<Entity>,
        ignited_this_run: &mut HashSet<Entity>,
        report: &mut BlastReport,
    ) -> Result<(), ConfigError> {
        let blast = &area.blast;
        let now = self.time.elapsed_secs();

        for (entity, transform, health, rig, mut ragdoll, mut interaction, is_player, is_dead, burning) in
            self.characters.iter_mut()
        {
            if is_player || is_dead || !health.is_alive() {
                continue;
            }
            if transform.translation.distance(center) >= blast.radius {
                continue;
            }
            if !affected.insert(entity) {
                continue;
            }

            let part = rig.map_or(entity, |rig| rig.root_part);
            self.damage_requests.write(DamageRequest {
                target: entity,
                part,
                damage_type: DamageType::Energy,
                amount: blast.damage,
                source: responsible,
            });

            ragdoll.set_state(RagdollState::Destabilized);

            if let Some(igniter) = &area.igniter {
                match (rig, burning) {
                    (_, Some(burning)) => logger::log(&format!(
                        "Blast: {:?} already burning ({:.2}s left), not re-ignited",
                        entity,
                        burning.remaining()
                    )),
                    (_, None) if ignited_this_run.contains(&entity) => logger::log(&format!(
                        "Blast: {:?} already ignited this tick, not re-ignited",
                        entity
                    )),
                    (Some(rig), None) => {
                        ignite(&mut self.commands, &self.catalog, entity, rig, igniter, responsible)?;
                        ignited_this_run.insert(entity);
                        report.ignited.push(entity);
                    }
                    (None, None) => logger::log_warning(&format!(
                        "Blast: {:?} has no CharacterRig, ignition skipped",
                        entity
                    )),
                }
            }

            if let Some(actor) = responsible {
                interaction.record(actor, now);
            }

            report.characters.push(entity);
        }

        Ok(())
    }

    fn body_pass(
        &mut self,
        blast: &BlastConfig,
        center: Vec3,
        hits: &[BlastHit],
        affected: &mut HashSet<Entity>,
        report: &mut BlastReport,
    ) {
        for hit in hits {
            let Some(body) = hit.body else {
                continue;
            };
            if hit.position.distance(center) >= blast.radius {
                continue;
            }
            let Ok(body_position) = self.transforms.get(body).map(|tf| tf.translation) else {
                continue;
            };
            let Ok((rigid_body, velocity, body_groups)) = self.bodies.get_mut(body) else {
                continue;
            };
            // NPC-reserved слой проверяется у тела: ragdoll коллайдер NPC не открывает impulse
            let body_layer = memberships(body_groups);
            if body_layer.intersects(IMPULSE_EXCLUDED_LAYERS) {
                continue;
            }
            // Kinematic / fixed не двигаются
            if *rigid_body != RigidBody::Dynamic {
                continue;
            }
            if !affected.insert(body) {
                continue;
            }

            let impulse = radial_impulse(
                center,
                body_position,
                blast.force,
                blast.radius,
                BLAST_FALLOFF_EXPONENT,
            );

            match velocity {
                Some(mut velocity) => velocity.linvel += impulse,
                None => {
                    self.commands.entity(body).try_insert(Velocity::linear(impulse));
                }
            }

            report.bodies.push(body);
            logger::log(&format!(
                "Blast impulse {:?} on {} (collider {:?} on {}): {:?}",
                body,
                layer_name(body_layer),
                hit.collider,
                layer_name(hit.layer),
                impulse
            ));
        }
    }

    /// Коллайдеры на BLAST_QUERY_MASK в пределах radius (+ BlastExtent)
    ///
    /// Результат отсортирован по Entity: порядок не зависит от storage.
    fn overlap(&self, center: Vec3, radius: f32) -> Vec<BlastHit> {
        let mut hits: Vec<BlastHit> = self
            .colliders
            .iter()
            .filter_map(|(collider, transform, groups, extent, parent)| {
                let layer = memberships(groups);
                if !layer.intersects(BLAST_QUERY_MASK) {
                    return None;
                }

                let position = match parent.and_then(|p| self.transforms.get(p.parent()).ok()) {
                    Some(parent_tf) => parent_tf.transform_point(transform.translation),
                    None => transform.translation,
                };
                let reach = radius + extent.map_or(0.0, |extent| extent.0.max(0.0));
                if position.distance(center) > reach {
                    return None;
                }

                Some(BlastHit {
                    collider,
                    body: self.attached_body(collider, parent),
                    position,
                    layer,
                })
            })
            .collect();

        hits.sort_by_key(|hit| hit.collider);
        hits
    }

    fn attached_body(&self, collider: Entity, parent: Option<&ChildOf>) -> Option<Entity> {
        if self.bodies.contains(collider) {
            return Some(collider);
        }

        parent
            .map(|parent| parent.parent())
            .filter(|parent| self.bodies.contains(*parent))
    }
}

/// Система: ContactStarted от предмета с AreaEffect → impact
///
/// Responsible actor = last handler предмета.
pub fn resolve_blast_contacts(
    mut contacts: EventReader<ContactStarted>,
    explosives: Query<(&AreaEffect, Option<&Item>)>,
    mut blast_world: BlastWorld,
    mut resolved: EventWriter<BlastResolved>,
) -> Result {
    let mut ignited_this_run: HashSet<Entity> = HashSet::new();

    for contact in contacts.read() {
        let Ok((area, item)) = explosives.get(contact.source) else {
            continue;
        };

        let responsible = item.and_then(|item| item.last_handler);
        let report = blast_world.impact(
            contact.source,
            area,
            responsible,
            BlastContact::from(contact),
            &mut ignited_this_run,
        )?;

        resolved.write(BlastResolved {
            explosive: contact.source,
            point: contact.point,
            effect: report.effect,
            characters: report.characters,
            ignited: report.ignited,
            bodies: report.bodies,
        });
    }

    Ok(())
}

//! Burning — damage-over-time status effect
//!
//! State machine:
//! - Active (elapsed < duration): каждый тик elapsed += delta, урон dps × delta
//! - Expired (elapsed ≥ duration): терминальное, эффект остановлен, компонент снят
//!
//! Один Burning на персонажа — по конструкции (Bevy component slot).
//! Повторный поджог = insert нового компонента: старый заменяется целиком,
//! его VFX останавливается в `on_replace` hook (elapsed/параметры не переносятся).

use bevy::ecs::component::HookContext;
use bevy::ecs::world::DeferredWorld;
use bevy::prelude::*;

use super::config::IgniteConfig;
use crate::effects::instance::stop_effect_deferred;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnPhase {
    Active,
    Expired,
}

/// Результат одного тика горения
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnTick {
    /// Урон, накопленный за тик (только внутри активного окна)
    pub damage: f32,
    /// Тик перевёл горение в Expired
    pub expired: bool,
}

/// Status effect: персонаж горит
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[component(on_replace = stop_burn_effect)]
pub struct Burning {
    pub damage_per_second: f32,
    pub duration: f32,
    /// Секунды с момента поджога (монотонно растёт)
    pub elapsed: f32,
    /// EffectInstance горения (child root part персонажа)
    pub effect: Entity,
    /// Кто поджёг (для DamageRequest.source)
    pub source: Option<Entity>,
}

impl Burning {
    pub fn new(config: &IgniteConfig, effect: Entity, source: Option<Entity>) -> Self {
        Self {
            damage_per_second: config.damage_per_second,
            duration: config.duration,
            elapsed: 0.0,
            effect,
            source,
        }
    }

    pub fn phase(&self) -> BurnPhase {
        if self.elapsed >= self.duration {
            BurnPhase::Expired
        } else {
            BurnPhase::Active
        }
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Продвинуть горение на delta секунд
    ///
    /// Урон считается только за часть delta внутри [0, duration]:
    /// суммарный урон за всё горение = dps × duration.
    pub fn advance(&mut self, delta: f32) -> BurnTick {
        if self.phase() == BurnPhase::Expired {
            return BurnTick {
                damage: 0.0,
                expired: true,
            };
        }

        let before = self.elapsed;
        self.elapsed += delta.max(0.0);
        let burned = (self.elapsed.min(self.duration) - before).max(0.0);

        BurnTick {
            damage: self.damage_per_second * burned,
            expired: self.phase() == BurnPhase::Expired,
        }
    }
}

/// Hook: Burning заменён / снят / персонаж удалён → остановить VFX
///
/// Эффект мог уже остановиться (expiry) или исчезнуть вместе с персонажем — no-op.
fn stop_burn_effect(mut world: DeferredWorld, context: HookContext) {
    let Some(effect) = world.get::<Burning>(context.entity).map(|burning| burning.effect) else {
        return;
    };

    stop_effect_deferred(&mut world, effect);
}

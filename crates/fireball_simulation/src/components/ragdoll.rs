//! Ragdoll компоненты: состояние устойчивости, rig (root part + VFX surface)

use bevy::prelude::*;

/// Состояние ragdoll персонажа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum RagdollState {
    /// Персонаж на ногах, анимация управляет телом
    #[default]
    Standing,
    /// Потеря равновесия (не смерть) — blast сбивает с ног
    Destabilized,
    /// Мёртвое тело, полностью физическое
    Inert,
}

#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Ragdoll {
    pub state: RagdollState,
}

impl Ragdoll {
    /// Inert терминален: мёртвого нельзя "дестабилизировать" обратно
    pub fn set_state(&mut self, state: RagdollState) {
        if self.state != RagdollState::Inert {
            self.state = state;
        }
    }
}

/// Rig персонажа: ссылки на child entities
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CharacterRig {
    /// Root body part — цель DamageRequest, якорь burn VFX
    pub root_part: Entity,
    /// Surface для VFX (не default renderer)
    pub vfx_renderer: Entity,
}

/// Часть тела персонажа (child entity с коллайдером)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BodyPart {
    pub character: Entity,
}

/// VFX renderer surface персонажа
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct VfxRenderer {
    pub character: Entity,
}

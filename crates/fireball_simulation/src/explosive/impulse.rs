//! Radial impulse (velocity-change mode)

use bevy::prelude::*;

/// Показатель falloff: (1 - d/r)^0.5 — near-field impulse доминирует
pub const BLAST_FALLOFF_EXPONENT: f32 = 0.5;

/// Radial impulse от центра взрыва к телу
///
/// `dir * magnitude * (1 - d/r)^falloff`, dir = от центра к телу
/// (+Y если тело ровно в центре). Вне радиуса — ноль.
pub fn radial_impulse(center: Vec3, body: Vec3, magnitude: f32, radius: f32, falloff: f32) -> Vec3 {
    let offset = body - center;
    let distance = offset.length();

    if radius <= 0.0 || distance >= radius {
        return Vec3::ZERO;
    }

    let direction = offset.try_normalize().unwrap_or(Vec3::Y);
    let attenuation = (1.0 - distance / radius).powf(falloff);

    direction * magnitude * attenuation
}

/// Ориентация blast эффекта: local +Z вдоль нормали контакта (forward = -normal),
/// up = reference up источника
pub fn blast_effect_transform(point: Vec3, normal: Vec3, up: Vec3, scale: Vec3) -> Transform {
    Transform::from_translation(point)
        .looking_to(-normal, up)
        .with_scale(scale)
}

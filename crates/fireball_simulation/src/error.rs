//! Configuration errors
//!
//! Все ошибки здесь фатальны: неизвестный effect id или невалидный параметр
//! модуля — это дефект контента, а не runtime флуктуация.
//! Отсутствие optional данных (нет igniter, эффект уже удалён) ошибкой не является.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("effect `{0}` is not registered in the effect catalog")]
    UnknownEffect(String),

    #[error("invalid {field} = {value}: {reason}")]
    InvalidParameter {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}

/// Проверка `value > 0` (NaN отклоняется)
pub(crate) fn require_positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            field,
            value,
            reason: "must be a finite number greater than zero",
        })
    }
}

/// Проверка `value >= 0` (NaN отклоняется)
pub(crate) fn require_non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            field,
            value,
            reason: "must be a finite non-negative number",
        })
    }
}

//! Full recognized-option set (spec §6.3): the formatting subset lives in
//! [`calc_format::FormatSettings`]; this adds the options the evaluator
//! itself consumes (angle unit) and the locale hook `set_user_locale`
//! mutates.

use calc_eval::AngleUnit;
use calc_format::FormatSettings;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    pub format: FormatSettings,
    pub angle_unit: SerializableAngleUnit,
    /// Region tag from the most recent `set_user_locale` call, if any.
    /// Not yet consulted for locale-specific rendering beyond what
    /// `format` already enumerates; kept so the API surface matches §6.2.
    pub locale: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings { format: FormatSettings::default(), angle_unit: SerializableAngleUnit::Degree, locale: None }
    }
}

impl Settings {
    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit.into()
    }
}

/// Mirrors [`calc_eval::AngleUnit`] with serde derives, since that type
/// lives in a crate this one does not want to hand serialization
/// responsibilities to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SerializableAngleUnit {
    Degree,
    Radian,
}

impl From<SerializableAngleUnit> for AngleUnit {
    fn from(value: SerializableAngleUnit) -> Self {
        match value {
            SerializableAngleUnit::Degree => AngleUnit::Degree,
            SerializableAngleUnit::Radian => AngleUnit::Radian,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_use_degrees() {
        let settings = Settings::default();
        assert_eq!(settings.angle_unit(), AngleUnit::Degree);
    }

    #[test]
    fn angle_unit_conversion_round_trips_through_the_serializable_wrapper() {
        let settings = Settings { angle_unit: SerializableAngleUnit::Radian, ..Settings::default() };
        assert_eq!(settings.angle_unit(), AngleUnit::Radian);
    }
}

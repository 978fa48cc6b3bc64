use super::FieldValue;
use crate::error::{ProcessingError, Result};
use crate::utils::coordinates::radians_to_decimal;
use serde::{Deserialize, Serialize};

/// Unit a source stores its numeric angles in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

/// Which celestial coordinate an angle represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleKind {
    RightAscension,
    Declination,
}

impl AngleKind {
    pub fn column(&self) -> &'static str {
        match self {
            AngleKind::RightAscension => crate::utils::constants::COL_RA,
            AngleKind::Declination => crate::utils::constants::COL_DEC,
        }
    }
}

/// An angle as read from a catalog cell, before normalization.
///
/// The shape is fixed when the cell is read: text cells become
/// `Sexagesimal`, numeric cells become `DecimalDegrees`. Numeric cells of a
/// radian-valued source are converted to degrees on the way in.
#[derive(Debug, Clone, PartialEq)]
pub enum AngleInput {
    Sexagesimal(String),
    DecimalDegrees(f64),
}

impl AngleInput {
    /// Resolve a catalog field into an angle input. Missing fields yield `None`.
    ///
    /// Cartesian cells only exist in the projected column, so one showing up
    /// in an angle column is rejected as an invalid angle.
    pub fn from_field(field: &FieldValue, unit: AngleUnit) -> Result<Option<Self>> {
        let numeric = |value: f64| match unit {
            AngleUnit::Degrees => AngleInput::DecimalDegrees(value),
            AngleUnit::Radians => AngleInput::DecimalDegrees(radians_to_decimal(value)),
        };

        match field {
            FieldValue::Missing => Ok(None),
            FieldValue::Integer(value) => Ok(Some(numeric(*value as f64))),
            FieldValue::Float(value) => Ok(Some(numeric(*value))),
            FieldValue::Text(text) => Ok(Some(AngleInput::Sexagesimal(text.clone()))),
            FieldValue::Cartesian(_) => Err(ProcessingError::InvalidAngle(format!(
                "cartesian value {} is not an angle",
                field
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::CartesianTriple;

    #[test]
    fn test_text_field_is_sexagesimal() {
        let field = FieldValue::Text("05 34 31.94".to_string());
        assert_eq!(
            AngleInput::from_field(&field, AngleUnit::Degrees).unwrap(),
            Some(AngleInput::Sexagesimal("05 34 31.94".to_string()))
        );
    }

    #[test]
    fn test_numeric_field_in_radians_is_converted() {
        let field = FieldValue::Float(std::f64::consts::PI);
        assert_eq!(
            AngleInput::from_field(&field, AngleUnit::Radians).unwrap(),
            Some(AngleInput::DecimalDegrees(180.0))
        );

        let field = FieldValue::Float(1.0);
        assert_eq!(
            AngleInput::from_field(&field, AngleUnit::Radians).unwrap(),
            Some(AngleInput::DecimalDegrees(57.2958))
        );
    }

    #[test]
    fn test_integer_field_in_degrees() {
        assert_eq!(
            AngleInput::from_field(&FieldValue::Integer(45), AngleUnit::Degrees).unwrap(),
            Some(AngleInput::DecimalDegrees(45.0))
        );
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(
            AngleInput::from_field(&FieldValue::Missing, AngleUnit::Degrees).unwrap(),
            None
        );
    }

    #[test]
    fn test_cartesian_field_is_not_an_angle() {
        let field = FieldValue::Cartesian(CartesianTriple::new(1.0, 0.0, 0.0));
        let err = AngleInput::from_field(&field, AngleUnit::Degrees).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidAngle(_)));
        assert!(err.is_row_level());
    }
}

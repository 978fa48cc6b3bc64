use crate::utils::constants::MISSING_TOKENS;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Projection of (ra, dec, parallax) onto a sphere of radius `parallax`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartesianTriple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl CartesianTriple {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// A single scalar cell of a catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Missing,
    Integer(i64),
    Float(f64),
    Text(String),
    Cartesian(CartesianTriple),
}

impl FieldValue {
    /// Type a raw CSV cell. Empty cells and NaN/null markers are missing.
    pub fn from_cell(cell: &str) -> Self {
        let trimmed = cell.trim();

        if trimmed.is_empty()
            || MISSING_TOKENS
                .iter()
                .any(|token| trimmed.eq_ignore_ascii_case(token))
        {
            return FieldValue::Missing;
        }

        if let Ok(value) = trimmed.parse::<i64>() {
            return FieldValue::Integer(value);
        }

        if let Ok(value) = trimmed.parse::<f64>() {
            return FieldValue::Float(value);
        }

        FieldValue::Text(trimmed.to_string())
    }

    pub fn is_missing(&self) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Float(value) => value.is_nan(),
            _ => false,
        }
    }

    /// Numeric view of the field; integers widen to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(value) => Some(*value as f64),
            FieldValue::Float(value) if !value.is_nan() => Some(*value),
            _ => None,
        }
    }

    pub fn as_cartesian(&self) -> Option<&CartesianTriple> {
        match self {
            FieldValue::Cartesian(triple) => Some(triple),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => f.write_str("NA"),
            FieldValue::Integer(value) => write!(f, "{}", value),
            FieldValue::Float(value) => write!(f, "{}", value),
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Cartesian(t) => write!(f, "({:.6}, {:.6}, {:.6})", t.x, t.y, t.z),
        }
    }
}

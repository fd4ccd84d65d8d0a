//! Quantity measures.

use serde::{Deserialize, Serialize};

/// A quantity paired with a measurement unit reference.
///
/// The unit is referenced by its stable key (the `omUnitIdentifier`), not
/// by backend id, so measures can be authored before the unit's remote id
/// is known locally. Validation resolves the key against the unit cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// The numerical value of the quantity.
    pub has_numerical_value: f64,

    /// Stable key of the measurement unit, if the quantity is dimensioned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_unit: Option<String>,
}

impl Measure {
    /// Creates a dimensioned measure.
    #[must_use]
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            has_numerical_value: value,
            has_unit: Some(unit.into()),
        }
    }

    /// Creates a dimensionless measure (a bare count).
    #[must_use]
    pub fn count(value: f64) -> Self {
        Self {
            has_numerical_value: value,
            has_unit: None,
        }
    }
}

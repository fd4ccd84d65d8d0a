//! Default measurement units.
//!
//! Stable keys are OM unit identifiers.

use super::{BaselineRecord, ClassBaseline};
use serde_json::json;
use truecommons_types::EntityClass;

pub(super) fn baseline() -> ClassBaseline {
    let records = vec![
        BaselineRecord::new("one", json!({ "label": "Each", "symbol": "ea" })),
        BaselineRecord::new("hour", json!({ "label": "Hour", "symbol": "h" })),
        BaselineRecord::new("kilogram", json!({ "label": "Kilogram", "symbol": "kg" })),
        BaselineRecord::new("meter", json!({ "label": "Meter", "symbol": "m" })),
        BaselineRecord::new("piece", json!({ "label": "Piece", "symbol": "pc" })),
        BaselineRecord::new("minute", json!({ "label": "Minute", "symbol": "min" })),
        BaselineRecord::new("second", json!({ "label": "Second", "symbol": "s" })),
        BaselineRecord::new("liter", json!({ "label": "Liter", "symbol": "L" })),
        BaselineRecord::new("gram", json!({ "label": "Gram", "symbol": "g" })),
        BaselineRecord::new("day", json!({ "label": "Day", "symbol": "d" })),
    ];

    // The minimum units needed for quantities to be expressible at all.
    let required_keys = ["one", "hour", "kilogram", "meter"]
        .map(String::from)
        .to_vec();

    ClassBaseline {
        class: EntityClass::Unit,
        records,
        required_keys,
        core_keys: None,
    }
}

//! Default action vocabulary.
//!
//! Backends commonly define the action vocabulary as fixed and
//! non-authorable. Provisioning is still attempted for every record, but
//! readiness demands only the core operations (`core_keys`).

use super::{BaselineRecord, ClassBaseline};
use serde_json::json;
use truecommons_types::EntityClass;

pub(super) fn baseline() -> ClassBaseline {
    let records = vec![
        BaselineRecord::new(
            "produce",
            json!({ "label": "Produce", "resourceEffect": "increment" }),
        ),
        BaselineRecord::new(
            "consume",
            json!({ "label": "Consume", "resourceEffect": "decrement" }),
        ),
        BaselineRecord::new(
            "use",
            json!({ "label": "Use", "resourceEffect": "noEffect" }),
        ),
        BaselineRecord::new(
            "contribute",
            json!({ "label": "Contribute", "resourceEffect": "increment" }),
        ),
        BaselineRecord::new(
            "transfer",
            json!({ "label": "Transfer", "resourceEffect": "decrementIncrement" }),
        ),
        BaselineRecord::new(
            "fork",
            json!({ "label": "Fork", "resourceEffect": "increment" }),
        ),
        BaselineRecord::new(
            "remix",
            json!({ "label": "Remix", "resourceEffect": "increment" }),
        ),
        BaselineRecord::new(
            "work",
            json!({ "label": "Work", "resourceEffect": "noEffect" }),
        ),
        BaselineRecord::new(
            "cite",
            json!({ "label": "Cite", "resourceEffect": "noEffect" }),
        ),
        BaselineRecord::new(
            "accept",
            json!({ "label": "Accept", "resourceEffect": "noEffect" }),
        ),
    ];

    let required_keys = [
        "produce",
        "consume",
        "use",
        "contribute",
        "transfer",
        "fork",
        "remix",
    ]
    .map(String::from)
    .to_vec();

    // The core economic operations every usable vocabulary carries.
    let core_keys = ["produce", "consume", "use", "transfer"]
        .map(String::from)
        .to_vec();

    ClassBaseline {
        class: EntityClass::Action,
        records,
        required_keys,
        core_keys: Some(core_keys),
    }
}

//! Default process specifications.

use super::{BaselineRecord, ClassBaseline};
use serde_json::json;
use truecommons_types::EntityClass;

pub(super) fn baseline() -> ClassBaseline {
    let records = vec![
        BaselineRecord::new(
            "General Discussion",
            json!({ "note": "A process for general discussions, brainstorming, and decision-making." }),
        ),
        BaselineRecord::new(
            "Software Development",
            json!({ "note": "A process for planning, developing, and deploying software components." }),
        ),
        BaselineRecord::new(
            "Content Creation",
            json!({ "note": "A process for creating written or visual content, such as articles, documentation, or designs." }),
        ),
        BaselineRecord::new(
            "Community Governance",
            json!({ "note": "A process for community-related decisions, proposals, and governance tasks." }),
        ),
    ];

    let required_keys = ["General Discussion", "Software Development"]
        .map(String::from)
        .to_vec();

    ClassBaseline {
        class: EntityClass::ProcessSpecification,
        records,
        required_keys,
        core_keys: None,
    }
}

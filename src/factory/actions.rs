use serde_json::{Map, Value};
use tracing::debug;

use crate::content::{ActionIdentifier, ContentAction};

/// Actions from a block's `actions` object.
///
/// Each key names an action the viewer may take; its boolean value is the
/// current toggle state. Non-boolean values read as off.
pub fn parse_actions(raw: &Map<String, Value>) -> Vec<ContentAction> {
    raw.iter()
        .map(|(key, value)| {
            let on = value.as_bool().unwrap_or_else(|| {
                debug!(action = %key, ?value, "non-boolean action state");
                false
            });
            ContentAction::new(ActionIdentifier::from(key.as_str()), on)
        })
        .collect()
}

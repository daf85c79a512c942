use blueprint_types::PrivilegeLevel;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Widen `current` with `requested`, keeping the higher level per scope.
///
/// A scope that is unset (absent, null or empty) takes the requested value as
/// written. A set scope is only replaced by a strictly higher level.
pub fn widen_permissions(current: &mut Map<String, Value>, requested: &IndexMap<String, String>) {
    for (scope, level) in requested {
        let replace = match current.get(scope) {
            Some(existing) if is_set(existing) => {
                PrivilegeLevel::from_level(level) > PrivilegeLevel::from_value(existing)
            }
            _ => true,
        };
        if replace {
            current.insert(scope.clone(), Value::String(level.clone()));
        }
    }
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => !text.is_empty(),
        _ => true,
    }
}

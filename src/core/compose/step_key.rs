use crate::core::canonical::to_canonical_json;
use serde_json::{Map, Value};

/// Identity used to decide whether two step records are the same step.
///
/// Derivation order: a non-empty `name`; else `uses` together with the
/// canonical form of `with`; else `run` verbatim; else the canonical form of
/// the whole record. A step that shares a name with another is the same step
/// regardless of its other fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StepKey {
    Name(String),
    Action { uses: String, with: String },
    Command(String),
    Opaque(String),
}

impl StepKey {
    pub fn of(step: &Value) -> Self {
        match step {
            Value::Object(fields) => Self::of_fields(fields).unwrap_or_else(|| Self::opaque(step)),
            _ => Self::opaque(step),
        }
    }

    fn of_fields(fields: &Map<String, Value>) -> Option<Self> {
        if let Some(name) = string_field(fields, "name").filter(|name| !name.is_empty()) {
            return Some(StepKey::Name(name.to_string()));
        }
        if let Some(uses) = string_field(fields, "uses") {
            let with = match fields.get("with") {
                Some(args) if !args.is_null() => to_canonical_json(args),
                _ => "{}".to_string(),
            };
            return Some(StepKey::Action {
                uses: uses.to_string(),
                with,
            });
        }
        string_field(fields, "run").map(|run| StepKey::Command(run.to_string()))
    }

    fn opaque(step: &Value) -> Self {
        StepKey::Opaque(to_canonical_json(step))
    }
}

fn string_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

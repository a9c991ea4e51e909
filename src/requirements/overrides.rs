//! Per-evaluation requirement overrides.
//!
//! An override forces a requirement to read as met or unmet for one
//! evaluation pass. A key that is absent means "use the real probe".
//! Nothing here is persisted.

use std::collections::BTreeMap;

use crate::error::{ReadinessError, Result};

use super::registry::RequirementKey;

/// Forced availability per requirement.
pub type Overrides = BTreeMap<RequirementKey, bool>;

/// JSON key carrying the caller's platform choice; not a requirement.
const PLATFORM_KEY: &str = "platform";

/// Parse a single `key=bool` override.
pub fn parse_override(text: &str) -> Result<(RequirementKey, bool)> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| ReadinessError::InvalidOverride {
            value: text.to_string(),
            message: "expected key=true or key=false".to_string(),
        })?;
    let key: RequirementKey = key.parse()?;
    let value = parse_bool(value).ok_or_else(|| ReadinessError::InvalidOverride {
        value: text.to_string(),
        message: format!("'{}' is not true or false", value.trim()),
    })?;
    Ok((key, value))
}

/// Parse a list of overrides, each of which may hold several
/// comma-separated `key=bool` pairs. Later entries win.
pub fn parse_overrides<I, S>(items: I) -> Result<Overrides>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut overrides = Overrides::new();
    for item in items {
        for pair in item.as_ref().split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = parse_override(pair)?;
            overrides.insert(key, value);
        }
    }
    Ok(overrides)
}

/// Parse overrides from a JSON object such as `{"git": true, "npm": false}`.
///
/// `null` leaves a key on its real probe. A `"platform"` entry is skipped.
pub fn overrides_from_json(json: &str) -> Result<Overrides> {
    let raw: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(json).map_err(|e| ReadinessError::InvalidOverride {
            value: json.to_string(),
            message: e.to_string(),
        })?;

    let mut overrides = Overrides::new();
    for (name, value) in raw {
        if name == PLATFORM_KEY {
            continue;
        }
        let key: RequirementKey = name.parse()?;
        let forced = match &value {
            serde_json::Value::Null => continue,
            serde_json::Value::Bool(b) => Some(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            serde_json::Value::String(s) => parse_bool(s),
            _ => None,
        };
        let forced = forced.ok_or_else(|| ReadinessError::InvalidOverride {
            value: format!("{}={}", name, value),
            message: "expected a boolean".to_string(),
        })?;
        overrides.insert(key, forced);
    }
    Ok(overrides)
}

/// Flip the debug override for `key`.
///
/// An overridden key goes back to its real probe. Otherwise the key is
/// forced to the opposite of what the real probe says.
pub fn toggle(overrides: &Overrides, key: RequirementKey, really_available: bool) -> Overrides {
    let mut next = overrides.clone();
    if next.remove(&key).is_none() {
        next.insert(key, !really_available);
    }
    next
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Status switches shared by every toggleable entity.

use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::domain::types::EntityId;

/// Generic message used when the backend rejects a status change.
pub const DEFAULT_TOGGLE_FAILURE: &str = "Failed to update status";

/// Reads a loosely typed flag: booleans, `0`/`1` and `"true"`/`"false"`.
pub fn flag_from_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Writes a loosely typed flag into a boolean slot.
///
/// Returns `false`, leaving the slot untouched, when `value` is not a flag.
pub fn assign_flag(slot: &mut bool, value: &Value) -> bool {
    match flag_from_value(value) {
        Some(flag) => {
            *slot = flag;
            true
        }
        None => false,
    }
}

/// `deserialize_with` helper for boolean columns the backend sometimes
/// sends as numbers or strings. `null` reads as `false`.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(false);
    }
    flag_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected a flag, got {value}")))
}

/// Wire representation of one switch on an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusField {
    /// Boolean column, e.g. `active: true`.
    Flag { name: Cow<'static, str> },
    /// Integer column holding `1` or `0`, e.g. lock functions.
    Numeric { name: Cow<'static, str> },
    /// String column with one value per state, e.g. `current_status: "confirmed"`.
    Enumerated {
        name: Cow<'static, str>,
        active: &'static str,
        inactive: &'static str,
    },
}

impl StatusField {
    pub const fn flag(name: &'static str) -> Self {
        StatusField::Flag {
            name: Cow::Borrowed(name),
        }
    }

    pub const fn numeric(name: &'static str) -> Self {
        StatusField::Numeric {
            name: Cow::Borrowed(name),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StatusField::Flag { name }
            | StatusField::Numeric { name }
            | StatusField::Enumerated { name, .. } => name,
        }
    }

    /// Encodes the on/off view into the backend's field value.
    pub fn encode(&self, on: bool) -> Value {
        match self {
            StatusField::Flag { .. } => Value::Bool(on),
            StatusField::Numeric { .. } => Value::from(u8::from(on)),
            StatusField::Enumerated {
                active, inactive, ..
            } => Value::String(if on { active } else { inactive }.to_string()),
        }
    }

    /// Decodes a backend field value into the on/off view.
    ///
    /// Enum values outside the two known states decode to `None`.
    pub fn decode(&self, value: &Value) -> Option<bool> {
        match self {
            StatusField::Flag { .. } | StatusField::Numeric { .. } => flag_from_value(value),
            StatusField::Enumerated {
                active, inactive, ..
            } => {
                let s = value.as_str()?;
                if s.eq_ignore_ascii_case(active) {
                    Some(true)
                } else if s.eq_ignore_ascii_case(inactive) {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }

    /// Raw value of this field in an entity object echoed by the backend,
    /// when it is one this field understands.
    pub fn read<'a>(&self, entity: &'a Map<String, Value>) -> Option<&'a Value> {
        entity
            .get(self.name())
            .filter(|value| self.decode(value).is_some())
    }

    /// Builds the update body, `{ member: { field: value } }` or just
    /// `{ field: value }` when `member` is `None`.
    pub fn update_body(&self, member: Option<&str>, on: bool) -> Value {
        let mut fields = Map::new();
        fields.insert(self.name().to_string(), self.encode(on));
        match member {
            Some(member) => {
                let mut body = Map::new();
                body.insert(member.to_string(), Value::Object(fields));
                Value::Object(body)
            }
            None => Value::Object(fields),
        }
    }
}

/// An entity with one or more switches that can be flipped from a list page.
///
/// Switches are addressed by field name and read and written as raw wire
/// values, so a value outside the known states survives a failed toggle.
pub trait Togglable {
    fn entity_id(&self) -> EntityId;

    /// Switch flipped when the caller does not name one.
    fn status_field(&self) -> StatusField;

    /// Current wire value of `field`, or `None` if the entity has no such switch.
    fn status_value(&self, field: &str) -> Option<Value>;

    /// Stores a wire value under `field`.
    ///
    /// Returns `false` when the field is unknown or the value does not fit it.
    fn set_status_value(&mut self, field: &str, value: Value) -> bool;

    /// Message shown when the backend refuses the change.
    fn toggle_failure_message(&self, _status: Option<u16>) -> &'static str {
        DEFAULT_TOGGLE_FAILURE
    }

    /// Whether `field` is on. Unknown values read as off.
    fn is_on(&self, field: &StatusField) -> bool {
        self.status_value(field.name())
            .and_then(|value| field.decode(&value))
            .unwrap_or(false)
    }

    fn is_active(&self) -> bool {
        self.is_on(&self.status_field())
    }
}

/// Lifecycle of a single status change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleState {
    Idle(bool),
    Pending { previous: bool, requested: bool },
}

impl ToggleState {
    /// Starts a toggle from an idle state. A pending toggle is left untouched.
    pub fn begin(self) -> Self {
        match self {
            ToggleState::Idle(current) => ToggleState::Pending {
                previous: current,
                requested: !current,
            },
            pending => pending,
        }
    }

    /// Settles with the value the backend reports.
    pub fn confirm(self, value: bool) -> Self {
        match self {
            ToggleState::Pending { .. } => ToggleState::Idle(value),
            idle => idle,
        }
    }

    /// Settles back on the value held before the toggle started.
    pub fn fail(self) -> Self {
        match self {
            ToggleState::Pending { previous, .. } => ToggleState::Idle(previous),
            idle => idle,
        }
    }

    /// Value the UI should display in this state.
    pub fn displayed(self) -> bool {
        match self {
            ToggleState::Idle(value) => value,
            ToggleState::Pending { requested, .. } => requested,
        }
    }

    pub fn is_pending(self) -> bool {
        matches!(self, ToggleState::Pending { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BOOKING_STATUS: StatusField = StatusField::Enumerated {
        name: Cow::Borrowed("current_status"),
        active: "confirmed",
        inactive: "cancelled",
    };

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "deserialize_flag")]
        active: bool,
    }

    #[test]
    fn flag_body_wraps_member() {
        let body = StatusField::flag("active").update_body(Some("banner"), false);
        assert_eq!(body, json!({ "banner": { "active": false } }));
    }

    #[test]
    fn unwrapped_body_has_fields_at_top_level() {
        let body = BOOKING_STATUS.update_body(None, true);
        assert_eq!(body, json!({ "current_status": "confirmed" }));
    }

    #[test]
    fn numeric_flag_is_sent_as_integer() {
        let field = StatusField::numeric("active");
        assert_eq!(
            field.update_body(Some("lock_function"), false),
            json!({ "lock_function": { "active": 0 } })
        );
        assert_eq!(field.decode(&json!(1)), Some(true));
        assert_eq!(field.decode(&json!(0)), Some(false));
    }

    #[test]
    fn enumerated_status_maps_to_on_off() {
        assert_eq!(BOOKING_STATUS.encode(true), json!("confirmed"));
        assert_eq!(BOOKING_STATUS.decode(&json!("Cancelled")), Some(false));
        assert_eq!(BOOKING_STATUS.decode(&json!("Pending")), None);
        assert_eq!(BOOKING_STATUS.decode(&json!(true)), None);
    }

    #[test]
    fn read_takes_known_values_from_entity_object() {
        let entity = json!({ "id": 3, "active": true, "current_status": "Pending" });
        let map = entity.as_object().expect("object");
        assert_eq!(StatusField::flag("active").read(map), Some(&json!(true)));
        assert_eq!(StatusField::flag("show_on_home").read(map), None);
        assert_eq!(BOOKING_STATUS.read(map), None);
    }

    #[test]
    fn loose_flags_deserialize() {
        for (raw, expected) in [
            (json!({ "active": true }), true),
            (json!({ "active": 1 }), true),
            (json!({ "active": 0 }), false),
            (json!({ "active": "true" }), true),
            (json!({ "active": "False" }), false),
            (json!({ "active": null }), false),
            (json!({}), false),
        ] {
            let row: Row = serde_json::from_value(raw.clone()).expect("valid flag");
            assert_eq!(row.active, expected, "{raw}");
        }
        assert!(serde_json::from_value::<Row>(json!({ "active": "maybe" })).is_err());
    }

    #[test]
    fn toggle_state_success_path() {
        let state = ToggleState::Idle(true).begin();
        assert!(state.is_pending());
        assert!(!state.displayed());
        assert_eq!(state.confirm(false), ToggleState::Idle(false));
    }

    #[test]
    fn toggle_state_failure_restores_previous() {
        let state = ToggleState::Idle(true).begin();
        assert_eq!(state.fail(), ToggleState::Idle(true));
    }

    #[test]
    fn begin_while_pending_is_ignored() {
        let pending = ToggleState::Idle(false).begin();
        assert_eq!(pending.begin(), pending);
    }
}

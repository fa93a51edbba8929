//! Catch-all entity for collections without a dedicated type.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::{FieldValue, JsonRecord, ListRecord};
use crate::domain::toggle::{StatusField, Togglable, flag_from_value};
use crate::domain::types::EntityId;

/// Any backend object carrying an `id`.
///
/// Every other column, `active` included, is kept verbatim so a switch is
/// written back in the form the backend sent it (`true` or `1`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GenericEntity {
    pub id: EntityId,
    #[serde(flatten)]
    pub fields: JsonRecord,
}

impl GenericEntity {
    /// Switch stored under `name`, numeric when the backend sends integers.
    pub fn switch(&self, name: &str) -> StatusField {
        let numeric = matches!(self.fields.as_map().get(name), Some(Value::Number(_)));
        let name = Cow::Owned(name.to_string());
        if numeric {
            StatusField::Numeric { name }
        } else {
            StatusField::Flag { name }
        }
    }

    /// Lenient read of a flag column: booleans, `0`/`1`, `"true"`/`"false"`.
    pub fn flag(&self, name: &str) -> bool {
        self.fields
            .as_map()
            .get(name)
            .and_then(flag_from_value)
            .unwrap_or(false)
    }
}

impl ListRecord for GenericEntity {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => self.id.get().into(),
            "active" => self.flag("active").into(),
            _ => self.fields.field(key),
        }
    }
}

impl Togglable for GenericEntity {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn status_field(&self) -> StatusField {
        self.switch("active")
    }

    /// Absent switches read as `null`, which decodes as off.
    fn status_value(&self, field: &str) -> Option<Value> {
        Some(
            self.fields
                .as_map()
                .get(field)
                .cloned()
                .unwrap_or(Value::Null),
        )
    }

    fn set_status_value(&mut self, field: &str, value: Value) -> bool {
        if value.is_null() {
            self.fields.remove(field);
        } else {
            self.fields.set(field, value);
        }
        true
    }
}

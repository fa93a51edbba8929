use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::{FieldValue, ListRecord};
use crate::domain::resource::{Resource, ResourceDescriptor};
use crate::domain::toggle::{
    DEFAULT_TOGGLE_FAILURE, StatusField, Togglable, assign_flag, deserialize_flag,
};
use crate::domain::types::EntityId;

/// Shown when activating one more banner would exceed the backend's cap.
pub const BANNER_LIMIT_MESSAGE: &str =
    "Limit reached: only 5 active banners allowed. Please deactivate one before activating another.";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Banner {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Banner {
    fn descriptor() -> ResourceDescriptor {
        ResourceDescriptor::from_static("banners", "banner")
    }
}

impl ListRecord for Banner {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => self.id.get().into(),
            "title" => self.title.as_str().into(),
            "project_id" => self.project_id.map_or(FieldValue::Null, FieldValue::from),
            "active" => self.active.into(),
            "created_at" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Togglable for Banner {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn status_field(&self) -> StatusField {
        StatusField::flag("active")
    }

    fn status_value(&self, field: &str) -> Option<Value> {
        (field == "active").then_some(Value::Bool(self.active))
    }

    fn set_status_value(&mut self, field: &str, value: Value) -> bool {
        field == "active" && assign_flag(&mut self.active, &value)
    }

    fn toggle_failure_message(&self, status: Option<u16>) -> &'static str {
        match status {
            Some(422) => BANNER_LIMIT_MESSAGE,
            _ => DEFAULT_TOGGLE_FAILURE,
        }
    }
}

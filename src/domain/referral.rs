//! Referral programmes. At most one may be active at a time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::{FieldValue, ListRecord};
use crate::domain::resource::{Resource, ResourceDescriptor};
use crate::domain::toggle::{StatusField, Togglable, assign_flag, deserialize_flag};
use crate::domain::types::EntityId;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReferralConfig {
    pub id: EntityId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub active: bool,
}

impl Resource for ReferralConfig {
    fn descriptor() -> ResourceDescriptor {
        ResourceDescriptor::from_static("referral_configs", "referral_config")
    }
}

impl ListRecord for ReferralConfig {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => self.id.get().into(),
            // Older programmes only have a name.
            "title" => self.title.as_deref().or(self.name.as_deref()).into(),
            "name" => self.name.as_deref().into(),
            "description" => self.description.as_deref().into(),
            "active" => self.active.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Togglable for ReferralConfig {
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
}

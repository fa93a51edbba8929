use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::{FieldValue, ListRecord};
use crate::domain::resource::{Resource, ResourceDescriptor};
use crate::domain::toggle::{StatusField, Togglable, assign_flag, deserialize_flag};
use crate::domain::types::EntityId;

/// Switch featuring a testimonial on the home screen.
pub const SHOW_ON_HOME: StatusField = StatusField::flag("show_on_home");

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Testimonial {
    pub id: EntityId,
    pub user_name: String,
    #[serde(default)]
    pub user_type: Option<String>,
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub active: bool,
    /// Whether the testimonial is featured on the home screen.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub show_on_home: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Testimonial {
    fn descriptor() -> ResourceDescriptor {
        ResourceDescriptor::from_static("testimonials", "testimonial")
    }
}

impl ListRecord for Testimonial {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => self.id.get().into(),
            "user_name" => self.user_name.as_str().into(),
            "user_type" => self.user_type.as_deref().into(),
            "content" => self.content.as_str().into(),
            "active" => self.active.into(),
            "show_on_home" => self.show_on_home.into(),
            "created_at" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }
}

impl Testimonial {
    fn flag_slot(&mut self, field: &str) -> Option<&mut bool> {
        match field {
            "active" => Some(&mut self.active),
            "show_on_home" => Some(&mut self.show_on_home),
            _ => None,
        }
    }
}

impl Togglable for Testimonial {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn status_field(&self) -> StatusField {
        StatusField::flag("active")
    }

    fn status_value(&self, field: &str) -> Option<Value> {
        match field {
            "active" => Some(Value::Bool(self.active)),
            "show_on_home" => Some(Value::Bool(self.show_on_home)),
            _ => None,
        }
    }

    fn set_status_value(&mut self, field: &str, value: Value) -> bool {
        self.flag_slot(field)
            .is_some_and(|slot| assign_flag(slot, &value))
    }
}

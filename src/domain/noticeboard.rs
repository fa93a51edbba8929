use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::record::{FieldValue, ListRecord};
use crate::domain::resource::{Resource, ResourceDescriptor};
use crate::domain::types::EntityId;

/// Notice list row. Notices expire instead of being switched on and off.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Noticeboard {
    pub id: EntityId,
    pub notice_title: String,
    #[serde(default)]
    pub notice_discription: Option<String>,
    #[serde(default)]
    pub expire_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Resource for Noticeboard {
    fn descriptor() -> ResourceDescriptor {
        ResourceDescriptor::from_static("noticeboards", "noticeboard")
    }
}

impl ListRecord for Noticeboard {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => self.id.get().into(),
            "notice_title" => self.notice_title.as_str().into(),
            "notice_discription" => self.notice_discription.as_deref().into(),
            "expire_time" => self.expire_time.into(),
            "created_at" => self.created_at.into(),
            _ => FieldValue::Null,
        }
    }
}

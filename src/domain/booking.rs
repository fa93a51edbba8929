//! Facility bookings, switched between confirmed and cancelled.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::{FieldValue, ListRecord};
use crate::domain::resource::{Resource, ResourceDescriptor, UpdateMethod};
use crate::domain::toggle::{StatusField, Togglable};
use crate::domain::types::EntityId;

/// Bookings carry a status string; `pending` and `completed` are neither
/// on nor off and are left as they are until the user flips them.
pub const BOOKING_STATUS: StatusField = StatusField::Enumerated {
    name: Cow::Borrowed("current_status"),
    active: "confirmed",
    inactive: "cancelled",
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FacilityBooking {
    pub id: EntityId,
    #[serde(default)]
    pub facility_name: Option<String>,
    #[serde(default)]
    pub book_by: Option<String>,
    #[serde(default)]
    pub current_status: String,
    /// Kept as sent so date-only and offset forms both survive.
    #[serde(default)]
    pub startdate: Option<String>,
}

impl Resource for FacilityBooking {
    /// Bookings live under the admin namespace of the PMS API, so the base
    /// URL is expected to end in `pms/admin/`.
    fn descriptor() -> ResourceDescriptor {
        ResourceDescriptor::from_static("facility_bookings", "facility_booking")
            .with_method(UpdateMethod::Patch)
            .unwrapped()
    }
}

impl ListRecord for FacilityBooking {
    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => self.id.get().into(),
            "facility_name" => self.facility_name.as_deref().into(),
            "book_by" => self.book_by.as_deref().into(),
            "current_status" => self.current_status.as_str().into(),
            "startdate" => self
                .startdate
                .as_ref()
                .map_or(FieldValue::Null, |raw| FieldValue::from(&Value::String(raw.clone()))),
            _ => FieldValue::Null,
        }
    }
}

impl Togglable for FacilityBooking {
    fn entity_id(&self) -> EntityId {
        self.id
    }

    fn status_field(&self) -> StatusField {
        BOOKING_STATUS
    }

    fn status_value(&self, field: &str) -> Option<Value> {
        (field == BOOKING_STATUS.name()).then(|| Value::String(self.current_status.clone()))
    }

    fn set_status_value(&mut self, field: &str, value: Value) -> bool {
        match value {
            Value::String(status) if field == BOOKING_STATUS.name() => {
                self.current_status = status;
                true
            }
            _ => false,
        }
    }

    fn toggle_failure_message(&self, _status: Option<u16>) -> &'static str {
        "Failed to update booking status"
    }
}

use serde::Deserialize;

use crate::domain::types::EntityId;
use crate::forms::FormError;

#[derive(Debug, Deserialize)]
/// Status switch flipped on a list row.
pub struct ToggleStatusForm {
    pub id: i64,
}

/// Validated toggle request.
#[derive(Debug, PartialEq, Eq)]
pub struct ToggleStatusPayload {
    pub id: EntityId,
}

impl TryFrom<ToggleStatusForm> for ToggleStatusPayload {
    type Error = FormError;

    fn try_from(form: ToggleStatusForm) -> Result<Self, Self::Error> {
        let id = EntityId::new(form.id).map_err(|_| FormError::InvalidId)?;
        Ok(Self { id })
    }
}

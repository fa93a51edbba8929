//! Optimistic status toggles with rollback on failure.

use serde_json::Value;

use crate::client::ResourceClient;
use crate::client::errors::ClientError;
use crate::domain::resource::ResourceDescriptor;
use crate::domain::toggle::{StatusField, Togglable, ToggleState};
use crate::domain::types::EntityId;
use crate::dto::notification::Notification;
use crate::forms::toggle::{ToggleStatusForm, ToggleStatusPayload};
use crate::services::{ServiceError, ServiceResult};

pub const TOGGLE_SUCCESS_MESSAGE: &str = "Status updated successfully!";

fn find_mut<T: Togglable>(records: &mut [T], id: EntityId) -> ServiceResult<&mut T> {
    records
        .iter_mut()
        .find(|record| record.entity_id() == id)
        .ok_or(ServiceError::NotFound)
}

/// Backend text if it sent one, the record's own message otherwise.
fn rejection<T: Togglable>(record: &T, err: &ClientError) -> ServiceError {
    let message = err
        .backend_message()
        .unwrap_or_else(|| record.toggle_failure_message(err.status()).to_string());
    ServiceError::Rejected(message)
}

/// Flips the default switch of the record `id` inside `records`.
pub async fn toggle_status<C, T>(
    client: &C,
    resource: &ResourceDescriptor,
    records: &mut [T],
    id: EntityId,
) -> ServiceResult<Notification>
where
    C: ResourceClient + ?Sized,
    T: Togglable + Send,
{
    let field = find_mut(records, id)?.status_field();
    toggle_field(client, resource, records, id, &field).await
}

/// Flips `field` on the record `id` inside `records`.
///
/// The new value is shown immediately. On success it is reconciled with the
/// value the backend echoes back, if any; on failure the exact value held
/// before the toggle is restored, even one outside the two switch states,
/// and [`ServiceError::Rejected`] carries the message for the user.
/// No other record is touched and the slice order never changes.
pub async fn toggle_field<C, T>(
    client: &C,
    resource: &ResourceDescriptor,
    records: &mut [T],
    id: EntityId,
    field: &StatusField,
) -> ServiceResult<Notification>
where
    C: ResourceClient + ?Sized,
    T: Togglable + Send,
{
    let record = find_mut(records, id)?;
    let name = field.name();
    let snapshot = record
        .status_value(name)
        .ok_or_else(|| ServiceError::UnknownField(name.to_string()))?;

    let state = ToggleState::Idle(field.decode(&snapshot).unwrap_or(false)).begin();
    record.set_status_value(name, field.encode(state.displayed()));

    let body = field.update_body(resource.body_member(), state.displayed());

    match client.update_fields(resource, id, body).await {
        Ok(echoed) => {
            let echoed = echoed
                .as_ref()
                .and_then(Value::as_object)
                .and_then(|entity| field.read(entity))
                .cloned();
            let confirmed = echoed
                .as_ref()
                .and_then(|value| field.decode(value))
                .unwrap_or(state.displayed());
            let state = state.confirm(confirmed);
            if let Some(raw) = echoed {
                record.set_status_value(name, raw);
            }

            log::info!(
                "Set {} {id} {name} to {}",
                resource.member,
                state.displayed()
            );
            Ok(Notification::success(TOGGLE_SUCCESS_MESSAGE))
        }
        Err(err) => {
            record.set_status_value(name, snapshot);

            log::error!("Failed to toggle {} {id} {name}: {err}", resource.member);
            Err(rejection(&*record, &err))
        }
    }
}

/// Flips the record `id`, keeping at most one record switched on.
///
/// Switching a record on first switches off every other record that is on,
/// one request each. If any of those fails the target is left untouched;
/// the records already switched off stay off, as the backend has them.
pub async fn toggle_exclusive<C, T>(
    client: &C,
    resource: &ResourceDescriptor,
    records: &mut [T],
    id: EntityId,
) -> ServiceResult<Notification>
where
    C: ResourceClient + ?Sized,
    T: Togglable + Send,
{
    let target = find_mut(records, id)?;
    let field = target.status_field();

    if !target.is_on(&field) {
        let others: Vec<EntityId> = records
            .iter()
            .filter(|record| record.entity_id() != id && record.is_on(&field))
            .map(Togglable::entity_id)
            .collect();

        for other in others {
            let body = field.update_body(resource.body_member(), false);
            let result = client.update_fields(resource, other, body).await;
            let record = find_mut(records, other)?;
            match result {
                Ok(_) => {
                    record.set_status_value(field.name(), field.encode(false));
                    log::info!("Switched off {} {other} before activating {id}", resource.member);
                }
                Err(err) => {
                    log::error!("Failed to switch off {} {other}: {err}", resource.member);
                    return Err(rejection(&*record, &err));
                }
            }
        }
    }

    toggle_field(client, resource, records, id, &field).await
}

/// Validates a toggle form before flipping the record.
pub async fn toggle_status_form<C, T>(
    client: &C,
    resource: &ResourceDescriptor,
    records: &mut [T],
    form: ToggleStatusForm,
) -> ServiceResult<Notification>
where
    C: ResourceClient + ?Sized,
    T: Togglable + Send,
{
    let payload = ToggleStatusPayload::try_from(form).map_err(|err| {
        log::error!("Failed to validate toggle form: {err}");
        err
    })?;

    toggle_status(client, resource, records, payload.id).await
}

//! Save/delete flows for owner-scoped collections.
//!
//! Each flow sends the mutation, waits for its response, and only then
//! re-fetches the collection. The returned outcome is applied to the form
//! and list in one synchronous step so reactive state is never observed
//! half-updated.

use crate::api::{ApiClient, ApiError, ApiResult, Resource};
use crate::forms::{EditFields, FormState};
use crate::models::FileUpload;
use crate::refresh::{refresh, EntityList};
use tracing::info;

/// A validated, ready-to-send mutation taken from a form.
#[derive(Clone, Debug)]
pub(crate) struct PreparedSave<R> {
    pub entity: R,
    pub file: Option<FileUpload>,
}

/// Claim the form and validate it. `None` means nothing should be sent:
/// either a submission is already in flight, or validation failed (the
/// failure is already recorded on the form).
pub(crate) fn prepare_save<F>(form: &mut FormState<F>, owner: &str) -> Option<PreparedSave<F::Entity>>
where
    F: EditFields,
{
    if !form.begin_submit() {
        return None;
    }
    if let Err(e) = form.fields.validate() {
        form.fail_validation(e);
        return None;
    }
    Some(PreparedSave {
        entity: form.fields.to_entity(owner, form.editing_id),
        file: form.fields.attachment().cloned(),
    })
}

/// Result of a mutation plus the follow-up fetch.
#[derive(Debug)]
pub(crate) enum MutationOutcome<R> {
    Done {
        message: String,
        refreshed: ApiResult<Vec<R>>,
    },
    Failed(ApiError),
}

impl<R> MutationOutcome<R> {
    /// Apply a save outcome: success clears the form, failure keeps the
    /// entered values for correction.
    pub fn apply_save<F>(self, form: &mut FormState<F>, list: &mut EntityList<R>)
    where
        F: Default,
    {
        match self {
            MutationOutcome::Done { message, refreshed } => {
                form.succeed(message);
                list.apply(refreshed);
            }
            MutationOutcome::Failed(e) => form.fail(e.message),
        }
    }

    /// Apply a delete outcome. The form is only cleared when it was editing
    /// the entity that is now gone.
    pub fn apply_delete<F>(self, deleted_id: i64, form: &mut FormState<F>, list: &mut EntityList<R>)
    where
        F: Default,
    {
        match self {
            MutationOutcome::Done { message, refreshed } => {
                if form.editing_id == Some(deleted_id) {
                    form.reset();
                }
                form.succeed_keep(message);
                list.apply(refreshed);
            }
            MutationOutcome::Failed(e) => form.fail(e.message),
        }
    }
}

pub(crate) async fn save_and_refresh<R: Resource>(
    client: &ApiClient,
    prepared: PreparedSave<R>,
) -> MutationOutcome<R> {
    let owner = prepared.entity.owner().to_string();
    match client.save(&prepared.entity, prepared.file.as_ref()).await {
        Ok(message) => {
            info!(kind = R::NOUN, owner = %owner, id = ?prepared.entity.id(), "saved");
            let refreshed = refresh::<R>(client, &owner).await;
            MutationOutcome::Done { message, refreshed }
        }
        Err(e) => MutationOutcome::Failed(e),
    }
}

pub(crate) async fn delete_and_refresh<R: Resource>(
    client: &ApiClient,
    owner: &str,
    id: i64,
) -> MutationOutcome<R> {
    match client.delete::<R>(owner, id).await {
        Ok(message) => {
            info!(kind = R::NOUN, owner = %owner, id, "deleted");
            let refreshed = refresh::<R>(client, owner).await;
            MutationOutcome::Done { message, refreshed }
        }
        Err(e) => MutationOutcome::Failed(e),
    }
}

use crate::api::{ApiClient, Resource};
use crate::crud::{delete_and_refresh, prepare_save, save_and_refresh};
use crate::forms::{EditFields, FormState};
use crate::refresh::{refresh, EntityList};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Reactive state for one owner-scoped collection panel: the list on screen
/// plus the add/edit form feeding it.
pub(crate) struct Collection<F, R>
where
    F: EditFields<Entity = R> + Send + Sync + 'static,
    R: Resource + Send + Sync + 'static,
{
    pub owner: StoredValue<String>,
    pub list: RwSignal<EntityList<R>>,
    pub form: RwSignal<FormState<F>>,
}

impl<F, R> Clone for Collection<F, R>
where
    F: EditFields<Entity = R> + Send + Sync + 'static,
    R: Resource + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<F, R> Copy for Collection<F, R>
where
    F: EditFields<Entity = R> + Send + Sync + 'static,
    R: Resource + Send + Sync + 'static,
{
}

impl<F, R> Collection<F, R>
where
    F: EditFields<Entity = R> + Send + Sync + 'static,
    R: Resource + Send + Sync + 'static,
{
    pub fn new(owner: &str) -> Self {
        Self {
            owner: StoredValue::new(owner.to_string()),
            list: RwSignal::new(EntityList::new()),
            form: RwSignal::new(FormState::new()),
        }
    }

    pub fn load(self, client: ApiClient) {
        let owner = self.owner.get_value();
        self.list.update(|l| l.loading = true);
        spawn_local(async move {
            let result = refresh::<R>(&client, &owner).await;
            self.list.update(|l| l.apply(result));
        });
    }

    /// Create or update from the form; a no-op while a submission is in
    /// flight or when validation fails.
    pub fn submit(self, client: ApiClient) {
        let owner = self.owner.get_value();
        let mut prepared = None;
        self.form.update(|f| prepared = prepare_save(f, &owner));
        let Some(prepared) = prepared else {
            return;
        };

        spawn_local(async move {
            let outcome = save_and_refresh(&client, prepared).await;
            self.list
                .update(|l| self.form.update(|f| outcome.apply_save(f, l)));
        });
    }

    pub fn remove(self, client: ApiClient, id: i64) {
        let owner = self.owner.get_value();
        if !self.form.try_update(|f| f.begin_submit()).unwrap_or(false) {
            return;
        }

        spawn_local(async move {
            let outcome = delete_and_refresh::<R>(&client, &owner, id).await;
            self.list
                .update(|l| self.form.update(|f| outcome.apply_delete(id, f, l)));
        });
    }

    /// Both are no-ops while a save or delete is in flight.
    pub fn edit(self, entity: &R) {
        self.form.update(|f| {
            f.load_for_edit(entity);
        });
    }

    pub fn cancel_edit(self) {
        self.form.update(|f| {
            f.cancel_edit();
        });
    }

    /// Update the form's field record in place.
    pub fn set(self, change: impl FnOnce(&mut F)) {
        self.form.update(|f| change(&mut f.fields));
    }
}

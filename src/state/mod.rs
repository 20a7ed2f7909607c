use crate::api::ApiClient;
use crate::session::{sign_in, sign_out, BrowserSessionStore, Session, SessionStore};
use leptos::prelude::*;

mod collection;

pub(crate) use collection::Collection;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,

    /// Mirrors the persisted session; `None` means signed out.
    pub session: RwSignal<Option<Session>>,
}

impl AppState {
    pub fn new() -> Self {
        let stored_session = BrowserSessionStore.load();

        Self {
            api_client: RwSignal::new(ApiClient::from_env()),
            session: RwSignal::new(stored_session),
        }
    }

    pub fn begin_session(&self, user_id: &str) {
        let session = sign_in(&BrowserSessionStore, Session::start(user_id));
        self.session.set(Some(session));
    }

    pub fn end_session(&self) {
        sign_out(&BrowserSessionStore);
        self.session.set(None);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);

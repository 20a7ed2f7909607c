//! Who is logged in, and whether the dashboard may be shown.
//!
//! A session is created by a successful login, persisted under one
//! `localStorage` key so reloads keep the user signed in, and cleared on
//! logout.

use crate::storage::{load_json_from_storage, remove_from_storage, save_json_to_storage};
use crate::util::now_ms;
use serde::{Deserialize, Serialize};
#[cfg(test)]
use std::cell::RefCell;
use tracing::info;

pub(crate) const SESSION_KEY: &str = "portfolio_session";

/// Query value the entry page understands after a refused dashboard visit.
pub(crate) const LOGIN_REQUIRED_NOTICE: &str = "login-required";
pub(crate) const LOGIN_REQUIRED_MESSAGE: &str = "Login to access dashboard...";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Session {
    pub user_id: String,
    pub logged_in_at_ms: i64,
}

impl Session {
    pub fn new(user_id: impl Into<String>, logged_in_at_ms: i64) -> Self {
        Self {
            user_id: user_id.into().trim().to_string(),
            logged_in_at_ms,
        }
    }

    /// A session stamped with the browser clock.
    pub fn start(user_id: &str) -> Self {
        Self::new(user_id, now_ms())
    }
}

pub(crate) trait SessionStore {
    fn load(&self) -> Option<Session>;
    fn save(&self, session: &Session);
    fn clear(&self);
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserSessionStore;

impl SessionStore for BrowserSessionStore {
    fn load(&self) -> Option<Session> {
        load_json_from_storage(SESSION_KEY)
    }

    fn save(&self, session: &Session) {
        save_json_to_storage(SESSION_KEY, session);
    }

    fn clear(&self) {
        remove_from_storage(SESSION_KEY);
    }
}

/// In-process store for native test runs, where `localStorage` is absent.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemorySessionStore {
    slot: RefCell<Option<Session>>,
}

#[cfg(test)]
impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.slot.borrow().clone()
    }

    fn save(&self, session: &Session) {
        *self.slot.borrow_mut() = Some(session.clone());
    }

    fn clear(&self) {
        self.slot.borrow_mut().take();
    }
}

pub(crate) fn sign_in(store: &impl SessionStore, session: Session) -> Session {
    info!(user_id = %session.user_id, "session started");
    store.save(&session);
    session
}

pub(crate) fn sign_out(store: &impl SessionStore) {
    if let Some(s) = store.load() {
        info!(user_id = %s.user_id, "session ended");
    }
    store.clear();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum GateDecision {
    Allow { user_id: String },
    Redirect { to: String },
}

pub(crate) fn login_required_path() -> String {
    format!("/?notice={LOGIN_REQUIRED_NOTICE}")
}

/// The dashboard is reachable only with a session naming a user.
pub(crate) fn gate(session: Option<&Session>) -> GateDecision {
    match session {
        Some(s) if !s.user_id.is_empty() => GateDecision::Allow {
            user_id: s.user_id.clone(),
        },
        _ => GateDecision::Redirect {
            to: login_required_path(),
        },
    }
}

/// Text for a `?notice=` value on the entry page.
pub(crate) fn notice_message(notice: &str) -> Option<&'static str> {
    match notice {
        LOGIN_REQUIRED_NOTICE => Some(LOGIN_REQUIRED_MESSAGE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_without_session_redirects_with_notice() {
        assert_eq!(
            gate(None),
            GateDecision::Redirect {
                to: "/?notice=login-required".to_string()
            }
        );
    }

    #[test]
    fn test_gate_rejects_blank_user() {
        let s = Session::new("   ", 1);
        assert!(matches!(gate(Some(&s)), GateDecision::Redirect { .. }));
    }

    #[test]
    fn test_gate_allows_session_user() {
        let s = Session::new("12345678", 1_700_000_000_000);
        assert_eq!(
            gate(Some(&s)),
            GateDecision::Allow {
                user_id: "12345678".to_string()
            }
        );
    }

    #[test]
    fn test_sign_in_then_out() {
        let store = MemorySessionStore::default();
        assert!(store.load().is_none());

        sign_in(&store, Session::new("12345678", 5));
        assert_eq!(store.load().map(|s| s.user_id), Some("12345678".to_string()));

        sign_out(&store);
        assert!(store.load().is_none());
        assert!(matches!(gate(store.load().as_ref()), GateDecision::Redirect { .. }));
    }

    #[test]
    fn test_notice_message() {
        assert_eq!(notice_message("login-required"), Some(LOGIN_REQUIRED_MESSAGE));
        assert_eq!(notice_message("other"), None);
    }

    #[test]
    fn test_session_json_shape() {
        let v = serde_json::to_value(Session::new("12345678", 42)).expect("serialize");
        assert_eq!(v["userId"], "12345678");
        assert_eq!(v["loggedInAtMs"], 42);
    }
}

use crate::api::{ApiClient, ApiResult, Resource};
use tracing::{debug, warn};

/// The collection currently on screen for one owner.
///
/// Always the full server response: a successful fetch replaces it wholesale,
/// a failed fetch leaves the previous items visible.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EntityList<T> {
    pub items: Vec<T>,
    /// Fetches applied so far, successful or not.
    pub refreshes: u64,
    pub last_error: Option<String>,
    pub loading: bool,
}

impl<T> Default for EntityList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            refreshes: 0,
            last_error: None,
            loading: false,
        }
    }
}

impl<T> EntityList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, result: ApiResult<Vec<T>>) {
        self.refreshes += 1;
        self.loading = false;
        match result {
            Ok(items) => {
                debug!(count = items.len(), "list refreshed");
                self.items = items;
                self.last_error = None;
            }
            Err(e) => {
                warn!(
                    error = %e,
                    kind = ?e.kind,
                    status = ?e.status,
                    kept = self.items.len(),
                    "list refresh failed; keeping previous items"
                );
                self.last_error = Some(e.message);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Fetch the owner's collection.
pub(crate) async fn refresh<R: Resource>(client: &ApiClient, owner: &str) -> ApiResult<Vec<R>> {
    client.list::<R>(owner).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind};

    fn err() -> ApiError {
        ApiError {
            kind: ApiErrorKind::Network,
            status: None,
            message: "down".to_string(),
        }
    }

    #[test]
    fn test_apply_replaces_unconditionally() {
        let mut list = EntityList::new();
        list.apply(Ok(vec![1, 2, 3]));
        list.apply(Ok(vec![9]));
        assert_eq!(list.items, vec![9]);
        assert_eq!(list.refreshes, 2);
    }

    #[test]
    fn test_failed_refresh_keeps_stale_items() {
        let mut list = EntityList::new();
        list.apply(Ok(vec!["a", "b"]));
        list.apply(Err(err()));
        assert_eq!(list.items, vec!["a", "b"]);
        assert_eq!(list.last_error.as_deref(), Some("down"));
        list.apply(Ok(vec![]));
        assert!(list.is_empty());
        assert!(list.last_error.is_none());
    }
}

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Result of a confirmation attempt. The HTTP layer maps `AlreadyUploaded`
/// and `NotCreated` to client errors; the other two are successes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Pending asset moved to the confirmed set.
    Confirmed,
    AlreadyUploaded,
    NotCreated,
    /// Asset is still pending; the submitted status was acknowledged
    /// without changing state (e.g. an "uploading" progress report).
    StatusNoted(String),
}

#[derive(Default)]
struct RegistryState {
    /// Pending assets, keyed by id, holding the upload URL issued at creation.
    pending: HashMap<String, String>,
    confirmed: HashSet<String>,
}

/// In-memory asset lifecycle tracker. An id lives in at most one of the two
/// collections; both sit behind a single lock so a transition is atomic with
/// respect to concurrent confirms of the same id. State is process-lifetime
/// only and starts empty.
#[derive(Default)]
pub struct AssetRegistry {
    state: Mutex<RegistryState>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a freshly created asset as pending. Ids are UUIDs minted by
    /// the caller, so a collision with an existing entry is not expected.
    pub fn insert_pending(&self, id: String, upload_url: String) {
        let mut state = self.state.lock().unwrap();
        state.pending.insert(id, upload_url);
    }

    /// Applies a confirmation report to the asset. Only `status == "uploaded"`
    /// against a pending id transitions state; a confirmed asset is never
    /// mutated again.
    pub fn confirm(&self, id: &str, status: &str) -> ConfirmOutcome {
        let mut state = self.state.lock().unwrap();
        if status == "uploaded" && state.pending.contains_key(id) {
            state.pending.remove(id);
            state.confirmed.insert(id.to_string());
            ConfirmOutcome::Confirmed
        } else if state.confirmed.contains(id) {
            ConfirmOutcome::AlreadyUploaded
        } else if !state.pending.contains_key(id) {
            ConfirmOutcome::NotCreated
        } else {
            ConfirmOutcome::StatusNoted(status.to_string())
        }
    }

    /// Only confirmed assets may be read back.
    pub fn is_confirmed(&self, id: &str) -> bool {
        self.state.lock().unwrap().confirmed.contains(id)
    }

    pub fn pending_count(&self) -> usize {
        self.state.lock().unwrap().pending.len()
    }

    pub fn confirmed_count(&self) -> usize {
        self.state.lock().unwrap().confirmed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uploaded_status_moves_pending_to_confirmed() {
        let registry = AssetRegistry::new();
        registry.insert_pending("11".into(), "someurl".into());

        let outcome = registry.confirm("11", "uploaded");

        assert_eq!(outcome, ConfirmOutcome::Confirmed);
        assert!(registry.is_confirmed("11"));
        assert_eq!(registry.pending_count(), 0);
        assert_eq!(registry.confirmed_count(), 1);
    }

    #[test]
    fn second_uploaded_confirm_reports_already_uploaded() {
        let registry = AssetRegistry::new();
        registry.insert_pending("a".into(), "url".into());

        assert_eq!(registry.confirm("a", "uploaded"), ConfirmOutcome::Confirmed);
        assert_eq!(
            registry.confirm("a", "uploaded"),
            ConfirmOutcome::AlreadyUploaded
        );
        // Still confirmed, transition happened exactly once.
        assert!(registry.is_confirmed("a"));
        assert_eq!(registry.confirmed_count(), 1);
    }

    #[test]
    fn unknown_id_reports_not_created() {
        let registry = AssetRegistry::new();
        assert_eq!(
            registry.confirm("missing", "uploaded"),
            ConfirmOutcome::NotCreated
        );
        assert!(!registry.is_confirmed("missing"));
    }

    #[test]
    fn other_status_on_pending_asset_is_a_no_op_ack() {
        let registry = AssetRegistry::new();
        registry.insert_pending("b".into(), "url".into());

        let outcome = registry.confirm("b", "uploading");

        assert_eq!(outcome, ConfirmOutcome::StatusNoted("uploading".into()));
        assert!(!registry.is_confirmed("b"));
        assert_eq!(registry.pending_count(), 1);

        // The asset can still be confirmed afterwards.
        assert_eq!(registry.confirm("b", "uploaded"), ConfirmOutcome::Confirmed);
    }

    #[test]
    fn non_uploaded_status_on_confirmed_asset_still_rejects() {
        let registry = AssetRegistry::new();
        registry.insert_pending("c".into(), "url".into());
        registry.confirm("c", "uploaded");

        assert_eq!(
            registry.confirm("c", "uploading"),
            ConfirmOutcome::AlreadyUploaded
        );
    }
}

//! Source Controller
//!
//! View-state for one source row: the editable path, its derived flags and
//! the update/delete requests.

use std::fmt;
use std::rc::Rc;

use leptos::prelude::*;

use crate::api::SourceApi;
use crate::models::{Source, SourceBody, SourceId};
use crate::notify::ErrorReporter;

/// One source row.
///
/// Cloning yields another handle to the same signals.
#[derive(Clone)]
pub struct SourceController {
    id: SourceId,
    name: String,
    owner: Owner,
    /// Draft path bound to the input field
    path: RwSignal<String>,
    /// Last path confirmed by the server
    remote_path: ReadSignal<String>,
    set_remote_path: WriteSignal<String>,
    submitting: ReadSignal<bool>,
    set_submitting: WriteSignal<bool>,
    modified: Memo<bool>,
    can_submit_path: Memo<bool>,
    api: Rc<dyn SourceApi>,
    report_error: ErrorReporter,
    on_removed: Callback<SourceId>,
}

impl SourceController {
    pub fn new(
        source: Source,
        api: Rc<dyn SourceApi>,
        report_error: ErrorReporter,
        on_removed: Callback<SourceId>,
    ) -> Self {
        // Row signals live under their own owner so removal can dispose them
        let owner = Owner::new();
        let (path, remote, submitting, modified, can_submit_path) = owner.with(|| {
            let path = RwSignal::new(source.path.clone());
            let (remote_path, set_remote_path) = signal(source.path);
            let modified =
                Memo::new(move |_| path.with(|draft| remote_path.with(|remote| draft != remote)));
            let can_submit_path =
                Memo::new(move |_| modified.get() && path.with(|draft| !draft.trim().is_empty()));
            (path, (remote_path, set_remote_path), signal(false), modified, can_submit_path)
        });

        Self {
            id: source.id,
            name: source.name,
            owner,
            path,
            remote_path: remote.0,
            set_remote_path: remote.1,
            submitting: submitting.0,
            set_submitting: submitting.1,
            modified,
            can_submit_path,
            api,
            report_error,
            on_removed,
        }
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Draft path (read-write)
    pub fn path(&self) -> RwSignal<String> {
        self.path
    }

    pub fn remote_path(&self) -> ReadSignal<String> {
        self.remote_path
    }

    /// Draft differs from the confirmed path
    pub fn modified(&self) -> Memo<bool> {
        self.modified
    }

    /// Modified and the trimmed draft is non-empty
    pub fn can_submit_path(&self) -> Memo<bool> {
        self.can_submit_path
    }

    pub fn is_submitting(&self) -> ReadSignal<bool> {
        self.submitting
    }

    /// Discard the draft
    pub fn reset_path(&self) {
        self.path.set(self.remote_path.get_untracked());
    }

    /// Send the trimmed draft path. On failure the draft is kept for retry.
    pub async fn submit_path(&self) {
        self.set_submitting.set(true);
        let body = SourceBody::trimmed(&self.name, &self.path.get_untracked());

        match self.api.update(self.id, &body).await {
            Ok(()) => {
                log::info!("[Sources] Updated path of {} to {}", self.name, body.path);
                self.set_remote_path.set(body.path.clone());
                self.path.set(body.path);
            }
            Err(e) => {
                log::error!("[Sources] Failed to update {}: {}", self.name, e);
                self.report_error.run(e.to_string());
            }
        }
        self.set_submitting.set(false);
    }

    /// Delete this source and notify the owner once the server confirms.
    /// The owner may dispose this row from the callback, so `submitting`
    /// is cleared first.
    pub async fn remove(&self) {
        self.set_submitting.set(true);
        let result = self.api.delete(self.id).await;
        self.set_submitting.set(false);

        match result {
            Ok(()) => {
                log::info!("[Sources] Removed {} (#{})", self.name, self.id);
                self.on_removed.run(self.id);
            }
            Err(e) => {
                log::error!("[Sources] Failed to remove {}: {}", self.name, e);
                self.report_error.run(e.to_string());
            }
        }
    }

    /// Drop the row's signals and memos
    pub(crate) fn dispose(&self) {
        self.owner.cleanup();
    }
}

impl fmt::Debug for SourceController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceController")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("path", &self.path.try_get_untracked())
            .field("remote_path", &self.remote_path.try_get_untracked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::api::fake::{Call, FakeApi};

    struct Fixture {
        _owner: Owner,
        api: Rc<FakeApi>,
        errors: RwSignal<Vec<String>>,
        removed: RwSignal<Vec<SourceId>>,
        source: SourceController,
    }

    fn fixture(path: &str) -> Fixture {
        let owner = Owner::new();
        owner.set();

        let record = Source { id: 1, name: "docs".into(), path: path.into() };
        let api = Rc::new(FakeApi::with_sources(vec![record.clone()]));
        let errors = RwSignal::new(Vec::<String>::new());
        let removed = RwSignal::new(Vec::<SourceId>::new());
        let source = SourceController::new(
            record,
            api.clone(),
            Callback::new(move |message: String| errors.write().push(message)),
            Callback::new(move |id: SourceId| removed.write().push(id)),
        );
        Fixture { _owner: owner, api, errors, removed, source }
    }

    #[test]
    fn test_initial_state() {
        let f = fixture("/x");
        assert_eq!(f.source.path().get_untracked(), "/x");
        assert!(!f.source.modified().get_untracked());
        assert!(!f.source.can_submit_path().get_untracked());
        assert!(!f.source.is_submitting().get_untracked());
    }

    #[test]
    fn test_flags_follow_draft() {
        let f = fixture("/x");

        f.source.path().set("/y".into());
        assert!(f.source.modified().get_untracked());
        assert!(f.source.can_submit_path().get_untracked());

        // Whitespace-only drafts are modified but not submittable
        f.source.path().set("   ".into());
        assert!(f.source.modified().get_untracked());
        assert!(!f.source.can_submit_path().get_untracked());

        f.source.path().set("/x".into());
        assert!(!f.source.modified().get_untracked());
        assert!(!f.source.can_submit_path().get_untracked());
    }

    #[test]
    fn test_reset_path() {
        let f = fixture("/x");
        f.source.path().set("/y".into());
        f.source.reset_path();
        assert_eq!(f.source.path().get_untracked(), "/x");
        assert!(!f.source.modified().get_untracked());
    }

    #[tokio::test]
    async fn test_submit_path_success() {
        let f = fixture("/x");
        f.source.path().set("  /y  ".into());

        f.source.submit_path().await;

        assert_eq!(f.source.path().get_untracked(), "/y");
        assert_eq!(f.source.remote_path().get_untracked(), "/y");
        assert!(!f.source.modified().get_untracked());
        assert!(!f.source.is_submitting().get_untracked());
        assert_eq!(
            f.api.calls(),
            vec![Call::Update(1, SourceBody { name: "docs".into(), path: "/y".into() })]
        );
        assert!(f.errors.get_untracked().is_empty());
    }

    #[tokio::test]
    async fn test_submit_path_failure_keeps_draft() {
        let f = fixture("/x");
        f.source.path().set("/y".into());
        assert!(f.source.modified().get_untracked());
        assert!(f.source.can_submit_path().get_untracked());

        f.api.fail_next("disk not found");
        f.source.submit_path().await;

        assert_eq!(f.source.path().get_untracked(), "/y");
        assert_eq!(f.source.remote_path().get_untracked(), "/x");
        assert!(f.source.modified().get_untracked());
        assert!(!f.source.is_submitting().get_untracked());
        assert_eq!(f.errors.get_untracked(), vec!["disk not found".to_string()]);
    }

    #[tokio::test]
    async fn test_submitting_while_update_in_flight() {
        let f = fixture("/x");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let submitting = f.source.is_submitting();
        let record = seen.clone();
        f.api.on_request(move || record.borrow_mut().push(submitting.get_untracked()));

        f.source.path().set("/y".into());
        f.source.submit_path().await;
        f.api.fail_next("busy");
        f.source.submit_path().await;

        assert_eq!(*seen.borrow(), vec![true, true]);
        assert!(!f.source.is_submitting().get_untracked());
    }

    #[tokio::test]
    async fn test_submitting_while_delete_in_flight() {
        let f = fixture("/x");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let submitting = f.source.is_submitting();
        let record = seen.clone();
        f.api.on_request(move || record.borrow_mut().push(submitting.get_untracked()));

        f.api.fail_next("busy");
        f.source.remove().await;
        f.source.remove().await;

        assert_eq!(*seen.borrow(), vec![true, true]);
        assert!(!f.source.is_submitting().get_untracked());
    }

    #[test]
    fn test_dispose_releases_signals() {
        let f = fixture("/x");
        assert!(!f.source.path().is_disposed());

        f.source.dispose();

        assert!(f.source.path().is_disposed());
        assert!(f.source.is_submitting().is_disposed());
    }

    #[tokio::test]
    async fn test_remove_success_notifies_owner() {
        let f = fixture("/x");

        f.source.remove().await;

        assert_eq!(f.removed.get_untracked(), vec![1]);
        assert_eq!(f.api.calls(), vec![Call::Delete(1)]);
        assert!(f.api.sources.borrow().is_empty());
        assert!(!f.source.is_submitting().get_untracked());
    }

    #[tokio::test]
    async fn test_remove_failure_reports_error() {
        let f = fixture("/x");
        f.api.fail_next("busy");

        f.source.remove().await;

        assert!(f.removed.get_untracked().is_empty());
        assert_eq!(f.errors.get_untracked(), vec!["busy".to_string()]);
        assert!(!f.source.is_submitting().get_untracked());
    }
}

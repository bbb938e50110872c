//! Sources Store
//!
//! Owns the list of source controllers and the "add source" form. The form
//! draft uses Leptos reactive_stores for field-level reactivity.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::api::{ApiResult, SourceApi};
use crate::models::{Source, SourceBody, SourceId};
use crate::notify::ErrorReporter;
use crate::source::SourceController;

/// Unsaved "add source" form
#[derive(Clone, Debug, Default, Store)]
pub struct AddSourceDraft {
    pub name: String,
    pub path: String,
}

/// Type alias for the form store
pub type DraftStore = Store<AddSourceDraft>;

/// The sources screen state
#[derive(Clone)]
pub struct SourcesStore {
    /// Parent of every row's owner
    owner: Owner,
    sources: ReadSignal<Vec<SourceController>, LocalStorage>,
    set_sources: WriteSignal<Vec<SourceController>, LocalStorage>,
    draft: DraftStore,
    submitting: ReadSignal<bool>,
    set_submitting: WriteSignal<bool>,
    is_added_name_duplicated: Memo<bool>,
    can_add: Memo<bool>,
    api: Rc<dyn SourceApi>,
    report_error: ErrorReporter,
    on_removed: Callback<SourceId>,
}

impl SourcesStore {
    /// Fetch the source list. Errors propagate; nothing is built on failure.
    pub async fn load(api: Rc<dyn SourceApi>, report_error: ErrorReporter) -> ApiResult<Self> {
        let records = api.list().await?;
        log::info!("[Sources] Loaded {} sources", records.len());
        Ok(Self::from_records(records, api, report_error))
    }

    fn from_records(records: Vec<Source>, api: Rc<dyn SourceApi>, report_error: ErrorReporter) -> Self {
        let owner = Owner::new();
        let (sources, set_sources) = signal_local(Vec::<SourceController>::new());
        let on_removed = Callback::new(move |id: SourceId| store_remove_source(set_sources, id));

        set_sources.set(owner.with(|| {
            records
                .into_iter()
                .map(|record| SourceController::new(record, api.clone(), report_error, on_removed))
                .collect()
        }));

        let draft = Store::new(AddSourceDraft::default());
        let is_added_name_duplicated = Memo::new(move |_| {
            let name = draft.name().get();
            let name = name.trim();
            sources.with(|list| list.iter().any(|source| source.name() == name))
        });
        let can_add = Memo::new(move |_| {
            !is_added_name_duplicated.get()
                && !draft.name().get().trim().is_empty()
                && !draft.path().get().trim().is_empty()
        });

        let (submitting, set_submitting) = signal(false);

        Self {
            owner,
            sources,
            set_sources,
            draft,
            submitting,
            set_submitting,
            is_added_name_duplicated,
            can_add,
            api,
            report_error,
            on_removed,
        }
    }

    /// Live, read-only view of the source rows
    pub fn sources(&self) -> ReadSignal<Vec<SourceController>, LocalStorage> {
        self.sources
    }

    pub fn find(&self, id: SourceId) -> Option<SourceController> {
        self.sources
            .with_untracked(|list| list.iter().find(|source| source.id() == id).cloned())
    }

    /// Add-form draft (read-write per field)
    pub fn draft(&self) -> DraftStore {
        self.draft
    }

    pub fn set_added_name(&self, name: impl Into<String>) {
        *self.draft.name().write() = name.into();
    }

    pub fn set_added_path(&self, path: impl Into<String>) {
        *self.draft.path().write() = path.into();
    }

    /// Trimmed draft name matches an existing source
    pub fn is_added_name_duplicated(&self) -> Memo<bool> {
        self.is_added_name_duplicated
    }

    /// Name is unique and both trimmed fields are non-empty
    pub fn can_add(&self) -> Memo<bool> {
        self.can_add
    }

    pub fn is_submitting(&self) -> ReadSignal<bool> {
        self.submitting
    }

    pub fn clear_draft(&self) {
        self.set_added_name(String::new());
        self.set_added_path(String::new());
    }

    /// Create a source from the trimmed draft. Callers check
    /// [`can_add`](Self::can_add) first.
    pub async fn add_source(&self) {
        self.set_submitting.set(true);
        let body = SourceBody::trimmed(
            &self.draft.name().get_untracked(),
            &self.draft.path().get_untracked(),
        );

        match self.api.create(&body).await {
            Ok(id) => {
                log::info!("[Sources] Created {} (#{}) at {}", body.name, id, body.path);
                self.clear_draft();
                let source = self.owner.with(|| {
                    SourceController::new(
                        Source { id, name: body.name, path: body.path },
                        self.api.clone(),
                        self.report_error,
                        self.on_removed,
                    )
                });
                self.set_sources.update(|list| list.push(source));
            }
            Err(e) => {
                log::error!("[Sources] Failed to create {}: {}", body.name, e);
                self.report_error.run(e.to_string());
            }
        }
        self.set_submitting.set(false);
    }
}

/// Remove a source row by ID and dispose its signals
fn store_remove_source(sources: WriteSignal<Vec<SourceController>, LocalStorage>, id: SourceId) {
    let mut removed = None;
    sources.update(|list| {
        if let Some(index) = list.iter().position(|source| source.id() == id) {
            removed = Some(list.remove(index));
        }
    });
    if let Some(source) = removed {
        source.dispose();
    }
}

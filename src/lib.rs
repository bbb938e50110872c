//! Sources Screen State
//!
//! Reactive view-state for listing, adding, editing and deleting sources
//! (name/path pairs) backed by the `/api/bases` endpoints.
//!
//! Logging goes through the `log` facade. Nothing is printed until the host
//! installs a logger, e.g. [`init_console_logger`] for the browser console.

pub mod api;
pub mod config;
pub mod context;
pub mod logging;
pub mod models;
pub mod notify;
pub mod source;
pub mod store;

pub use api::{ApiError, ApiResult, HttpSourceApi, SourceApi};
pub use config::ApiConfig;
pub use context::{provide_sources_store, use_sources_store};
pub use logging::init_console_logger;
pub use models::{Source, SourceBody, SourceId};
pub use notify::{log_reporter, ErrorReporter, Toast, ToastQueue};
pub use source::SourceController;
pub use store::{AddSourceDraft, AddSourceDraftStoreFields, DraftStore, SourcesStore};

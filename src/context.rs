//! Application Context
//!
//! Shares the sources store with the component tree via the Leptos
//! Context API. The store holds a non-`Send` API handle, so it is kept in
//! thread-local storage.

use leptos::prelude::*;

use crate::store::SourcesStore;

type StoredSources = StoredValue<SourcesStore, LocalStorage>;

/// Provide the loaded store to all children
pub fn provide_sources_store(store: SourcesStore) {
    provide_context::<StoredSources>(StoredValue::new_local(store));
}

/// Get the sources store from context
pub fn use_sources_store() -> SourcesStore {
    expect_context::<StoredSources>().get_value()
}

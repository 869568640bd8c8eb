//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::Category;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Tour categories, kept in display order
    pub categories: Vec<Category>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

/// Replace the displayed category order wholesale. Only ever called with
/// an authoritative fetch; the local list is a cache, not a second truth.
pub fn store_set_categories(store: &AppStore, categories: Vec<Category>) {
    store.categories().set(categories);
}

//! Category Commands
//!
//! Frontend bindings for the category endpoints of the content API.

use async_trait::async_trait;

use leptos_reorder::{OrderedStore, StoreError};

use crate::models::Category;

/// Base path of the content API; override at build time.
const API_BASE: &str = match option_env!("MERIDIAN_API_BASE") {
    Some(base) => base,
    None => "/api/admin",
};

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Fetch all tour categories. Order is whatever the API returns; callers
/// sort by position before display.
pub async fn list_categories() -> Result<Vec<Category>, String> {
    let response = client()
        .get(format!("{API_BASE}/categories"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    response
        .error_for_status()
        .map_err(|e| e.to_string())?
        .json::<Vec<Category>>()
        .await
        .map_err(|e| e.to_string())
}

/// Persist one category. The full record goes over the wire; the API has
/// no partial-field update.
pub async fn update_category(category: &Category) -> Result<Category, String> {
    let response = client()
        .put(format!("{API_BASE}/categories/{}", category.id))
        .json(category)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    response
        .error_for_status()
        .map_err(|e| e.to_string())?
        .json::<Category>()
        .await
        .map_err(|e| e.to_string())
}

/// [`OrderedStore`] adapter over the category endpoints.
#[derive(Clone, Copy, Default)]
pub struct CategoryStore;

impl CategoryStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl OrderedStore<Category> for CategoryStore {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        list_categories().await.map_err(StoreError)
    }

    async fn update(&self, record: &Category) -> Result<(), StoreError> {
        update_category(record).await.map(|_| ()).map_err(StoreError)
    }
}

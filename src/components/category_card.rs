//! Category Card Component
//!
//! A single tour category on the reorder board.

use leptos::prelude::*;

use crate::models::Category;

#[component]
pub fn CategoryCard(category: Category) -> impl IntoView {
    let active = category.active;
    let summary = category.summary.unwrap_or_default();

    view! {
        <div class=if active { "category-card" } else { "category-card inactive" }>
            {category.image.map(|src| view! {
                <img class="category-thumb" src=src alt="" />
            })}
            <div class="category-body">
                <span class="category-name">{category.name}</span>
                {(!summary.is_empty()).then(|| view! {
                    <p class="category-summary">{summary}</p>
                })}
                {(!active).then(|| view! {
                    <span class="category-badge">"hidden"</span>
                })}
            </div>
        </div>
    }
}

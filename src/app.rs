//! Meridian Admin Frontend App
//!
//! Shell for the tour content back office.

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_reorder::sort_by_position;
use reactive_stores::Store;

use crate::commands;
use crate::components::CategoryBoard;
use crate::context::AppContext;
use crate::store::{store_set_categories, AppState};

#[component]
pub fn App() -> impl IntoView {
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    let store = Store::new(AppState::default());
    provide_context(store);
    provide_context(AppContext::new((reload_trigger, set_reload_trigger)));

    // Load categories on mount and whenever the trigger changes
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        spawn_local(async move {
            match commands::list_categories().await {
                Ok(loaded) => {
                    web_sys::console::log_1(
                        &format!("[APP] Loaded {} categories, trigger={}", loaded.len(), trigger)
                            .into(),
                    );
                    store_set_categories(&store, sort_by_position(loaded));
                }
                Err(err) => {
                    web_sys::console::error_1(
                        &format!("[APP] Failed to load categories: {err}").into(),
                    );
                }
            }
        });
    });

    view! {
        <div class="admin-layout">
            <header class="admin-header">
                <h1>"Meridian Tours"</h1>
                <span class="admin-subtitle">"Tour categories"</span>
            </header>

            <main class="main-content">
                <p class="board-hint">"Drag a card onto another to swap their order."</p>
                <CategoryBoard />
            </main>
        </div>
    }
}

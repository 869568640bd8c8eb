//! Category Board Component
//!
//! Reorderable card list for tour categories. The gesture lifecycle lives
//! in leptos-reorder; the drop handler here swaps the two endpoint
//! positions and republishes whatever order the API returns.

use std::time::Duration;

use leptos::prelude::*;
use leptos::task::spawn_local;

use leptos_reorder::signals::{
    apply_with_signals, create_reorder_signals, make_on_dragend, make_on_dragenter,
    make_on_dragleave, make_on_dragover, make_on_dragstart, take_drop,
};
use leptos_reorder::{resolve, SyncController};

use crate::commands::CategoryStore;
use crate::components::CategoryCard;
use crate::context::AppContext;
use crate::store::{store_set_categories, use_app_store, AppStateStoreFields};

/// How long the paired position updates may stay in flight.
const SYNC_TIMEOUT: Duration = Duration::from_secs(10);

#[component]
pub fn CategoryBoard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let sig = create_reorder_signals();

    let categories = move || store.categories().get();

    let board_class = move || {
        if sig.syncing_read.get() {
            "category-board locked"
        } else {
            "category-board"
        }
    };

    view! {
        <div class=board_class>
            // Last sync error, with the manual way out when a reload failed
            {move || sig.error_read.get().map(|err| view! {
                <div class="sync-error">
                    <span class="sync-error-text">{err}</span>
                    <button class="sync-error-reload" on:click=move |_| ctx.reload()>
                        "Reload"
                    </button>
                </div>
            })}

            <For
                each={move || categories().into_iter().enumerate().collect::<Vec<_>>()}
                key=|(index, category)| (*index, category.id, category.position)
                children=move |(index, category)| {
                    let on_dragstart = make_on_dragstart(sig, index);
                    let on_dragenter = make_on_dragenter(sig, index);
                    let on_dragleave = make_on_dragleave(sig);
                    let on_dragover = make_on_dragover();
                    let on_dragend = make_on_dragend(sig);

                    // Visual state
                    let is_dragged = move || sig.machine_read.get().origin() == Some(index);
                    let is_drop_target =
                        move || sig.machine_read.get().hover_target() == Some(index);

                    let slot_class = move || {
                        let mut c = String::from("category-slot");
                        if is_dragged() { c.push_str(" dragging"); }
                        if is_drop_target() { c.push_str(" drop-target"); }
                        c
                    };

                    let on_drop = move |ev: web_sys::DragEvent| {
                        ev.prevent_default();
                        let Some((source, target)) = take_drop(&sig, &ev, index) else {
                            return;
                        };
                        spawn_local(async move {
                            let order = store.categories().get_untracked();
                            let Some(plan) = resolve(Some(source), target, &order) else {
                                return;
                            };
                            web_sys::console::log_1(
                                &format!(
                                    "[REORDER] swapping {} <-> {}",
                                    plan.moved.name, plan.displaced.name
                                )
                                .into(),
                            );
                            let controller =
                                SyncController::with_timeout(CategoryStore::new(), SYNC_TIMEOUT);
                            if let Some(fresh) = apply_with_signals(&controller, sig, plan).await {
                                store_set_categories(&store, fresh);
                            }
                        });
                    };

                    view! {
                        <div
                            class=slot_class
                            draggable="true"
                            on:dragstart=on_dragstart
                            on:dragenter=on_dragenter
                            on:dragleave=on_dragleave
                            on:dragover=on_dragover
                            on:drop=on_drop
                            on:dragend=on_dragend
                        >
                            <CategoryCard category=category />
                        </div>
                    }
                }
            />

            {move || if categories().is_empty() {
                view! { <p class="empty-board">"No categories yet"</p> }.into_any()
            } else {
                view! {
                    <p class="board-count">{format!("{} categories", categories().len())}</p>
                }.into_any()
            }}
        </div>
    }
}

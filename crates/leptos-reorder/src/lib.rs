//! Leptos Reorder
//!
//! Drag-to-reorder engine for position-keyed record lists.
//!
//! Three layers, leaf-first:
//! - [`DragMachine`] tracks one drag gesture from pickup to drop, with no
//!   DOM attached, so the lifecycle is testable on its own
//! - [`resolve`] turns a drop into a [`SwapPlan`]: the two endpoint
//!   records with their positions exchanged
//! - [`SyncController`] pushes the swap to the backing [`OrderedStore`]
//!   and rebuilds the displayed order from an authoritative refetch
//!
//! The [`signals`] module binds the machine to HTML5 drag events for
//! Leptos components.
//!
//! The store is the sole source of truth: every cycle ends by refetching
//! it, win or lose, so the displayed order never drifts from the server.

pub mod drag;
pub mod record;
pub mod resolve;
pub mod signals;
pub mod store;
pub mod sync;

pub use drag::{resolve_origin, DragMachine, DragPhase};
pub use record::{sort_by_position, OrderedRecord};
pub use resolve::{resolve, SwapPlan};
pub use signals::{apply_with_signals, create_reorder_signals, ReorderSignals};
pub use store::{MemoryStore, OrderedStore, StoreError};
pub use sync::{SyncController, SyncError, SyncOutcome};

#[cfg(test)]
pub(crate) mod testutil;

//! Synchronization controller.
//!
//! Owns one reorder cycle: push the swap's two updates concurrently, join
//! both results, then reload the collection from the store so the displayed
//! order is always the server's, win or lose.

use std::cell::Cell;
use std::time::Duration;

use futures::future::{self, Either};
use thiserror::Error;

use crate::record::{sort_by_position, OrderedRecord};
use crate::resolve::SwapPlan;
use crate::store::OrderedStore;

/// Why a reorder cycle failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// One of the paired updates failed; the other may already have
    /// applied, leaving the store's positions transiently non-bijective.
    #[error("failed to update record {id}: {reason}")]
    PartialUpdate { id: String, reason: String },

    /// Both updates failed.
    #[error("failed to update records {moved_id} ({moved_reason}) and {displaced_id} ({displaced_reason})")]
    BothUpdates {
        moved_id: String,
        moved_reason: String,
        displaced_id: String,
        displaced_reason: String,
    },

    /// The update pair did not settle within the configured window.
    #[error("reorder timed out after {0}ms")]
    Timeout(u64),

    /// The post-mutation reload failed. The displayed order stays at its
    /// last known state until the user reloads.
    #[error("failed to reload collection: {0}")]
    Refetch(String),
}

/// Result of one apply cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncOutcome<R> {
    /// Fresh authoritative order, sorted by position. `None` only when
    /// the refetch itself failed.
    pub order: Option<Vec<R>>,
    /// Error to surface, if any.
    pub error: Option<SyncError>,
}

impl<R> SyncOutcome<R> {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.order.is_some()
    }
}

/// Drives swap plans against the store, one cycle at a time.
///
/// There is no retry: a failed cycle surfaces its error and the next
/// gesture starts fresh.
pub struct SyncController<S> {
    store: S,
    timeout: Option<Duration>,
    syncing: Cell<bool>,
}

impl<S> SyncController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            timeout: None,
            syncing: Cell::new(false),
        }
    }

    /// Bound the update pair; expiry surfaces as [`SyncError::Timeout`]
    /// instead of hanging the cycle on a stuck request.
    pub fn with_timeout(store: S, timeout: Duration) -> Self {
        Self {
            store,
            timeout: Some(timeout),
            syncing: Cell::new(false),
        }
    }

    /// Whether a cycle is in flight. Gesture starts are locked out while
    /// this reads true.
    pub fn is_syncing(&self) -> bool {
        self.syncing.get()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one reorder cycle.
    ///
    /// The two updates go out together and both are awaited. The
    /// collection is then refetched regardless of how they landed, so the
    /// outcome's order (when present) is exactly the store's — including
    /// a half-applied swap, which is displayed as-is rather than patched
    /// up client-side.
    pub async fn apply<R>(&self, plan: &SwapPlan<R>) -> SyncOutcome<R>
    where
        R: OrderedRecord,
        S: OrderedStore<R>,
    {
        self.syncing.set(true);
        let outcome = self.run(plan).await;
        self.syncing.set(false);
        outcome
    }

    async fn run<R>(&self, plan: &SwapPlan<R>) -> SyncOutcome<R>
    where
        R: OrderedRecord,
        S: OrderedStore<R>,
    {
        let update_error = self.push_updates(plan).await.err();

        match self.store.list().await {
            Ok(records) => SyncOutcome {
                order: Some(sort_by_position(records)),
                error: update_error,
            },
            Err(err) => {
                if let Some(update_error) = update_error {
                    leptos::logging::warn!(
                        "reorder: update error superseded by refetch failure: {update_error}"
                    );
                }
                SyncOutcome {
                    order: None,
                    error: Some(SyncError::Refetch(err.0)),
                }
            }
        }
    }

    async fn push_updates<R>(&self, plan: &SwapPlan<R>) -> Result<(), SyncError>
    where
        R: OrderedRecord,
        S: OrderedStore<R>,
    {
        let updates = future::join(
            self.store.update(&plan.moved),
            self.store.update(&plan.displaced),
        );
        futures::pin_mut!(updates);

        let (moved, displaced) = match self.timeout {
            Some(window) => {
                let deadline = sleep(window);
                futures::pin_mut!(deadline);
                match future::select(updates, deadline).await {
                    Either::Left((settled, _)) => settled,
                    Either::Right(((), _)) => {
                        return Err(SyncError::Timeout(window.as_millis() as u64));
                    }
                }
            }
            None => updates.await,
        };

        match (moved, displaced) {
            (Ok(()), Ok(())) => Ok(()),
            (Err(err), Ok(())) => Err(SyncError::PartialUpdate {
                id: plan.moved.id().to_string(),
                reason: err.0,
            }),
            (Ok(()), Err(err)) => Err(SyncError::PartialUpdate {
                id: plan.displaced.id().to_string(),
                reason: err.0,
            }),
            (Err(moved_err), Err(displaced_err)) => Err(SyncError::BothUpdates {
                moved_id: plan.moved.id().to_string(),
                moved_reason: moved_err.0,
                displaced_id: plan.displaced.id().to_string(),
                displaced_reason: displaced_err.0,
            }),
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(window: Duration) {
    gloo_timers::future::TimeoutFuture::new(window.as_millis() as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(window: Duration) {
    tokio::time::sleep(window).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::resolve;
    use crate::store::{MemoryStore, StoreError};
    use crate::testutil::{deck, Card};
    use async_trait::async_trait;

    fn positions(order: &[Card]) -> Vec<(&'static str, i32)> {
        order.iter().map(|c| (c.id, c.position)).collect()
    }

    #[tokio::test]
    async fn successful_swap_converges_to_the_store_order() {
        // [alpine:0, coastal:1, desert:2]; drag alpine onto index 2.
        let store = MemoryStore::new(deck(3));
        let controller = SyncController::new(store);

        let plan = resolve(Some(0), 2, &controller.store().records()).expect("valid drop");
        let outcome = controller.apply(&plan).await;

        assert!(outcome.is_success());
        assert_eq!(
            positions(&outcome.order.unwrap()),
            vec![("desert", 0), ("coastal", 1), ("alpine", 2)]
        );
        // Exactly two updates and one refetch; coastal was never touched.
        assert_eq!(controller.store().update_calls(), 2);
        assert_eq!(controller.store().list_calls(), 1);
        assert!(!controller.is_syncing());
    }

    #[tokio::test]
    async fn outcome_order_is_sorted_even_if_the_store_is_not() {
        let store = MemoryStore::new(deck(3));
        let controller = SyncController::new(store);

        // After the swap the store's insertion order no longer matches
        // its position order; the controller must sort before publishing.
        let plan = resolve(Some(0), 1, &controller.store().records()).expect("valid drop");
        let outcome = controller.apply(&plan).await;

        assert_eq!(
            positions(&outcome.order.unwrap()),
            vec![("coastal", 0), ("alpine", 1), ("desert", 2)]
        );
    }

    #[tokio::test]
    async fn dropping_on_the_origin_issues_no_requests() {
        let store = MemoryStore::new(deck(3));
        assert!(resolve(Some(0), 0, &store.records()).is_none());
        assert_eq!(store.update_calls(), 0);
        assert_eq!(store.list_calls(), 0);
    }

    #[tokio::test]
    async fn applying_the_same_plan_twice_does_not_double_swap() {
        let store = MemoryStore::new(deck(3));
        let controller = SyncController::new(store);

        let plan = resolve(Some(0), 1, &controller.store().records()).expect("valid drop");
        let first = controller.apply(&plan).await;
        let settled = controller.store().records();

        // A duplicate drop replays the same absolute positions.
        let second = controller.apply(&plan).await;

        assert_eq!(controller.store().records(), settled);
        assert_eq!(first.order, second.order);
    }

    #[tokio::test]
    async fn partial_failure_names_the_failed_record_and_displays_store_truth() {
        // Drag alpine onto index 1; the alpine update lands, coastal's is
        // rejected, leaving a duplicate position in the store.
        let store = MemoryStore::new(deck(3));
        store.fail_update_for("coastal", "validation rejected");
        let controller = SyncController::new(store);

        let plan = resolve(Some(0), 1, &controller.store().records()).expect("valid drop");
        let outcome = controller.apply(&plan).await;

        match outcome.error {
            Some(SyncError::PartialUpdate { ref id, ref reason }) => {
                assert_eq!(id, "coastal");
                assert_eq!(reason, "validation rejected");
            }
            other => panic!("expected partial update error, got {other:?}"),
        }

        // The refetched order carries the half-applied swap verbatim:
        // alpine moved to 1, coastal still at 1.
        assert_eq!(
            positions(&outcome.order.unwrap()),
            vec![("alpine", 1), ("coastal", 1), ("desert", 2)]
        );
        assert!(!controller.is_syncing());
    }

    #[tokio::test]
    async fn total_failure_names_both_records() {
        let store = MemoryStore::new(deck(3));
        store.fail_update_for("alpine", "offline");
        store.fail_update_for("coastal", "offline");
        let controller = SyncController::new(store);

        let plan = resolve(Some(0), 1, &controller.store().records()).expect("valid drop");
        let outcome = controller.apply(&plan).await;

        match outcome.error {
            Some(SyncError::BothUpdates {
                ref moved_id,
                ref displaced_id,
                ..
            }) => {
                assert_eq!(moved_id, "alpine");
                assert_eq!(displaced_id, "coastal");
            }
            other => panic!("expected both-updates error, got {other:?}"),
        }

        // Nothing applied; the refetch republishes the untouched order.
        assert_eq!(
            positions(&outcome.order.unwrap()),
            vec![("alpine", 0), ("coastal", 1), ("desert", 2)]
        );
    }

    #[tokio::test]
    async fn refetch_failure_yields_no_order() {
        let store = MemoryStore::new(deck(3));
        store.fail_list("gateway unreachable");
        let controller = SyncController::new(store);

        let plan = resolve(Some(0), 2, &controller.store().records()).expect("valid drop");
        let outcome = controller.apply(&plan).await;

        assert_eq!(outcome.order, None);
        assert_eq!(
            outcome.error,
            Some(SyncError::Refetch("gateway unreachable".into()))
        );
        assert!(!controller.is_syncing());
    }

    #[tokio::test]
    async fn refetch_failure_after_update_failure_surfaces_the_refetch() {
        let store = MemoryStore::new(deck(3));
        store.fail_update_for("alpine", "offline");
        store.fail_list("gateway unreachable");
        let controller = SyncController::new(store);

        let plan = resolve(Some(0), 1, &controller.store().records()).expect("valid drop");
        let outcome = controller.apply(&plan).await;

        assert!(matches!(outcome.error, Some(SyncError::Refetch(_))));
        assert_eq!(outcome.order, None);
    }

    /// Store whose updates never settle, for exercising the timeout.
    struct StuckStore {
        records: Vec<Card>,
    }

    #[async_trait(?Send)]
    impl OrderedStore<Card> for StuckStore {
        async fn list(&self) -> Result<Vec<Card>, StoreError> {
            Ok(self.records.clone())
        }

        async fn update(&self, _record: &Card) -> Result<(), StoreError> {
            futures::future::pending::<()>().await;
            unreachable!()
        }
    }

    #[tokio::test]
    async fn stuck_updates_time_out_and_the_refetch_still_runs() {
        let store = StuckStore { records: deck(3) };
        let controller = SyncController::with_timeout(store, Duration::from_millis(20));

        let plan = resolve(Some(0), 2, &deck(3)).expect("valid drop");
        let outcome = controller.apply(&plan).await;

        assert_eq!(outcome.error, Some(SyncError::Timeout(20)));
        // Convergence holds even on timeout: the order is a fresh read.
        assert_eq!(
            positions(&outcome.order.unwrap()),
            vec![("alpine", 0), ("coastal", 1), ("desert", 2)]
        );
        assert!(!controller.is_syncing());
    }

    #[test]
    fn errors_render_actionable_messages() {
        let err = SyncError::PartialUpdate {
            id: "coastal".into(),
            reason: "500 Internal Server Error".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to update record coastal: 500 Internal Server Error"
        );

        assert_eq!(
            SyncError::Timeout(5000).to_string(),
            "reorder timed out after 5000ms"
        );
    }
}

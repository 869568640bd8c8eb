//! Leptos bindings for the reorder engine.
//!
//! Signal bag plus handler factories gluing [`DragMachine`] to HTML5 drag
//! events. The drop itself is wired by the host component, which owns the
//! async store round-trip; see [`take_drop`] and [`apply_with_signals`].

use leptos::prelude::*;

use crate::drag::{resolve_origin, DragMachine};
use crate::record::OrderedRecord;
use crate::resolve::SwapPlan;
use crate::store::OrderedStore;
use crate::sync::{SyncController, SyncOutcome};

/// `DataTransfer` format carrying the fallback origin payload.
const PAYLOAD_FORMAT: &str = "text/plain";

/// Reorder state signals
#[derive(Clone, Copy)]
pub struct ReorderSignals {
    pub machine_read: ReadSignal<DragMachine>,
    pub machine_write: WriteSignal<DragMachine>,
    pub syncing_read: ReadSignal<bool>,
    pub syncing_write: WriteSignal<bool>,
    pub error_read: ReadSignal<Option<String>>,
    pub error_write: WriteSignal<Option<String>>,
}

pub fn create_reorder_signals() -> ReorderSignals {
    let (machine_read, machine_write) = signal(DragMachine::new());
    let (syncing_read, syncing_write) = signal(false);
    let (error_read, error_write) = signal(None::<String>);
    ReorderSignals {
        machine_read,
        machine_write,
        syncing_read,
        syncing_write,
        error_read,
        error_write,
    }
}

/// End any gesture and clear drag visuals.
pub fn end_drag(sig: &ReorderSignals) {
    sig.machine_write.update(|m| m.cancel());
}

/// Create dragstart handler for the item at `index`.
///
/// Records the origin in the machine and mirrors it into the gesture
/// payload. The machine stays canonical; the payload is only the fallback
/// for hosts where the drag state was lost mid-gesture. While a reorder
/// is syncing the gesture is refused outright.
pub fn make_on_dragstart(
    sig: ReorderSignals,
    index: usize,
) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        let mut accepted = false;
        sig.machine_write.update(|m| accepted = m.start(index));
        if !accepted {
            ev.prevent_default();
            return;
        }
        write_payload(&ev, index);
    }
}

/// Create dragenter handler for the candidate at `index`.
pub fn make_on_dragenter(
    sig: ReorderSignals,
    index: usize,
) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        sig.machine_write.update(|m| m.enter(index));
    }
}

/// Create dragleave handler (target highlight cleared, origin retained).
pub fn make_on_dragleave(sig: ReorderSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        sig.machine_write.update(|m| m.leave());
    }
}

/// Create dragover handler. Cancelling the event is what marks the item
/// as a valid drop target for the browser.
pub fn make_on_dragover() -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
    }
}

/// Create dragend handler. Fires on abort and after a drop alike; by then
/// the machine is already idle, so this only mops up cancelled gestures.
pub fn make_on_dragend(sig: ReorderSignals) -> impl Fn(web_sys::DragEvent) + Copy + 'static {
    move |_ev: web_sys::DragEvent| {
        end_drag(&sig);
    }
}

/// Take the drop out of the machine.
///
/// `target` is the index of the item the DOM delivered the drop to.
/// The origin comes from the machine when it tracked the gesture, else
/// from the event payload. The machine resets unconditionally, whatever
/// the downstream mutation does.
pub fn take_drop(
    sig: &ReorderSignals,
    ev: &web_sys::DragEvent,
    target: usize,
) -> Option<(usize, usize)> {
    let payload = read_payload(ev);
    let mut canonical = None;
    sig.machine_write
        .update(|m| canonical = m.drop_gesture().map(|(source, _)| source));
    resolve_origin(canonical, payload).map(|source| (source, target))
}

/// Mirror the origin into the gesture payload (fallback channel).
pub fn write_payload(ev: &web_sys::DragEvent, index: usize) {
    if let Some(dt) = ev.data_transfer() {
        let _ = dt.set_data(PAYLOAD_FORMAT, &index.to_string());
        dt.set_effect_allowed("move");
    }
}

/// Read the origin back out of the gesture payload, if the host kept it.
pub fn read_payload(ev: &web_sys::DragEvent) -> Option<usize> {
    let dt = ev.data_transfer()?;
    dt.get_data(PAYLOAD_FORMAT).ok()?.parse().ok()
}

/// Run one reorder cycle with the signal bag kept in step: gestures lock
/// while the cycle runs, the last error surfaces for the banner, and the
/// fresh authoritative order (when the refetch succeeded) is returned for
/// the host to republish.
pub async fn apply_with_signals<R, S>(
    controller: &SyncController<S>,
    sig: ReorderSignals,
    plan: SwapPlan<R>,
) -> Option<Vec<R>>
where
    R: OrderedRecord,
    S: OrderedStore<R>,
{
    sig.syncing_write.set(true);
    sig.error_write.set(None);
    sig.machine_write.update(|m| m.set_locked(true));

    let SyncOutcome { order, error } = controller.apply(&plan).await;

    if let Some(error) = &error {
        sig.error_write.set(Some(error.to_string()));
    }
    sig.machine_write.update(|m| m.set_locked(false));
    sig.syncing_write.set(false);
    order
}

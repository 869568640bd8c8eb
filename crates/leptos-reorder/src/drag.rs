//! Drag gesture state machine.
//!
//! Tracks one drag gesture from pickup to drop without touching the DOM.
//! The Leptos layer in [`crate::signals`] feeds it events and renders from
//! its phase.

/// Phase of the current drag gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// An item was picked up but is not over any candidate target.
    Dragging { source: usize },
    /// The pointer is over a candidate drop target.
    Hovering { source: usize, target: usize },
}

/// State machine for a single drag gesture.
///
/// The machine is the canonical origin channel: the index recorded at
/// [`start`](DragMachine::start) wins over whatever payload the browser
/// carried across the gesture. While locked, new gestures are rejected so
/// reorder cycles never overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragMachine {
    phase: DragPhase,
    locked: bool,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Origin index of the gesture in progress, if any.
    pub fn origin(&self) -> Option<usize> {
        match self.phase {
            DragPhase::Idle => None,
            DragPhase::Dragging { source } | DragPhase::Hovering { source, .. } => Some(source),
        }
    }

    /// Candidate target currently hovered, if any.
    pub fn hover_target(&self) -> Option<usize> {
        match self.phase {
            DragPhase::Hovering { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Lock or unlock gesture starts. Held while a reorder syncs.
    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Begin a gesture over the item at `source`.
    ///
    /// Returns `false` (and stays put) while locked or when a gesture is
    /// already in progress.
    pub fn start(&mut self, source: usize) -> bool {
        if self.locked || self.phase != DragPhase::Idle {
            return false;
        }
        self.phase = DragPhase::Dragging { source };
        true
    }

    /// Pointer entered the candidate at `target`.
    ///
    /// Entering the origin itself is ignored (an item is never its own
    /// drop target); re-entering the current target is a no-op.
    pub fn enter(&mut self, target: usize) {
        match self.phase {
            DragPhase::Dragging { source } | DragPhase::Hovering { source, .. }
                if source != target =>
            {
                self.phase = DragPhase::Hovering { source, target };
            }
            _ => {}
        }
    }

    /// Pointer left the current candidate without entering another.
    /// The target highlight clears; the origin is retained.
    pub fn leave(&mut self) {
        if let DragPhase::Hovering { source, .. } = self.phase {
            self.phase = DragPhase::Dragging { source };
        }
    }

    /// Drop the gesture.
    ///
    /// Yields the `(source, target)` pair when the drop landed on a
    /// candidate, and always resets to `Idle` whatever the downstream
    /// mutation does.
    pub fn drop_gesture(&mut self) -> Option<(usize, usize)> {
        let pair = match self.phase {
            DragPhase::Hovering { source, target } => Some((source, target)),
            _ => None,
        };
        self.phase = DragPhase::Idle;
        pair
    }

    /// Abort the gesture, e.g. released outside any candidate.
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }
}

/// Resolve the drag origin from the canonical machine channel, falling
/// back to the gesture payload only when the machine lost it.
pub fn resolve_origin(canonical: Option<usize>, payload: Option<usize>) -> Option<usize> {
    canonical.or(payload)
}

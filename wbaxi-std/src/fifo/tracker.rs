//! FIFO Tracker.
//!
//! Keeps a read and a write pointer over `slots` positions. Equal pointers mean either full or
//! empty; the last operation that moved a pointer tells which.

use crate::counter::Counter;

/// Ingress signal of FIFO tracker.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct I {
    /// Enqueue this cycle.
    pub enq: bool,
    /// Dequeue this cycle.
    pub deq: bool,
}

/// Egress signal of FIFO tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct E {
    /// Current write pointer.
    pub wptr_r: usize,
    /// Current read pointer.
    pub rptr_r: usize,
    /// No slot is free.
    pub full: bool,
    /// No slot is occupied.
    pub empty: bool,
}

/// Registers of FIFO tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    wptr: Counter,
    rptr: Counter,
    last_input: I,
}

impl State {
    /// Creates an empty tracker.
    pub fn new(slots: usize) -> Self {
        Self { wptr: Counter::new(slots), rptr: Counter::new(slots), last_input: I { enq: false, deq: true } }
    }

    /// Number of slots.
    pub fn slots(&self) -> usize { self.wptr.slots() }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        let e = egress(self);
        if e.full {
            self.slots()
        } else {
            (e.wptr_r + self.slots() - e.rptr_r) % self.slots()
        }
    }

    /// Returns whether no slot is occupied.
    pub fn is_empty(&self) -> bool { egress(self).empty }
}

/// Egress of the tracker for the current cycle, independent of this cycle's input.
pub fn egress(state: &State) -> E { logic(I::default(), state).0 }

/// Inner logic of FIFO tracker.
pub fn logic(input: I, state: &State) -> (E, State) {
    let (wptr_r, wptr) = state.wptr.logic(input.enq);
    let (rptr_r, rptr) = state.rptr.logic(input.deq);

    let equal_ptrs = wptr_r == rptr_r;
    let full = equal_ptrs && state.last_input.enq;
    let empty = equal_ptrs && state.last_input.deq;

    let output = E { wptr_r, rptr_r, full, empty };
    let last_input = if input.enq || input.deq { input } else { state.last_input };
    (output, State { wptr, rptr, last_input })
}

//! FIFO with 1 read and 1 write

use super::tracker;
use super::FifoError;
use crate::*;

/// FIFO with one enqueue and one dequeue per cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fifo<V> {
    mem: Vec<V>,
    tracker: tracker::State,
}

impl<V: Clone + Default> Fifo<V> {
    /// Creates an empty FIFO of `slots` slots.
    pub fn new(slots: usize) -> Self { Self { mem: vec![V::default(); slots], tracker: tracker::State::new(slots) } }
}

impl<V: Clone> Fifo<V> {
    /// Number of slots.
    pub fn slots(&self) -> usize { self.tracker.slots() }

    /// Number of occupied slots.
    pub fn len(&self) -> usize { self.tracker.len() }

    /// Returns whether no slot is occupied.
    pub fn is_empty(&self) -> bool { self.tracker.is_empty() }

    /// Returns whether no slot is free.
    pub fn is_full(&self) -> bool { tracker::egress(&self.tracker).full }

    /// Oldest item, invalid when empty.
    pub fn head(&self) -> Valid<V> {
        let e = tracker::egress(&self.tracker);
        Valid::new(!e.empty, self.mem[e.rptr_r].clone())
    }

    /// Computes the next FIFO contents.
    ///
    /// It returns the head of the current cycle (what `deq` removes) together with the next FIFO.
    /// Enqueue into a full FIFO and dequeue from an empty one are rejected, even when the other
    /// operation happens in the same cycle.
    ///
    /// The receiver is left untouched, so the backing memory is copied every call: O(slots) per
    /// cycle.
    pub fn logic(&self, enq: Valid<V>, deq: bool) -> Result<(Valid<V>, Self), FifoError> {
        if enq.valid && self.is_full() {
            return Err(FifoError::Full { slots: self.slots() });
        }
        if deq && self.is_empty() {
            return Err(FifoError::Empty);
        }

        let head = self.head();
        let (e, tracker_next) = tracker::logic(tracker::I { enq: enq.valid, deq }, &self.tracker);
        let mut mem_next = self.mem.clone();
        if enq.valid {
            mem_next[e.wptr_r] = enq.inner;
        }

        Ok((head, Self { mem: mem_next, tracker: tracker_next }))
    }
}

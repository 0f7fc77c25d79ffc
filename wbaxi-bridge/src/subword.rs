//! Sub-word address queue.
//!
//! When the AXI beat holds several Wishbone words, a read response must be sliced at the offset the
//! request was issued with. Responses come back in order, so the offsets are kept in a FIFO pushed
//! on admission and popped on completion.

use wbaxi_std::{Fifo, FifoError, Valid};

/// FIFO of sub-word offsets, one per request in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubwordAddressQueue {
    fifo: Fifo<usize>,
}

impl SubwordAddressQueue {
    /// Creates an empty queue of `capacity` entries.
    pub fn new(capacity: usize) -> Self { Self { fifo: Fifo::new(capacity) } }

    /// Number of offsets held.
    pub fn len(&self) -> usize { self.fifo.len() }

    /// Computes the next queue.
    ///
    /// It returns the offset removed by `pop` together with the next queue.
    pub fn logic(&self, push: Option<usize>, pop: bool) -> Result<(Option<usize>, Self), FifoError> {
        let (head, fifo) = self.fifo.logic(Valid::from(push), pop)?;
        Ok((if pop { head.into_option() } else { None }, Self { fifo }))
    }
}

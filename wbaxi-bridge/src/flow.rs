//! Pending-count flow control.
//!
//! Responses return in issue order, so a single counter replaces a per-request table.

use wbaxi_std::{CounterError, CounterUpDown};

use crate::direction::{Direction, DirectionLock};
use crate::flush::FlushController;

/// Count of requests admitted but not yet completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowController {
    pending: CounterUpDown,
}

impl FlowController {
    /// Creates an empty controller admitting at most `capacity` requests.
    pub fn new(capacity: usize) -> Self { Self { pending: CounterUpDown::new(capacity) } }

    /// Number of requests in flight.
    pub fn pending(&self) -> usize { self.pending.count() }

    /// Maximum number of requests in flight.
    pub fn capacity(&self) -> usize { self.pending.max() }

    /// Returns whether nothing is in flight.
    pub fn empty(&self) -> bool { self.pending() == 0 }

    /// Returns whether one more admission fills the controller.
    pub fn nearfull(&self) -> bool { self.pending() + 1 >= self.capacity() }

    /// Returns whether no admission is possible.
    pub fn full(&self) -> bool { self.pending() >= self.capacity() }

    /// Returns whether a request of kind `kind` may be admitted this cycle.
    pub fn try_admit(&self, kind: Direction, lock: &DirectionLock, flush: &FlushController) -> bool {
        !self.full() && !flush.is_flushing() && lock.permits(kind, self.empty())
    }

    /// Computes the next count.
    pub fn logic(&self, admit: bool, complete: bool) -> Result<Self, CounterError> {
        Ok(Self { pending: self.pending.logic(admit, complete)? })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fill(capacity: usize, count: usize) -> FlowController {
        (0..count).fold(FlowController::new(capacity), |flow, _| flow.logic(true, false).unwrap())
    }

    #[test]
    fn flags_follow_the_count() {
        let flow = fill(64, 0);
        assert!(flow.empty() && !flow.nearfull() && !flow.full());

        let flow = fill(64, 63);
        assert!(!flow.empty() && flow.nearfull() && !flow.full());

        let flow = fill(64, 64);
        assert!(flow.nearfull() && flow.full());
        assert!(!flow.try_admit(Direction::Read, &DirectionLock::default(), &FlushController::Normal));
        assert_eq!(flow.logic(true, false), Err(CounterError::Overflow { max: 64 }));
    }

    #[test]
    fn admission_rules() {
        let lock = DirectionLock::default().logic(Some(Direction::Read));
        let flow = fill(4, 1);
        assert!(flow.try_admit(Direction::Read, &lock, &FlushController::Normal));
        assert!(!flow.try_admit(Direction::Write, &lock, &FlushController::Normal));
        assert!(!flow.try_admit(Direction::Read, &lock, &FlushController::Flushing));
        assert!(fill(4, 0).try_admit(Direction::Write, &lock, &FlushController::Normal));
    }

    #[test]
    fn admit_and_complete_cancel() {
        let flow = fill(2, 2);
        assert_eq!(flow.logic(true, true).unwrap().pending(), 2);
        assert_eq!(flow.logic(false, true).unwrap().pending(), 1);
        assert_eq!(fill(2, 0).logic(false, true), Err(CounterError::Underflow));
    }
}

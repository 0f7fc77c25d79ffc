//! Counter modules.

use thiserror::Error;

/// Circular pointer over `slots` positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    value: usize,
    slots: usize,
}

impl Counter {
    /// Creates a pointer at position 0.
    pub fn new(slots: usize) -> Self {
        assert!(slots > 0, "circular pointer needs at least one slot");
        Self { value: 0, slots }
    }

    /// Current position.
    pub fn value(&self) -> usize { self.value }

    /// Number of positions.
    pub fn slots(&self) -> usize { self.slots }

    /// Advances by one if `input` is set.
    ///
    /// It returns the pair of current counter value and next counter.
    pub fn logic(&self, input: bool) -> (usize, Self) {
        let next = self.value + usize::from(input);
        let next = if next >= self.slots { 0 } else { next };
        (self.value, Self { value: next, ..*self })
    }
}

#[allow(missing_docs)]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CounterError {
    #[error("counter overflow: already at its maximum of {max}")]
    Overflow { max: usize },

    #[error("counter underflow: decremented at zero")]
    Underflow,
}

/// Up-down counter saturating at `max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterUpDown {
    count: usize,
    max: usize,
}

impl CounterUpDown {
    /// Creates a counter at zero.
    pub fn new(max: usize) -> Self { Self { count: 0, max } }

    /// Current count.
    pub fn count(&self) -> usize { self.count }

    /// Upper bound.
    pub fn max(&self) -> usize { self.max }

    /// Computes the next count. An up and a down in the same cycle cancel.
    pub fn logic(&self, up: bool, down: bool) -> Result<Self, CounterError> {
        let count_next = match (up, down) {
            (true, false) if self.count >= self.max => return Err(CounterError::Overflow { max: self.max }),
            (true, false) => self.count + 1,
            (false, true) => self.count.checked_sub(1).ok_or(CounterError::Underflow)?,
            _ => self.count,
        };
        Ok(Self { count: count_next, ..*self })
    }
}

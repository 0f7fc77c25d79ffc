//! Direction lock.
//!
//! AXI orders writes and reads independently, so responses of mixed kinds may come back out of
//! issue order. The lock keeps every in-flight request of one kind.

use std::fmt;

/// Kind of a transaction.
#[allow(missing_docs)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Read,
    Write,
}

impl Direction {
    /// Kind of a request with write enable `we`.
    pub fn of(we: bool) -> Self {
        if we {
            Self::Write
        } else {
            Self::Read
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Direction of the earliest in-flight request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DirectionLock {
    direction: Direction,
}

impl DirectionLock {
    /// Locked direction. Meaningless while the pipeline is empty.
    pub fn direction(&self) -> Direction { self.direction }

    /// Returns whether a request of kind `kind` may be admitted.
    ///
    /// An empty pipeline accepts either kind.
    pub fn permits(&self, kind: Direction, empty: bool) -> bool { empty || kind == self.direction }

    /// Computes the next lock. `admitted` is the kind of the request admitted this cycle, if any.
    ///
    /// The caller admits only permitted kinds, so latching unconditionally is a no-op on a
    /// non-empty pipeline.
    pub fn logic(&self, admitted: Option<Direction>) -> Self {
        match admitted {
            Some(direction) => Self { direction },
            None => *self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pipeline_takes_either_kind() {
        let lock = DirectionLock::default();
        assert_eq!(lock.direction(), Direction::Read);
        assert!(lock.permits(Direction::Write, true));
        assert!(!lock.permits(Direction::Write, false));
        assert!(lock.permits(Direction::Read, false));
    }

    #[test]
    fn admission_latches() {
        let lock = DirectionLock::default().logic(Some(Direction::of(true)));
        assert_eq!(lock.direction(), Direction::Write);
        assert_eq!(lock.logic(None), lock);
        assert_eq!(Direction::Write.to_string(), "write");
    }
}

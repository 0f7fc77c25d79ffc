//! Response router.
//!
//! Turns `b`/`r` responses into Wishbone `ack`/`err` in arrival order, slicing read data at the
//! sub-word offset recorded when the request was admitted.

use wbaxi::{some_or, Word};

use crate::bridge::BridgeError;
use crate::config::Config;
use crate::direction::{Direction, DirectionLock};
use crate::flow::FlowController;
use crate::flush::FlushController;
use crate::lane::ByteLanes;
use crate::types::{AxiBwd, Resp, WbBwd};

/// Response accepted this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Channel the response arrived on.
    pub direction: Direction,
    /// Response ID.
    pub id: u32,
    /// Response status.
    pub resp: Resp,
    /// Read data beat. Empty for writes.
    pub data: Word,
}

impl Completion {
    /// Returns whether the response reports an error.
    pub fn is_err(&self) -> bool { self.resp.is_err() }
}

/// Response router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseRouter {
    lanes: ByteLanes,
    write_id: u32,
    read_id: u32,
}

impl ResponseRouter {
    /// Creates the router of a configuration.
    pub fn new(config: &Config) -> Self {
        Self { lanes: ByteLanes::new(config), write_id: config.write_id(), read_id: config.read_id() }
    }

    /// Returns the response accepted this cycle, if any.
    ///
    /// `bready` and `rready` are always high, so any valid response is accepted. A response the
    /// bridge cannot account for is reported as an error.
    pub fn completion(
        &self, o_bwd: &AxiBwd, flow: &FlowController, lock: &DirectionLock,
    ) -> Result<Option<Completion>, BridgeError> {
        let completion = match (o_bwd.b.as_option(), o_bwd.r.as_option()) {
            (None, None) => return Ok(None),
            (Some(_), Some(_)) => {
                tracing::warn!("write and read responses in the same cycle");
                return Err(BridgeError::ConflictingResponses);
            }
            (Some(b), None) => {
                Completion { direction: Direction::Write, id: b.id, resp: b.resp, data: Word::default() }
            }
            (None, Some(r)) => Completion { direction: Direction::Read, id: r.id, resp: r.resp, data: r.data.clone() },
        };

        let direction = completion.direction;
        if flow.empty() {
            tracing::warn!(%direction, "response with nothing pending");
            return Err(BridgeError::UnexpectedResponse { direction });
        }
        if direction != lock.direction() {
            tracing::warn!(%direction, locked = %lock.direction(), "response against the locked direction");
            return Err(BridgeError::DirectionMismatch { got: direction, locked: lock.direction() });
        }

        let expected = match direction {
            Direction::Write => self.write_id,
            Direction::Read => self.read_id,
        };
        if completion.id != expected {
            tracing::warn!(%direction, id = completion.id, expected, "response with an unknown ID");
            return Err(BridgeError::UnexpectedId { direction, got: completion.id, expected });
        }

        Ok(Some(completion))
    }

    /// Wishbone response signals for this cycle, with `stall` low.
    ///
    /// `offset` is the sub-word offset popped for the completion, `None` when widths are equal.
    /// Nothing is acknowledged outside a bus cycle or while flushing.
    pub fn acknowledge(
        &self, completion: Option<&Completion>, offset: Option<usize>, cyc: bool, flush: &FlushController,
    ) -> WbBwd {
        let completion = some_or!(completion, return WbBwd::default());
        let respond = cyc && !flush.is_flushing();
        let data = match completion.direction {
            Direction::Read => self.lanes.read_data(&completion.data, offset.unwrap_or(0)),
            Direction::Write => 0,
        };

        WbBwd { stall: false, ack: respond && !completion.is_err(), err: respond && completion.is_err(), data }
    }
}

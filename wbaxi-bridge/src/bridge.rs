//! Pipelined Wishbone to AXI4 bridge.
//!
//! One request per cycle flows from the Wishbone port through a skid slot into the AXI channel
//! drivers; one response per cycle flows back as `ack`/`err`. The bridge keeps no per-request
//! record: in-order responses make a pending count (plus the sub-word offsets when the AXI beat is
//! wider) enough.
//!
//! All outputs of a cycle are computed from the registers sampled at the start of the cycle, and
//! the registers are committed together by [`wbaxi::Instance::tick`].

use thiserror::Error;
use wbaxi::Fsm;
use wbaxi_std::{buffer_skid, CounterError, FifoError, Ready, Valid};

use crate::config::Config;
use crate::direction::{Direction, DirectionLock};
use crate::driver::{ReadChannelDriver, WriteChannelDriver};
use crate::flow::FlowController;
use crate::flush::FlushController;
use crate::lane::ByteLanes;
use crate::response::{Completion, ResponseRouter};
use crate::subword::SubwordAddressQueue;
use crate::types::{Axi, AxiBwd, AxiFwd, WbBwd, WbFwd, WbReq, Wishbone};

/// Errors raised by a cycle whose AXI responses the bridge cannot account for.
#[allow(missing_docs)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("write and read responses presented in the same cycle")]
    ConflictingResponses,

    #[error("{direction} response with no request pending")]
    UnexpectedResponse { direction: Direction },

    #[error("{got} response while the pipeline is locked to {locked}s")]
    DirectionMismatch { got: Direction, locked: Direction },

    #[error("{direction} response with ID {got}, expected {expected}")]
    UnexpectedId { direction: Direction, got: u32, expected: u32 },

    #[error(transparent)]
    Counter(#[from] CounterError),

    #[error(transparent)]
    Fifo(#[from] FifoError),
}

/// Registers of the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    skid: buffer_skid::State<WbReq>,
    write: WriteChannelDriver,
    read: ReadChannelDriver,
    flow: FlowController,
    lock: DirectionLock,
    flush: FlushController,
    subword: Option<SubwordAddressQueue>,
}

impl State {
    /// Number of requests admitted and not yet completed.
    pub fn pending(&self) -> usize { self.flow.pending() }

    /// Maximum number of requests in flight.
    pub fn capacity(&self) -> usize { self.flow.capacity() }

    /// Nothing in flight.
    pub fn empty(&self) -> bool { self.flow.empty() }

    /// One admission away from full.
    pub fn nearfull(&self) -> bool { self.flow.nearfull() }

    /// No admission possible.
    pub fn full(&self) -> bool { self.flow.full() }

    /// Direction of the requests in flight.
    pub fn direction(&self) -> Direction { self.lock.direction() }

    /// Whether responses are being drained without acknowledgement.
    pub fn flushing(&self) -> bool { self.flush.is_flushing() }

    /// Whether the skid slot holds a request, i.e. `stall` is high this cycle.
    pub fn stalled(&self) -> bool { self.skid.is_occupied() }

    /// Request held in the skid slot.
    pub fn skid(&self) -> Option<&WbReq> { self.skid.temp.as_option() }

    /// Length of the sub-word address queue, `None` when widths are equal.
    pub fn subword_len(&self) -> Option<usize> { self.subword.as_ref().map(SubwordAddressQueue::len) }

    /// Write channel registers.
    pub fn write_driver(&self) -> &WriteChannelDriver { &self.write }

    /// Read channel registers.
    pub fn read_driver(&self) -> &ReadChannelDriver { &self.read }
}

/// Pipelined Wishbone to AXI4 bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bridge {
    config: Config,
    lanes: ByteLanes,
    router: ResponseRouter,
}

impl Bridge {
    /// Creates a bridge.
    pub fn new(config: Config) -> Self {
        Self { config, lanes: ByteLanes::new(&config), router: ResponseRouter::new(&config) }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config { &self.config }

    /// Returns whether the channel driver of kind `kind` can take a request this cycle.
    fn driver_free(&self, kind: Direction, o_bwd: &AxiBwd, state: &State) -> bool {
        match kind {
            Direction::Write => state.write.is_free(o_bwd.aw, o_bwd.w),
            Direction::Read => state.read.is_free(o_bwd.ar),
        }
    }
}

impl Fsm for Bridge {
    type Error = BridgeError;
    type I = Wishbone;
    type O = Axi;
    type S = State;

    fn init(&self) -> State {
        let capacity = self.config.capacity();
        State {
            skid: buffer_skid::State::default(),
            write: WriteChannelDriver::default(),
            read: ReadChannelDriver::default(),
            flow: FlowController::new(capacity),
            lock: DirectionLock::default(),
            flush: FlushController::default(),
            subword: self.config.has_subword_queue().then(|| SubwordAddressQueue::new(capacity)),
        }
    }

    fn logic(&self, i_fwd: &WbFwd, o_bwd: &AxiBwd, state: &State) -> Result<(AxiFwd, WbBwd, State), BridgeError> {
        // Admission.
        let ingress = if i_fwd.cyc { i_fwd.stb } else { Valid::invalid() };
        let candidate = buffer_skid::egress(&ingress, &state.skid);
        let admitted = candidate.into_option().filter(|req| {
            let kind = Direction::of(req.we);
            i_fwd.cyc && self.driver_free(kind, o_bwd, state) && state.flow.try_admit(kind, &state.lock, &state.flush)
        });

        let (_, skid_bwd, skid_next) = buffer_skid::logic(&ingress, &Ready::new(admitted.is_some()), &state.skid);
        let skid_next = if i_fwd.cyc { skid_next } else { buffer_skid::State::default() };

        // Request channels.
        let (config, lanes) = (&self.config, &self.lanes);
        let write_load = admitted.filter(|req| req.we).map(|req| WriteChannelDriver::beats(config, lanes, &req));
        let read_load = admitted.filter(|req| !req.we).map(|req| ReadChannelDriver::beat(config, lanes, &req));
        let write_next = state.write.logic(write_load, o_bwd.aw, o_bwd.w);
        let read_next = state.read.logic(read_load, o_bwd.ar);

        // Responses.
        let completion = self.router.completion(o_bwd, &state.flow, &state.lock)?;
        let (offset, subword_next) = match &state.subword {
            Some(queue) => {
                let push = admitted.map(|req| self.lanes.offset(req.addr));
                let (offset, queue_next) = queue.logic(push, completion.is_some())?;
                (offset, Some(queue_next))
            }
            None => (None, None),
        };

        let i_bwd = WbBwd {
            stall: !skid_bwd.ready,
            ..self.router.acknowledge(completion.as_ref(), offset, i_fwd.cyc, &state.flush)
        };

        // Control.
        let flow_next = state.flow.logic(admitted.is_some(), completion.is_some())?;
        let lock_next = state.lock.logic(admitted.map(|req| Direction::of(req.we)));
        let error = completion.as_ref().map_or(false, Completion::is_err);
        let flush_next = state.flush.logic(i_fwd.cyc, error, flow_next.empty());

        if let Some(req) = &admitted {
            let direction = Direction::of(req.we);
            tracing::trace!(%direction, addr = req.addr, pending = flow_next.pending(), "admitted");
        }
        if !state.skid.is_occupied() && skid_next.is_occupied() {
            tracing::debug!(addr = ingress.inner.addr, "request held in the skid slot");
        }
        if let Some(completion) = &completion {
            let acked = i_bwd.ack || i_bwd.err;
            tracing::trace!(direction = %completion.direction, resp = ?completion.resp, acked, "completed");
        }
        if flow_next.nearfull() && !state.flow.nearfull() {
            tracing::debug!(pending = flow_next.pending(), capacity = flow_next.capacity(), "nearly full");
        }
        if flush_next != state.flush {
            tracing::debug!(from = ?state.flush, to = ?flush_next, pending = flow_next.pending(), "flush");
        }

        let o_fwd = AxiFwd {
            aw: state.write.aw,
            w: state.write.w.clone(),
            b: Ready::new(true),
            ar: state.read.ar,
            r: Ready::new(true),
        };
        let state_next = State {
            skid: skid_next,
            write: write_next,
            read: read_next,
            flow: flow_next,
            lock: lock_next,
            flush: flush_next,
            subword: subword_next,
        };

        Ok((o_fwd, i_bwd, state_next))
    }
}

//! AXI4 subordinate model.
//!
//! Backed by a sparse byte store that reads as zero where never written. Readies are drawn at the
//! start of a cycle and do not depend on the manager's valids. Responses are returned in the order
//! their requests completed, at most one per cycle.

use std::collections::{HashMap, VecDeque};
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wbaxi::Word;
use wbaxi_bridge::types::{Addr, AxiBwd, AxiFwd, RRes, Resp, WReq, WRes};
use wbaxi_std::{Ready, Valid};

/// Knobs of the memory model.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryConfig {
    /// Probability that each of `awready`, `wready` and `arready` is high in a cycle.
    pub ready_probability: f64,
    /// Cycles between accepting a request and offering its response.
    pub latency: u64,
    /// No response is offered before this cycle.
    pub hold_until: u64,
    /// Byte address ranges answered with SLVERR. Writes to them are dropped.
    pub error_ranges: Vec<Range<u64>>,
}

impl Default for MemoryConfig {
    fn default() -> Self { Self { ready_probability: 1.0, latency: 1, hold_until: 0, error_ranges: vec![] } }
}

#[derive(Debug, Clone)]
enum Response {
    Write(WRes),
    Read(RRes),
}

/// AXI4 subordinate over a sparse memory.
#[derive(Debug)]
pub struct AxiMemory {
    config: MemoryConfig,
    lanes: usize,
    store: HashMap<u64, u8>,
    rng: StdRng,
    cycle: u64,

    /// Write addresses waiting for their data beat.
    aw: VecDeque<Addr>,
    /// Write data beats waiting for their address.
    w: VecDeque<WReq>,
    /// Responses with the cycle they become available.
    responses: VecDeque<(u64, Response)>,

    /// Signals offered this cycle.
    bwd: AxiBwd,
    writes: usize,
    reads: usize,
}

impl AxiMemory {
    /// Creates an empty memory with `lanes`-byte beats.
    pub fn new(lanes: usize, config: MemoryConfig, seed: u64) -> Self {
        let config = MemoryConfig { ready_probability: config.ready_probability.clamp(0.0, 1.0), ..config };
        Self {
            config,
            lanes,
            store: HashMap::new(),
            rng: StdRng::seed_from_u64(seed),
            cycle: 0,
            aw: VecDeque::new(),
            w: VecDeque::new(),
            responses: VecDeque::new(),
            bwd: AxiBwd::default(),
            writes: 0,
            reads: 0,
        }
    }

    /// Signals offered this cycle.
    pub fn bwd(&mut self) -> AxiBwd {
        let mut ready = || Ready::new(self.rng.gen_bool(self.config.ready_probability));
        let (aw, w, ar) = (ready(), ready(), ready());

        let mut bwd = AxiBwd { aw, w, ar, ..Default::default() };
        if let Some((at, response)) = self.responses.front() {
            if *at <= self.cycle && self.cycle >= self.config.hold_until {
                match response {
                    Response::Write(res) => bwd.b = Valid::valid(*res),
                    Response::Read(res) => bwd.r = Valid::valid(res.clone()),
                }
            }
        }

        self.bwd = bwd.clone();
        bwd
    }

    /// Commits the handshakes of this cycle given the manager's signals, and advances a cycle.
    pub fn observe(&mut self, fwd: &AxiFwd) {
        if self.bwd.b.fire(fwd.b) || self.bwd.r.fire(fwd.r) {
            self.responses.pop_front();
        }

        if fwd.aw.fire(self.bwd.aw) {
            self.aw.push_back(fwd.aw.inner);
        }
        if fwd.w.fire(self.bwd.w) {
            self.w.push_back(fwd.w.inner.clone());
        }
        let beats = self.aw.len().min(self.w.len());
        let writes = self.aw.drain(..beats).zip(self.w.drain(..beats)).collect::<Vec<_>>();
        for (aw, w) in writes {
            let resp = self.write(&aw, &w);
            self.respond(Response::Write(WRes { id: aw.id, resp }));
        }

        if fwd.ar.fire(self.bwd.ar) {
            let ar = fwd.ar.inner;
            let (data, resp) = self.read(&ar);
            self.respond(Response::Read(RRes { id: ar.id, data, resp, last: true }));
        }

        self.cycle += 1;
    }

    fn respond(&mut self, response: Response) {
        self.responses.push_back((self.cycle + self.config.latency, response));
    }

    fn is_error(&self, addr: u64) -> bool { self.config.error_ranges.iter().any(|range| range.contains(&addr)) }

    fn write(&mut self, aw: &Addr, w: &WReq) -> Resp {
        self.writes += 1;
        if self.is_error(aw.addr) {
            tracing::debug!(addr = aw.addr, "write to an error range");
            return Resp::SlvErr;
        }
        for lane in w.strb.enabled() {
            self.store.insert(aw.addr + lane as u64, w.data.as_bytes()[lane]);
        }
        Resp::Okay
    }

    fn read(&mut self, ar: &Addr) -> (Word, Resp) {
        self.reads += 1;
        if self.is_error(ar.addr) {
            tracing::debug!(addr = ar.addr, "read from an error range");
            return (Word::zero(self.lanes), Resp::SlvErr);
        }
        let bytes = (0..self.lanes as u64).map(|lane| self.peek(ar.addr + lane)).collect::<Vec<_>>();
        (Word::from_le_bytes(&bytes), Resp::Okay)
    }

    /// Byte at address `addr`.
    pub fn peek(&self, addr: u64) -> u8 { self.store.get(&addr).copied().unwrap_or(0) }

    /// Requests accepted and not yet answered. A write counts once its address beat is accepted.
    pub fn in_flight(&self) -> usize { self.aw.len() + self.responses.len() }

    /// Number of completed write transactions.
    pub fn writes(&self) -> usize { self.writes }

    /// Number of completed read transactions.
    pub fn reads(&self) -> usize { self.reads }
}

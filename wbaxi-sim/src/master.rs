//! Pipelined Wishbone master.
//!
//! Presents a script of requests back to back, holding a request for as long as it is stalled, and
//! matches `ack`/`err` to outstanding requests in order. The bus cycle ends after the first error,
//! after an optional number of requests, or once the script is done and every request answered.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wbaxi::some_or;
use wbaxi_bridge::types::{WbBwd, WbFwd, WbReq};

use crate::error::SimError;

/// Answer to one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// The request.
    pub req: WbReq,
    /// `err` instead of `ack`.
    pub err: bool,
    /// Read data.
    pub data: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Aborted,
}

/// Scripted Wishbone master.
#[derive(Debug)]
pub struct WbMaster {
    script: VecDeque<WbReq>,
    outstanding: VecDeque<WbReq>,
    phase: Phase,
    issued: usize,
    abort_after: Option<usize>,
    gap_probability: f64,
    rng: StdRng,
    cycle: u64,

    /// Request presented in the current cycle.
    presenting: Option<WbReq>,
}

impl WbMaster {
    /// Creates a master running `script`.
    pub fn new(script: impl IntoIterator<Item = WbReq>) -> Self {
        Self {
            script: script.into_iter().collect(),
            outstanding: VecDeque::new(),
            phase: Phase::Active,
            issued: 0,
            abort_after: None,
            gap_probability: 0.0,
            rng: StdRng::seed_from_u64(0),
            cycle: 0,
            presenting: None,
        }
    }

    /// Drops `cyc` as soon as `count` requests are accepted, abandoning the ones in flight.
    pub fn abort_after(self, count: usize) -> Self { Self { abort_after: Some(count), ..self } }

    /// Leaves a cycle without a request with probability `probability` between requests.
    pub fn with_gaps(self, probability: f64, seed: u64) -> Self {
        Self { gap_probability: probability.clamp(0.0, 1.0), rng: StdRng::seed_from_u64(seed), ..self }
    }

    /// Signals of this cycle.
    pub fn fwd(&mut self) -> WbFwd {
        if self.phase == Phase::Aborted {
            self.presenting = None;
            return WbFwd::idle();
        }

        // A stalled request is held; a new one may be delayed by a gap.
        if self.presenting.is_none() && !self.rng.gen_bool(self.gap_probability) {
            self.presenting = self.script.front().copied();
        }

        match self.presenting {
            Some(req) => WbFwd::request(req),
            None if !self.script.is_empty() || !self.outstanding.is_empty() => WbFwd::hold(),
            None => WbFwd::idle(),
        }
    }

    /// Takes the slave's signals of this cycle, returning the answer received, if any.
    pub fn observe(&mut self, fwd: &WbFwd, bwd: &WbBwd) -> Result<Option<Outcome>, SimError> {
        let cycle = self.cycle;
        self.cycle += 1;

        let outcome = if fwd.cyc && (bwd.ack || bwd.err) {
            let req = some_or!(self.outstanding.pop_front(), return Err(SimError::UnexpectedResponse { cycle }));
            Some(Outcome { req, err: bwd.err, data: bwd.data })
        } else {
            None
        };

        if fwd.stb.valid && !bwd.stall {
            let scripted = self.script.pop_front();
            debug_assert_eq!(scripted, Some(fwd.stb.inner), "accepted a request out of script order");
            self.outstanding.push_back(fwd.stb.inner);
            self.presenting = None;
            self.issued += 1;
        }

        if outcome.map_or(false, |outcome| outcome.err) || self.abort_after.map_or(false, |n| self.issued >= n) {
            tracing::debug!(cycle, abandoned = self.outstanding.len(), skipped = self.script.len(), "bus cycle ends");
            self.phase = Phase::Aborted;
            self.outstanding.clear();
            self.script.clear();
        }

        Ok(outcome)
    }

    /// Returns whether every request was answered or abandoned.
    pub fn done(&self) -> bool {
        self.phase == Phase::Aborted || (self.script.is_empty() && self.outstanding.is_empty())
    }

    /// Number of requests accepted by the slave.
    pub fn issued(&self) -> usize { self.issued }

    /// Number of requests waiting for an answer.
    pub fn outstanding(&self) -> usize { self.outstanding.len() }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn stall() -> WbBwd { WbBwd { stall: true, ..Default::default() } }

    fn ack(data: u64) -> WbBwd { WbBwd { ack: true, data, ..Default::default() } }

    #[test]
    fn holds_stalled_request_and_matches_acks() {
        let mut master = WbMaster::new([WbReq::read(1), WbReq::read(2)]);

        let fwd = master.fwd();
        assert_eq!(fwd, WbFwd::request(WbReq::read(1)));
        master.observe(&fwd, &stall()).unwrap();

        let fwd = master.fwd();
        assert_eq!(fwd, WbFwd::request(WbReq::read(1)));
        master.observe(&fwd, &WbBwd::default()).unwrap();

        let fwd = master.fwd();
        assert_eq!(fwd, WbFwd::request(WbReq::read(2)));
        let outcome = master.observe(&fwd, &ack(7)).unwrap();
        assert_eq!(outcome, Some(Outcome { req: WbReq::read(1), err: false, data: 7 }));

        let fwd = master.fwd();
        assert_eq!(fwd, WbFwd::hold());
        master.observe(&fwd, &ack(8)).unwrap();
        assert!(master.done());
        assert_eq!(master.fwd(), WbFwd::idle());
    }

    #[test]
    fn error_ends_the_cycle() {
        let mut master = WbMaster::new((0..4).map(WbReq::read));
        for _ in 0..2 {
            let fwd = master.fwd();
            master.observe(&fwd, &WbBwd::default()).unwrap();
        }
        let fwd = master.fwd();
        let outcome = master.observe(&fwd, &WbBwd { err: true, ..Default::default() }).unwrap();
        assert!(outcome.map_or(false, |outcome| outcome.err));
        assert!(master.done());
        assert_eq!(master.fwd(), WbFwd::idle());
    }

    #[test]
    fn unexpected_ack() {
        let mut master = WbMaster::new(Vec::new());
        assert_eq!(master.observe(&WbFwd::hold(), &ack(0)), Err(SimError::UnexpectedResponse { cycle: 0 }));
    }

    #[test]
    #[should_panic(expected = "out of script order")]
    fn accepts_only_the_scripted_request() {
        let mut master = WbMaster::new([WbReq::read(1), WbReq::read(2)]);
        let _ = master.fwd();
        let _ = master.observe(&WbFwd::request(WbReq::read(2)), &WbBwd::default());
    }

    #[test]
    fn abort_after_count() {
        let mut master = WbMaster::new((0..4).map(WbReq::read)).abort_after(2);
        for _ in 0..2 {
            let fwd = master.fwd();
            master.observe(&fwd, &WbBwd::default()).unwrap();
        }
        assert!(master.done());
        assert_eq!(master.issued(), 2);
        assert_eq!(master.outstanding(), 0);
    }
}

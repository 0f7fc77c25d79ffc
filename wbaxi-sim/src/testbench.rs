//! Testbench wiring a Wishbone master, the bridge and an AXI memory.
//!
//! Each cycle the memory offers its readies and response first, the bridge ticks, and then both
//! ends commit the handshakes they observed. The bridge's counters are checked against the
//! transactions visible on the buses after every cycle.

use std::fmt;

use wbaxi::Instance;
use wbaxi_bridge::{Bridge, Config, State};

use crate::error::SimError;
use crate::master::{Outcome, WbMaster};
use crate::memory::{AxiMemory, MemoryConfig};
use crate::shadow::ShadowMemory;

/// Summary of a run.
#[allow(missing_docs)]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub cycles: u64,
    pub acks: usize,
    pub errs: usize,
    pub reads_checked: usize,
    pub max_pending: usize,
    pub full_cycles: u64,
    pub stall_cycles: u64,
    pub flushes: usize,
    pub direction_changes: usize,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cycles, {} acks ({} reads checked), {} errs, max pending {}, full for {} cycles, stalled for {} \
             cycles, {} flushes, {} direction changes",
            self.cycles,
            self.acks,
            self.reads_checked,
            self.errs,
            self.max_pending,
            self.full_cycles,
            self.stall_cycles,
            self.flushes,
            self.direction_changes
        )
    }
}

/// Master, bridge and memory under one clock.
#[derive(Debug)]
pub struct Testbench {
    bridge: Instance<Bridge>,
    master: WbMaster,
    memory: AxiMemory,
    shadow: ShadowMemory,
    report: Report,
}

impl Testbench {
    /// Creates a testbench.
    pub fn new(config: Config, master: WbMaster, memory: MemoryConfig, seed: u64) -> Self {
        Self {
            bridge: Instance::new(Bridge::new(config)),
            master,
            memory: AxiMemory::new(config.axi_data_bytes(), memory, seed),
            shadow: ShadowMemory::new(config.data_bytes()),
            report: Report::default(),
        }
    }

    /// Registers of the bridge.
    pub fn state(&self) -> &State { self.bridge.state() }

    /// The memory model.
    pub fn memory(&self) -> &AxiMemory { &self.memory }

    /// The reference memory.
    pub fn shadow(&self) -> &ShadowMemory { &self.shadow }

    /// Summary so far.
    pub fn report(&self) -> &Report { &self.report }

    /// Returns whether the master is done and the bridge idle.
    pub fn is_idle(&self) -> bool {
        let state = self.state();
        self.master.done() && state.empty() && !state.flushing() && !state.stalled()
    }

    /// Advances one cycle.
    pub fn step(&mut self) -> Result<(), SimError> {
        let i_fwd = self.master.fwd();
        let o_bwd = self.memory.bwd();
        let prev = self.bridge.state().clone();

        let (o_fwd, i_bwd) = self.bridge.tick(&i_fwd, &o_bwd)?;
        self.memory.observe(&o_fwd);
        let outcome = self.master.observe(&i_fwd, &i_bwd)?;
        if let Some(outcome) = outcome {
            self.record(outcome)?;
        }

        self.check(&prev)?;
        Ok(())
    }

    /// Runs until idle.
    pub fn run(&mut self, max_cycles: u64) -> Result<Report, SimError> {
        while !self.is_idle() {
            if self.report.cycles >= max_cycles {
                return Err(SimError::Timeout(max_cycles));
            }
            self.step()?;
        }
        tracing::info!(report = %self.report, "finished");
        Ok(self.report.clone())
    }

    fn record(&mut self, outcome: Outcome) -> Result<(), SimError> {
        let Outcome { req, err, data } = outcome;
        if err {
            self.report.errs += 1;
            return Ok(());
        }

        self.report.acks += 1;
        if req.we {
            self.shadow.write(req.addr, req.data, req.sel);
        } else {
            self.shadow.check(req.addr, data)?;
            self.report.reads_checked += 1;
        }
        Ok(())
    }

    fn check(&mut self, prev: &State) -> Result<(), SimError> {
        let cycle = self.bridge.cycle();
        let next = self.bridge.state();
        let violation = |what: String| Err(SimError::Invariant { cycle, what });

        let pending = next.pending();
        if pending > next.capacity() {
            return violation(format!("pending {} above capacity {}", pending, next.capacity()));
        }
        if next.empty() != (pending == 0) || next.full() != (pending == next.capacity()) {
            return violation(format!("empty/full flags disagree with pending {}", pending));
        }
        if next.nearfull() != (pending + 1 >= next.capacity()) {
            return violation(format!("nearfull flag disagrees with pending {}", pending));
        }
        if prev.full() && pending > prev.pending() {
            return violation("admitted while full".to_string());
        }
        if !prev.empty() && next.direction() != prev.direction() {
            return violation(format!("{} admitted while {}s are in flight", next.direction(), prev.direction()));
        }
        if let Some(len) = next.subword_len() {
            if len != pending {
                return violation(format!("sub-word queue holds {} offsets for {} pending", len, pending));
            }
        }

        // Admitted requests are either still in a driver or accepted by the memory.
        let in_driver = usize::from(next.write_driver().aw.valid) + usize::from(next.read_driver().ar.valid);
        let visible = self.memory.in_flight() + in_driver;
        if pending != visible {
            return violation(format!("pending {} but {} requests on the bus", pending, visible));
        }

        let report = &mut self.report;
        report.cycles = cycle;
        report.max_pending = report.max_pending.max(pending);
        report.full_cycles += u64::from(next.full());
        report.stall_cycles += u64::from(next.stalled());
        report.flushes += usize::from(next.flushing() && !prev.flushing());
        report.direction_changes += usize::from(prev.empty() && !next.empty() && next.direction() != prev.direction());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use wbaxi_bridge::types::WbReq;
    use wbaxi_bridge::Preset;

    use super::*;

    #[test]
    fn single_write_and_read() {
        let script = [WbReq::write(5, 0x1234_5678, 0xf), WbReq::read(5)];
        let config = Config::preset(Preset::Wb32Axi128);
        let mut tb = Testbench::new(config, WbMaster::new(script), MemoryConfig::default(), 0);
        let report = tb.run(100).unwrap();
        assert_eq!((report.acks, report.reads_checked, report.errs), (2, 1, 0));
        assert_eq!(tb.shadow().read(5), 0x1234_5678);
        assert_eq!(tb.memory().peek(0x14), 0x78);
    }

    #[test]
    fn timeout() {
        let memory = MemoryConfig { hold_until: u64::MAX, ..Default::default() };
        let mut tb = Testbench::new(Config::preset(Preset::Wb32Axi32), WbMaster::new([WbReq::read(0)]), memory, 0);
        assert_eq!(tb.run(20), Err(SimError::Timeout(20)));
    }
}

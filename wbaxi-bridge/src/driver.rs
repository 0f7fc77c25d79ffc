//! AXI request channel drivers.
//!
//! Each driver is a set of output registers that hold a request until the peer's ready. Bursts are
//! single-beat. Payload registers keep their stale contents while invalid.

use wbaxi_std::{Ready, Valid};

use crate::config::Config;
use crate::constants::axi;
use crate::lane::ByteLanes;
use crate::types::{Addr, WReq, WbReq};

/// Address beat for the Wishbone word address `addr`.
fn addr_beat(config: &Config, lanes: &ByteLanes, id: u32, addr: u64) -> Addr {
    Addr {
        id,
        addr: lanes.axi_addr(addr),
        len: axi::LEN,
        size: config.axi_size(),
        burst: axi::BURST,
        lock: axi::LOCK,
        cache: axi::CACHE,
        prot: axi::PROT,
        qos: axi::QOS,
    }
}

/// Returns the next value of one output register.
fn register<V: Clone>(current: &Valid<V>, ready: Ready, load: Option<V>) -> Valid<V> {
    match load {
        Some(inner) => Valid::valid(inner),
        None if current.fire(ready) => Valid::new(false, current.inner.clone()),
        None => current.clone(),
    }
}

/// Drives `aw` and `w`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteChannelDriver {
    /// Write address register.
    pub aw: Valid<Addr>,
    /// Write data register.
    pub w: Valid<WReq>,
}

impl WriteChannelDriver {
    /// Address and data beats of a Wishbone write.
    pub fn beats(config: &Config, lanes: &ByteLanes, req: &WbReq) -> (Addr, WReq) {
        let offset = lanes.offset(req.addr);
        let aw = addr_beat(config, lanes, config.write_id(), req.addr);
        let w = WReq { data: lanes.write_data(req.data), strb: lanes.strobe(req.sel, offset), last: true };
        (aw, w)
    }

    /// Returns whether a new write can be loaded this cycle: both registers are empty or being
    /// accepted.
    pub fn is_free(&self, aw_ready: Ready, w_ready: Ready) -> bool {
        (!self.aw.valid || aw_ready.ready) && (!self.w.valid || w_ready.ready)
    }

    /// Computes the next registers. `load` must only be given when [`Self::is_free`] holds.
    pub fn logic(&self, load: Option<(Addr, WReq)>, aw_ready: Ready, w_ready: Ready) -> Self {
        debug_assert!(load.is_none() || self.is_free(aw_ready, w_ready));
        let (aw, w) = load.unzip();
        Self { aw: register(&self.aw, aw_ready, aw), w: register(&self.w, w_ready, w) }
    }
}

/// Drives `ar`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReadChannelDriver {
    /// Read address register.
    pub ar: Valid<Addr>,
}

impl ReadChannelDriver {
    /// Address beat of a Wishbone read.
    pub fn beat(config: &Config, lanes: &ByteLanes, req: &WbReq) -> Addr {
        addr_beat(config, lanes, config.read_id(), req.addr)
    }

    /// Returns whether a new read can be loaded this cycle.
    pub fn is_free(&self, ar_ready: Ready) -> bool { !self.ar.valid || ar_ready.ready }

    /// Computes the next register. `load` must only be given when [`Self::is_free`] holds.
    pub fn logic(&self, load: Option<Addr>, ar_ready: Ready) -> Self {
        debug_assert!(load.is_none() || self.is_free(ar_ready));
        Self { ar: register(&self.ar, ar_ready, load) }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::Burst;

    fn setup() -> (Config, ByteLanes) {
        let config = Config::new(32, 30, 128, 32, 6).unwrap().with_ids(2, 7);
        (config, ByteLanes::new(&config))
    }

    #[test]
    fn write_beats() {
        let (config, lanes) = setup();
        let (aw, w) = WriteChannelDriver::beats(&config, &lanes, &WbReq::write(0x13, 0xdead_beef, 0b0011));
        assert_eq!(
            aw,
            Addr { id: 2, addr: 0x40, len: 0, size: 4, burst: Burst::Incr, lock: false, cache: 0, prot: 0b010, qos: 0 }
        );
        assert_eq!(w.strb.low_u16(), 0x3000);
        assert_eq!(w.data.low_u128(), 0xdead_beef_dead_beef_dead_beef_dead_beef);
        assert!(w.last);
        assert_eq!(ReadChannelDriver::beat(&config, &lanes, &WbReq::read(0x13)).id, 7);
    }

    #[test]
    fn write_waits_for_both_channels() {
        let (config, lanes) = setup();
        let driver = WriteChannelDriver::default();
        let beats = WriteChannelDriver::beats(&config, &lanes, &WbReq::write(0, 1, 0xf));

        // `aw` accepted, `w` stalled.
        let driver = driver.logic(Some(beats), Ready::new(false), Ready::new(false));
        let driver = driver.logic(None, Ready::new(true), Ready::new(false));
        assert!(!driver.aw.valid && driver.w.valid);
        assert!(!driver.is_free(Ready::new(true), Ready::new(false)));
        assert!(driver.is_free(Ready::new(false), Ready::new(true)));

        let driver = driver.logic(None, Ready::new(false), Ready::new(true));
        assert!(!driver.aw.valid && !driver.w.valid);
        assert_eq!(driver.w.inner.data.low_u32(), 1);
    }

    #[test]
    fn read_register_holds_until_ready() {
        let (config, lanes) = setup();
        let beat = ReadChannelDriver::beat(&config, &lanes, &WbReq::read(4));
        let driver = ReadChannelDriver::default().logic(Some(beat), Ready::new(false));
        let held = driver.logic(None, Ready::new(false));
        assert_eq!(held, driver);

        // Back-to-back: the accepted beat is replaced in the same cycle.
        let next = ReadChannelDriver::beat(&config, &lanes, &WbReq::read(8));
        let driver = held.logic(Some(next), Ready::new(true));
        assert_eq!(driver.ar, Valid::valid(next));
    }
}

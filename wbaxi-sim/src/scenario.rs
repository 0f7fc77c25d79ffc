//! Named scenarios.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wbaxi::mask_u64;
use wbaxi_bridge::types::WbReq;
use wbaxi_bridge::Config;

use crate::error::SimError;
use crate::master::WbMaster;
use crate::memory::MemoryConfig;
use crate::testbench::{Report, Testbench};

/// Traffic pattern of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Writes to a block of words, then reads them back.
    RoundTrip,
    /// Writes and reads interleaved, forcing a direction change per request.
    DirectionLock,
    /// More reads than the pending queue holds while the memory withholds responses.
    Backpressure,
    /// Writes where one returns SLVERR; the rest drain silently.
    Flush,
    /// Reads abandoned by dropping `cyc` with work in flight.
    Abort,
    /// Seeded random reads and writes under random readies, latencies and gaps.
    Random,
}

impl Scenario {
    /// Every scenario.
    pub const ALL: [Scenario; 6] = [
        Scenario::RoundTrip,
        Scenario::DirectionLock,
        Scenario::Backpressure,
        Scenario::Flush,
        Scenario::Abort,
        Scenario::Random,
    ];

    /// Scenario name.
    pub fn name(self) -> &'static str {
        match self {
            Self::RoundTrip => "round-trip",
            Self::DirectionLock => "direction-lock",
            Self::Backpressure => "backpressure",
            Self::Flush => "flush",
            Self::Abort => "abort",
            Self::Random => "random",
        }
    }

    /// Builds the testbench of this scenario.
    pub fn testbench(self, config: Config, seed: u64) -> Testbench {
        let size = config.data_bytes();
        let sel = u8::MAX >> (8 - size);
        let mask = mask_u64(size * 8);
        let pattern = |addr: u64| (0x0123_4567_89ab_cdef_u64 ^ addr.wrapping_mul(0x0101_0101_0101_0101)) & mask;

        let (master, memory) = match self {
            Self::RoundTrip => {
                let writes = (0..16).map(|addr| WbReq::write(addr, pattern(addr), sel));
                let reads = (0..16).map(WbReq::read);
                (WbMaster::new(writes.chain(reads)), MemoryConfig::default())
            }
            Self::DirectionLock => {
                let script = (0..16).flat_map(|addr| [WbReq::write(addr, pattern(addr), sel), WbReq::read(addr)]);
                (WbMaster::new(script), MemoryConfig { latency: 3, ..Default::default() })
            }
            Self::Backpressure => {
                let capacity = config.capacity() as u64;
                let memory = MemoryConfig { hold_until: 4 * capacity, ..Default::default() };
                (WbMaster::new((0..capacity + 8).map(WbReq::read)), memory)
            }
            Self::Flush => {
                // One word per AXI beat; the third beat fails.
                let ratio = config.ratio() as u64;
                let beat = config.axi_data_bytes() as u64;
                let script = (0..8).map(|i| WbReq::write(i * ratio, pattern(i), sel));
                let memory = MemoryConfig { latency: 4, error_ranges: vec![2 * beat..3 * beat], ..Default::default() };
                (WbMaster::new(script), memory)
            }
            Self::Abort => {
                let memory = MemoryConfig { latency: 6, ..Default::default() };
                (WbMaster::new((0..8).map(WbReq::read)).abort_after(4), memory)
            }
            Self::Random => {
                let mut rng = StdRng::seed_from_u64(seed);
                let script = (0..500)
                    .map(|_| {
                        let addr = rng.gen_range(0..64);
                        if rng.gen_bool(0.5) {
                            WbReq::write(addr, rng.gen::<u64>() & mask, rng.gen::<u8>() & sel)
                        } else {
                            WbReq::read(addr)
                        }
                    })
                    .collect::<Vec<_>>();
                let latency = rng.gen_range(1..5);
                let memory = MemoryConfig { ready_probability: 0.7, latency, ..Default::default() };
                (WbMaster::new(script).with_gaps(0.2, seed), memory)
            }
        };

        tracing::debug!(scenario = %self, ?config, "testbench");
        Testbench::new(config, master, memory, seed)
    }

    /// Runs this scenario to completion.
    pub fn run(self, config: Config, seed: u64, max_cycles: u64) -> Result<Report, SimError> {
        self.testbench(config, seed).run(max_cycles)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.pad(self.name()) }
}

impl FromStr for Scenario {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == s)
            .ok_or_else(|| SimError::UnknownScenario(s.to_string()))
    }
}

//! Byte lane mapping between a Wishbone word and an AXI beat.
//!
//! With `R` Wishbone words per AXI beat, the word at address `addr` sits at sub-word offset
//! `k = addr mod R`, which covers byte lanes `k * size .. (k + 1) * size` of the beat. One shift
//! covers every ratio.

use wbaxi::{flog2, mask_u64, Strobe, Word};

use crate::config::Config;

/// Byte lane mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteLanes {
    /// Bytes per Wishbone word.
    size: usize,
    /// Wishbone words per AXI beat.
    ratio: usize,
    /// log2 of `size`.
    shift: usize,
    /// Bytes per AXI beat.
    axi_lanes: usize,
    /// Valid AXI address bits.
    axi_addr_mask: u64,
}

impl ByteLanes {
    /// Creates the mapper of a configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            size: config.data_bytes(),
            ratio: config.ratio(),
            shift: flog2(config.data_bytes()),
            axi_lanes: config.axi_data_bytes(),
            axi_addr_mask: mask_u64(config.axi_addr_width()),
        }
    }

    /// Sub-word offset of the Wishbone word address `addr`.
    pub fn offset(&self, addr: u64) -> usize { (addr & (self.ratio as u64 - 1)) as usize }

    /// First byte lane of sub-word offset `offset`.
    pub fn lane(&self, offset: usize) -> usize { offset * self.size }

    /// Byte address of the AXI beat holding the Wishbone word address `addr`.
    pub fn axi_addr(&self, addr: u64) -> u64 {
        (addr << self.shift) & !(self.axi_lanes as u64 - 1) & self.axi_addr_mask
    }

    /// Write strobe: `sel` shifted to the lanes of `offset`, every other lane disabled.
    pub fn strobe(&self, sel: u8, offset: usize) -> Strobe {
        let mut strobe = Strobe::none(self.axi_lanes);
        strobe.enable(self.lane(offset), self.size, u64::from(sel));
        strobe
    }

    /// Write data: the Wishbone word replicated over every sub-word slot.
    pub fn write_data(&self, data: u64) -> Word {
        Word::replicate(self.axi_lanes, data & mask_u64(self.size * 8), self.size)
    }

    /// Read data: the Wishbone word at sub-word offset `offset` of an AXI beat.
    pub fn read_data(&self, beat: &Word, offset: usize) -> u64 { beat.get(self.lane(offset), self.size) }
}

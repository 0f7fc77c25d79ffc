//! Constants for the bridge.

use static_assertions::const_assert;
use wbaxi::{flog2, MAX_LANES};

use crate::types::Burst;

/// Supported Wishbone data widths.
pub const DATA_WIDTHS: [usize; 4] = [8, 16, 32, 64];

/// Largest supported ratio of AXI data width to Wishbone data width. Ratios are powers of two.
pub const MAX_RATIO: usize = 32;

/// Largest supported log2 of the pending queue depth.
pub const MAX_LGFIFO: usize = 8;

// The widest configuration must fit in a wide word.
const_assert!(64 * MAX_RATIO <= MAX_LANES * 8);

/// Attributes driven on every AXI request.
pub mod axi {
    use super::Burst;

    /// Single beat (beats minus one).
    pub const LEN: u8 = 0;
    /// Incrementing burst, ignored for single beats.
    pub const BURST: Burst = Burst::Incr;
    /// Normal access.
    pub const LOCK: bool = false;
    /// Non-bufferable, non-cacheable.
    pub const CACHE: u8 = 0b0000;
    /// Unprivileged, non-secure, data access.
    pub const PROT: u8 = 0b010;
    /// No QoS scheme.
    pub const QOS: u8 = 0;
}

/// Constants for `wb32_axi32`.
#[allow(missing_docs)]
pub mod wb32_axi32 {
    pub const DATA_WIDTH: usize = 32;
    pub const ADDR_WIDTH: usize = 30;
    pub const AXI_DATA_WIDTH: usize = 32;
    pub const AXI_ADDR_WIDTH: usize = 32;
    pub const LGFIFO: usize = 6;
}

/// Constants for `wb32_axi128`.
#[allow(missing_docs)]
pub mod wb32_axi128 {
    pub const DATA_WIDTH: usize = 32;
    pub const ADDR_WIDTH: usize = 30;
    pub const AXI_DATA_WIDTH: usize = 128;
    pub const AXI_ADDR_WIDTH: usize = 32;
    pub const LGFIFO: usize = 6;
}

/// Constants for `wb8_axi256`.
#[allow(missing_docs)]
pub mod wb8_axi256 {
    pub const DATA_WIDTH: usize = 8;
    pub const ADDR_WIDTH: usize = 32;
    pub const AXI_DATA_WIDTH: usize = 256;
    pub const AXI_ADDR_WIDTH: usize = 32;
    pub const LGFIFO: usize = 5;
}

/// Constants for `wb64_axi512`.
#[allow(missing_docs)]
pub mod wb64_axi512 {
    pub const DATA_WIDTH: usize = 64;
    pub const ADDR_WIDTH: usize = 29;
    pub const AXI_DATA_WIDTH: usize = 512;
    pub const AXI_ADDR_WIDTH: usize = 32;
    pub const LGFIFO: usize = 4;
}

macro_rules! const_assert_preset {
    ($($preset:ident),*) => {
        $(
            const_assert!($preset::AXI_ADDR_WIDTH == $preset::ADDR_WIDTH + flog2($preset::DATA_WIDTH / 8));
            const_assert!($preset::AXI_DATA_WIDTH % $preset::DATA_WIDTH == 0);
            const_assert!($preset::AXI_DATA_WIDTH / $preset::DATA_WIDTH <= MAX_RATIO);
            const_assert!($preset::AXI_ADDR_WIDTH <= 64);
            const_assert!($preset::LGFIFO >= 1 && $preset::LGFIFO <= MAX_LGFIFO);
        )*
    };
}

const_assert_preset!(wb32_axi32, wb32_axi128, wb8_axi256, wb64_axi512);

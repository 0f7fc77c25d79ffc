//! Wishbone B4 pipelined interface.
//!
//! Addresses are word addresses of the Wishbone data width. `sel` holds one bit per byte of the
//! data word.

use wbaxi::Interface;
use wbaxi_std::Valid;

/// i_wb_we, i_wb_addr, i_wb_data, i_wb_sel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WbReq {
    /// Write enable.
    pub we: bool,
    /// Word address.
    pub addr: u64,
    /// Write data.
    pub data: u64,
    /// Byte select.
    pub sel: u8,
}

impl WbReq {
    /// Read of every byte of the word at `addr`.
    pub fn read(addr: u64) -> Self { Self { we: false, addr, data: 0, sel: u8::MAX } }

    /// Write of the bytes selected by `sel`.
    pub fn write(addr: u64, data: u64, sel: u8) -> Self { Self { we: true, addr, data, sel } }
}

/// Master to slave signals. `stb` is the valid bit of the request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WbFwd {
    /// Bus cycle in progress.
    pub cyc: bool,
    /// Strobe with the request.
    pub stb: Valid<WbReq>,
}

impl WbFwd {
    /// No bus cycle.
    pub fn idle() -> Self { Self::default() }

    /// Bus cycle held open without a new request.
    pub fn hold() -> Self { Self { cyc: true, stb: Valid::invalid() } }

    /// Bus cycle with a request.
    pub fn request(req: WbReq) -> Self { Self { cyc: true, stb: Valid::valid(req) } }
}

/// o_wb_stall, o_wb_ack, o_wb_err, o_wb_data.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WbBwd {
    /// The request presented this cycle is not taken.
    pub stall: bool,
    /// Oldest outstanding request completed.
    pub ack: bool,
    /// Oldest outstanding request failed.
    pub err: bool,
    /// Read data, meaningful with `ack` of a read.
    pub data: u64,
}

/// Wishbone pipelined interface.
#[derive(Debug)]
pub struct Wishbone;

impl Interface for Wishbone {
    type Bwd = WbBwd;
    type Fwd = WbFwd;
}

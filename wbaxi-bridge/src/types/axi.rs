//! AXI4 interface.

use wbaxi::{Interface, Strobe, Word};
use wbaxi_std::{Ready, Valid};

/// xRESP.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resp {
    /// Normal access success.
    #[default]
    Okay,
    /// Exclusive access success.
    ExOkay,
    /// Subordinate error.
    SlvErr,
    /// Decode error.
    DecErr,
}

impl Resp {
    /// Encoded value.
    pub fn bits(self) -> u8 {
        match self {
            Self::Okay => 0b00,
            Self::ExOkay => 0b01,
            Self::SlvErr => 0b10,
            Self::DecErr => 0b11,
        }
    }

    /// Whether the status is an error (bit 1 set).
    pub fn is_err(self) -> bool { self.bits() & 0b10 != 0 }
}

/// AxBURST.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Burst {
    /// Same address every beat.
    Fixed,
    /// Incrementing address.
    #[default]
    Incr,
    /// Wrapping address.
    Wrap,
}

/// m_axi_aw*, m_axi_ar*.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Addr {
    /// Transaction ID.
    pub id: u32,
    /// Byte address of the first beat.
    pub addr: u64,
    /// Beats minus one.
    pub len: u8,
    /// log2 of bytes per beat.
    pub size: u8,
    /// Burst type.
    pub burst: Burst,
    /// Exclusive access.
    pub lock: bool,
    /// Memory attributes.
    pub cache: u8,
    /// Protection attributes.
    pub prot: u8,
    /// Quality of service.
    pub qos: u8,
}

/// m_axi_w*.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct WReq {
    /// Write data.
    pub data: Word,
    /// Byte strobes.
    pub strb: Strobe,
    /// Last beat of the burst.
    pub last: bool,
}

/// m_axi_b*.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WRes {
    /// Transaction ID.
    pub id: u32,
    /// Write status.
    pub resp: Resp,
}

/// m_axi_r*.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct RRes {
    /// Transaction ID.
    pub id: u32,
    /// Read data.
    pub data: Word,
    /// Read status.
    pub resp: Resp,
    /// Last beat of the burst.
    pub last: bool,
}

/// Manager to subordinate signals.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AxiFwd {
    /// Write address channel.
    pub aw: Valid<Addr>,
    /// Write data channel.
    pub w: Valid<WReq>,
    /// bready.
    pub b: Ready,
    /// Read address channel.
    pub ar: Valid<Addr>,
    /// rready.
    pub r: Ready,
}

/// Subordinate to manager signals.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AxiBwd {
    /// awready.
    pub aw: Ready,
    /// wready.
    pub w: Ready,
    /// Write response channel.
    pub b: Valid<WRes>,
    /// arready.
    pub ar: Ready,
    /// Read data channel.
    pub r: Valid<RRes>,
}

impl AxiBwd {
    /// Every request channel ready, no response.
    pub fn ready() -> Self {
        Self { aw: Ready::new(true), w: Ready::new(true), ar: Ready::new(true), ..Default::default() }
    }
}

/// AXI4 manager interface.
#[derive(Debug)]
pub struct Axi;

impl Interface for Axi {
    type Bwd = AxiBwd;
    type Fwd = AxiFwd;
}

//! Harness errors.

use thiserror::Error;
use wbaxi_bridge::{BridgeError, ConfigError};

#[allow(missing_docs)]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("read of word {addr:#x} returned {got:#x}, expected {expected:#x}")]
    Mismatch { addr: u64, got: u64, expected: u64 },

    #[error("Wishbone response at cycle {cycle} with no request outstanding")]
    UnexpectedResponse { cycle: u64 },

    #[error("invariant violated at cycle {cycle}: {what}")]
    Invariant { cycle: u64, what: String },

    #[error("not finished after {0} cycles")]
    Timeout(u64),

    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),
}

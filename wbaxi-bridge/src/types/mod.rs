//! Types for the bridge's interfaces.

pub mod axi;
pub mod wishbone;

pub use axi::*;
pub use wishbone::*;

//! Simulation harness for the Wishbone to AXI4 bridge: an AXI memory model, a scripted Wishbone
//! master, a reference memory and the testbench tying them to the bridge.

// # Tries to deny all lints (`rustc -W help`).
#![deny(absolute_paths_not_starting_with_crate)]
#![deny(anonymous_parameters)]
#![deny(explicit_outlives_requirements)]
#![deny(keyword_idents)]
#![deny(macro_use_extern_crate)]
#![deny(missing_debug_implementations)]
#![deny(non_ascii_idents)]
#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![deny(unused_extern_crates)]
#![deny(unused_import_braces)]
//
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod master;
pub mod memory;
pub mod scenario;
pub mod shadow;
pub mod testbench;

pub use error::SimError;
pub use master::WbMaster;
pub use memory::{AxiMemory, MemoryConfig};
pub use scenario::Scenario;
pub use shadow::ShadowMemory;
pub use testbench::{Report, Testbench};

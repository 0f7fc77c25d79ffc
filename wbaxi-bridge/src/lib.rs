//! Pipelined Wishbone (B4) to AXI4 bridge, modelled cycle by cycle.
//!
//! [`Bridge`] implements [`wbaxi::Fsm`] between a Wishbone slave port and an AXI4 manager port.
//! Drive it with [`wbaxi::Instance`].

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
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(rustdoc::invalid_codeblock_attributes)]
#![deny(rustdoc::invalid_html_tags)]
#![deny(rustdoc::bare_urls)]

pub mod bridge;
pub mod config;
pub mod constants;
pub mod direction;
pub mod driver;
pub mod flow;
pub mod flush;
pub mod lane;
pub mod response;
pub mod subword;
pub mod types;

pub use bridge::{Bridge, BridgeError, State};
pub use config::{Config, ConfigError, Preset};
pub use direction::Direction;

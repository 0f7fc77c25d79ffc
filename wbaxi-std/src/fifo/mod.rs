//! FIFOs.

use thiserror::Error;

mod one_read_one_write;
pub mod tracker;

pub use one_read_one_write::*;

#[allow(missing_docs)]
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FifoError {
    #[error("enqueue into a full FIFO of {slots} slots")]
    Full { slots: usize },

    #[error("dequeue from an empty FIFO")]
    Empty,
}

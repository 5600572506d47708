//! Output adapters for emitted CIDR blocks.
//!
//! The engine hands finished blocks to an [`OutputSink`] and makes no
//! promises about buffering or destination:
//! - [`terminal`] - stdout writers, plain and diff-style
//! - [`collect`] - in-memory collector for library callers and tests

mod collect;
mod terminal;

pub use collect::BlockCollector;
pub use terminal::{DiffWriter, PlainWriter};

use crate::models::{Address, Cidr};

/// Receives one block at a time, in ascending-address, non-overlapping
/// order.
pub trait OutputSink<A: Address> {
    fn emit(&mut self, block: &Cidr<A>);
}

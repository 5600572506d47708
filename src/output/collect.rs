//! In-memory block collector.

use super::OutputSink;
use crate::models::{Address, Cidr};

/// Collects emitted blocks into a vector, for library callers that want
/// the result set rather than printed lines.
#[derive(Debug)]
pub struct BlockCollector<A: Address> {
    pub blocks: Vec<Cidr<A>>,
}

impl<A: Address> BlockCollector<A> {
    pub fn new() -> BlockCollector<A> {
        BlockCollector { blocks: Vec::new() }
    }
}

impl<A: Address> Default for BlockCollector<A> {
    fn default() -> Self {
        BlockCollector::new()
    }
}

impl<A: Address> OutputSink<A> for BlockCollector<A> {
    fn emit(&mut self, block: &Cidr<A>) {
        self.blocks.push(*block);
    }
}

//! Terminal output writers.

use colored::Colorize;

use super::OutputSink;
use crate::models::{Address, Cidr};

/// Writes one `addr/prefix` line per block to stdout.
#[derive(Debug, Default)]
pub struct PlainWriter;

impl<A: Address> OutputSink<A> for PlainWriter {
    fn emit(&mut self, block: &Cidr<A>) {
        println!("{block}");
    }
}

/// Writes blocks prefixed diff-style: `+` for blocks added in the second
/// set, `-` for blocks only present in the first.
#[derive(Debug)]
pub struct DiffWriter {
    added: bool,
}

impl DiffWriter {
    pub fn added() -> DiffWriter {
        DiffWriter { added: true }
    }

    pub fn removed() -> DiffWriter {
        DiffWriter { added: false }
    }
}

impl<A: Address> OutputSink<A> for DiffWriter {
    fn emit(&mut self, block: &Cidr<A>) {
        if self.added {
            println!("{}", format!("+{block}").green());
        } else {
            println!("{}", format!("-{block}").red());
        }
    }
}

//! Set operations (union, intersection, difference) over two collections
//! of IP address ranges expressed as CIDR blocks, e.g. two routing-table
//! snapshots.
//!
//! Every block of both sets is expanded into open/close boundary markers;
//! the sorted marker sequence is swept once while per-set open-interval
//! counters feed a comparison kernel, and each maximal matching range is
//! collapsed back into minimal CIDR blocks.

pub mod models;
pub mod output;
pub mod processing;
mod read_routes;

use std::error::Error;
use std::path::Path;

use regex::Regex;

use models::{AddrError, Address, Cidr};
use output::{BlockCollector, DiffWriter, OutputSink, PlainWriter};
use processing::{sort_markers, sweep, Kernel, Marker, MarkerCollector};

pub use read_routes::{
    compile_line_pattern, default_line_pattern, read_routes, DEFAULT_IPV4_PATTERN,
    DEFAULT_IPV6_PATTERN,
};

/// Read both route files, merge their boundary markers and print the
/// result of the requested operation to stdout.
///
/// Symmetric kernels print plain `addr/prefix` lines; the difference
/// kernel prints `+` lines (present in B, not A) and `-` lines (present
/// in A, not B).
pub fn compare_route_files<A: Address>(
    file_a: &Path,
    file_b: &Path,
    pattern: &Regex,
    kernel: Kernel,
) -> Result<(), Box<dyn Error>> {
    let mut markers: Vec<Marker<A>> = Vec::new();
    {
        let mut collect = MarkerCollector::set_a(&mut markers);
        read_routes(file_a, pattern, &mut collect)?;
    }
    {
        let mut collect = MarkerCollector::set_b(&mut markers);
        read_routes(file_b, pattern, &mut collect)?;
    }
    sort_markers(&mut markers);
    log::info!("sweeping {} boundary markers", markers.len());

    if kernel.symmetric() {
        let mut out = PlainWriter;
        sweep(&markers, kernel, &mut out, None)?;
    } else {
        let mut added = DiffWriter::added();
        let mut removed = DiffWriter::removed();
        sweep(&markers, kernel, &mut added, Some(&mut removed))?;
    }
    Ok(())
}

/// In-memory variant of [`compare_route_files`] for library callers.
///
/// Returns the result block lists in ascending address order. For the
/// difference kernel the first list holds blocks only in `set_b` and the
/// second blocks only in `set_a`; for symmetric kernels the second list
/// is empty.
pub fn compare_blocks<A: Address>(
    set_a: &[Cidr<A>],
    set_b: &[Cidr<A>],
    kernel: Kernel,
) -> Result<(Vec<Cidr<A>>, Vec<Cidr<A>>), AddrError> {
    let mut markers: Vec<Marker<A>> = Vec::new();
    {
        let mut collect = MarkerCollector::set_a(&mut markers);
        for block in set_a {
            collect.emit(block);
        }
    }
    {
        let mut collect = MarkerCollector::set_b(&mut markers);
        for block in set_b {
            collect.emit(block);
        }
    }
    sort_markers(&mut markers);

    let mut out_a = BlockCollector::new();
    let mut out_b = BlockCollector::new();
    if kernel.symmetric() {
        sweep(&markers, kernel, &mut out_a, None)?;
    } else {
        sweep(&markers, kernel, &mut out_a, Some(&mut out_b))?;
    }
    Ok((out_a.blocks, out_b.blocks))
}

//! Event sweep engine.
//!
//! Every block of the two input sets contributes an open marker at its
//! lowest address and a close marker at its highest. The merged,
//! address-sorted marker sequence is walked once; per-set open-interval
//! counters feed the comparison kernel, and every kernel transition closes
//! off a maximal contiguous matching range which is handed to block
//! decomposition.

use crate::models::{AddrError, Address, Cidr};
use crate::output::OutputSink;

use super::collapse::collapse_range;
use super::kernel::Kernel;

/// Which set a marker belongs to and whether it opens or closes a block.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MarkerRole {
    AOpen,
    AClose,
    BOpen,
    BClose,
}

/// A block boundary event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Marker<A: Address> {
    pub addr: A,
    pub role: MarkerRole,
}

/// Expands each received block into its open/close marker pair. This is
/// where origin-set tagging happens: one collector per input set.
pub struct MarkerCollector<'a, A: Address> {
    markers: &'a mut Vec<Marker<A>>,
    open: MarkerRole,
    close: MarkerRole,
}

impl<'a, A: Address> MarkerCollector<'a, A> {
    /// Collector for set A.
    pub fn set_a(markers: &'a mut Vec<Marker<A>>) -> MarkerCollector<'a, A> {
        MarkerCollector {
            markers,
            open: MarkerRole::AOpen,
            close: MarkerRole::AClose,
        }
    }

    /// Collector for set B.
    pub fn set_b(markers: &'a mut Vec<Marker<A>>) -> MarkerCollector<'a, A> {
        MarkerCollector {
            markers,
            open: MarkerRole::BOpen,
            close: MarkerRole::BClose,
        }
    }
}

impl<A: Address> OutputSink<A> for MarkerCollector<'_, A> {
    fn emit(&mut self, block: &Cidr<A>) {
        self.markers.push(Marker {
            addr: block.lo(),
            role: self.open,
        });
        self.markers.push(Marker {
            addr: block.hi(),
            role: self.close,
        });
    }
}

/// Sort markers into sweep order: ascending by address. The relative order
/// of markers at the same address does not matter, they are evaluated as
/// one batch.
pub fn sort_markers<A: Address>(markers: &mut [Marker<A>]) {
    markers.sort_by(|x, y| x.addr.cmp(&y.addr));
}

// Per-set sweep state. `pending` holds the last closed range: a following
// range that starts right after it belongs to the same contiguous region
// and extends it, so adjacent input blocks come out as one minimal block
// instead of two.
struct TrackState<A: Address> {
    count: i32,
    inside: bool,
    start: A,
    pending: Option<(A, A)>,
}

impl<A: Address> TrackState<A> {
    fn new() -> TrackState<A> {
        TrackState {
            count: 0,
            inside: false,
            start: A::ZERO,
            pending: None,
        }
    }

    fn step(
        &mut self,
        other_count: i32,
        kernel: Kernel,
        open: bool,
        addr: A,
        sink: &mut dyn OutputSink<A>,
    ) -> Result<(), AddrError> {
        if kernel.matches(self.count, other_count) {
            if !self.inside {
                self.inside = true;
                // A close marker's own address was the last covered point;
                // the matching region starts one past it.
                self.start = if open { addr } else { addr.succ()? };
            }
        } else if self.inside {
            self.inside = false;
            let stop = if open { addr.pred()? } else { addr };
            self.close_range(stop, sink)?;
        }
        Ok(())
    }

    fn close_range(&mut self, stop: A, sink: &mut dyn OutputSink<A>) -> Result<(), AddrError> {
        if let Some((pending_start, pending_stop)) = self.pending {
            if pending_stop < self.start && pending_stop.succ()? == self.start {
                self.pending = Some((pending_start, stop));
                return Ok(());
            }
            collapse_range(pending_start, pending_stop, sink)?;
        }
        self.pending = Some((self.start, stop));
        Ok(())
    }

    fn flush(&mut self, sink: &mut dyn OutputSink<A>) -> Result<(), AddrError> {
        if let Some((start, stop)) = self.pending.take() {
            collapse_range(start, stop, sink)?;
        }
        Ok(())
    }
}

/// Walk the sorted marker sequence and emit every maximal contiguous
/// address range on which the kernel holds, reduced to minimal CIDR
/// blocks.
///
/// `sink_b` is only needed for asymmetric kernels; it receives the ranges
/// matched with the counter arguments swapped. The caller guarantees the
/// markers are sorted and properly paired; the engine does not
/// re-validate.
pub fn sweep<A: Address>(
    markers: &[Marker<A>],
    kernel: Kernel,
    sink_a: &mut dyn OutputSink<A>,
    mut sink_b: Option<&mut dyn OutputSink<A>>,
) -> Result<(), AddrError> {
    let mut a = TrackState::new();
    let mut b = TrackState::new();

    let mut iter = markers.iter().peekable();
    while let Some(marker) = iter.next() {
        // Counts reflect every block, even ones whose boundary is
        // collapsed into a batch below.
        match marker.role {
            MarkerRole::AOpen => a.count += 1,
            MarkerRole::AClose => a.count -= 1,
            MarkerRole::BOpen => b.count += 1,
            MarkerRole::BClose => b.count -= 1,
        }
        let open = matches!(marker.role, MarkerRole::AOpen | MarkerRole::BOpen);

        // Coincident boundaries are evaluated as one atomic batch: only
        // the counter state after the last marker at an address counts.
        if let Some(next) = iter.peek() {
            if next.addr == marker.addr {
                continue;
            }
        }

        a.step(b.count, kernel, open, marker.addr, sink_a)?;
        if let Some(sink) = sink_b.as_deref_mut() {
            b.step(a.count, kernel, open, marker.addr, sink)?;
        }
    }

    a.flush(sink_a)?;
    if let Some(sink) = sink_b.as_deref_mut() {
        b.flush(sink)?;
    }
    Ok(())
}

//! Range to minimal CIDR blocks.
//!
//! Collapses an inclusive address range into the smallest ordered sequence
//! of CIDR blocks covering it exactly.

use crate::models::{Address, AddrError, Cidr};
use crate::output::OutputSink;

/// Emit the minimal sequence of blocks whose union is exactly
/// `[start, stop]` inclusive.
///
/// Greedy: at each step the largest block that is aligned on `start` and
/// does not reach past `stop` is emitted, then `start` advances past it.
/// A range ending at the top of the address space terminates without
/// computing the successor of the last address. `start == stop` emits a
/// single full-width block; `start > stop` emits nothing.
pub fn collapse_range<A: Address>(
    start: A,
    stop: A,
    sink: &mut dyn OutputSink<A>,
) -> Result<(), AddrError> {
    let mut start = start;
    while start <= stop {
        for prefix in 0..=A::MAX_LENGTH {
            if start.lo(prefix)? != start {
                continue;
            }
            let top = start.hi(prefix)?;
            if top > stop {
                continue;
            }
            sink.emit(&Cidr::new(start, prefix)?);
            if top == A::TOP {
                return Ok(());
            }
            start = top.succ()?;
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ipv4Address, Ipv6Address};
    use crate::output::BlockCollector;

    fn v4(text: &str) -> Ipv4Address {
        Ipv4Address::from_text(text).unwrap()
    }

    fn collapse_v4(start: &str, stop: &str) -> Vec<String> {
        let mut out = BlockCollector::new();
        collapse_range(v4(start), v4(stop), &mut out).unwrap();
        out.blocks.iter().map(|b| b.to_string()).collect()
    }

    #[test]
    fn test_aligned_range() {
        assert_eq!(collapse_v4("10.0.0.0", "10.0.0.255"), vec!["10.0.0.0/24"]);
        assert_eq!(collapse_v4("10.0.0.0", "10.0.1.255"), vec!["10.0.0.0/23"]);
    }

    #[test]
    fn test_unaligned_range() {
        assert_eq!(
            collapse_v4("10.0.0.1", "10.0.0.6"),
            vec!["10.0.0.1/32", "10.0.0.2/31", "10.0.0.4/31", "10.0.0.6/32"]
        );
        assert_eq!(
            collapse_v4("10.0.0.128", "10.0.1.127"),
            vec!["10.0.0.128/25", "10.0.1.0/25"]
        );
    }

    #[test]
    fn test_single_address() {
        assert_eq!(collapse_v4("10.0.0.7", "10.0.0.7"), vec!["10.0.0.7/32"]);
    }

    #[test]
    fn test_empty_range() {
        // start > stop comes out of boundary arithmetic on empty regions
        assert_eq!(collapse_v4("10.0.0.8", "10.0.0.7"), Vec::<String>::new());
    }

    #[test]
    fn test_whole_space() {
        assert_eq!(
            collapse_v4("0.0.0.0", "255.255.255.255"),
            vec!["0.0.0.0/0"]
        );
    }

    #[test]
    fn test_ends_at_top_of_space() {
        // Must terminate without stepping past the last address
        assert_eq!(
            collapse_v4("255.255.255.0", "255.255.255.255"),
            vec!["255.255.255.0/24"]
        );
        assert_eq!(
            collapse_v4("255.255.255.255", "255.255.255.255"),
            vec!["255.255.255.255/32"]
        );
    }

    #[test]
    fn test_exact_cover_disjoint_maximal() {
        let start = v4("10.1.2.3");
        let stop = v4("10.1.7.250");
        let mut out = BlockCollector::new();
        collapse_range(start, stop, &mut out).unwrap();

        // Exact cover, in order, pairwise disjoint
        let mut expect = start;
        for block in &out.blocks {
            assert_eq!(block.lo(), expect);
            assert_eq!(block.lo(), block.addr);
            expect = block.hi().succ().unwrap();
        }
        assert_eq!(out.blocks.last().unwrap().hi(), stop);

        // Maximal: no block could be replaced by its enclosing parent
        for block in &out.blocks {
            let parent = Cidr::new(block.addr, block.prefix - 1).unwrap();
            assert!(parent.lo() < start || parent.hi() > stop || parent.lo() != block.lo());
        }
    }

    #[test]
    fn test_ipv6_range() {
        let mut out = BlockCollector::new();
        collapse_range(
            Ipv6Address::from_text("2001:db8::").unwrap(),
            Ipv6Address::from_text("2001:db8:0:1:ffff:ffff:ffff:ffff").unwrap(),
            &mut out,
        )
        .unwrap();
        assert_eq!(
            out.blocks.iter().map(|b| b.to_string()).collect::<Vec<_>>(),
            vec!["2001:db8::/63"]
        );
    }

    #[test]
    fn test_ipv6_top_of_space() {
        let mut out = BlockCollector::new();
        collapse_range(Ipv6Address::ZERO, Ipv6Address::TOP, &mut out).unwrap();
        assert_eq!(
            out.blocks.iter().map(|b| b.to_string()).collect::<Vec<_>>(),
            vec!["::/0"]
        );
    }
}

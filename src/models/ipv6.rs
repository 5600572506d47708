//! IPv6 address value and CIDR arithmetic.
//!
//! The 128-bit value is kept as two 64-bit words (`network`, `host`);
//! successor/predecessor propagate carry and borrow across the split.
//! Textual output follows RFC 5952: lowercase hex, no leading zeros, the
//! first longest run of two or more zero groups compressed to `::`.

use std::fmt;

use itertools::Itertools;

use super::address::Address;
use super::error::AddrError;
use super::ipv4::parse_ipv4_value;

/// Maximum length for an IPv6 prefix (128 bits).
pub const MAX_LENGTH: u8 = 128;

/// A 128-bit IPv6 address split into two 64-bit words.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash, Default)]
pub struct Ipv6Address {
    pub network: u64,
    pub host: u64,
}

impl Ipv6Address {
    pub fn new(network: u64, host: u64) -> Ipv6Address {
        Ipv6Address { network, host }
    }

    /// The eight 16-bit groups, most significant first.
    fn segments(&self) -> [u16; 8] {
        let mut segments = [0u16; 8];
        for i in 0..4 {
            segments[i] = ((self.network >> (48 - i * 16)) & 0xffff) as u16;
            segments[i + 4] = ((self.host >> (48 - i * 16)) & 0xffff) as u16;
        }
        segments
    }

    /// Fully expanded form, eight zero-padded groups.
    /// e.g. `2001:0db8:0000:0000:0000:0000:0000:0001`
    pub fn to_full_string(&self) -> String {
        self.segments()
            .iter()
            .map(|segment| format!("{segment:04x}"))
            .join(":")
    }
}

/// Render eight groups in RFC 5952 canonical form.
///
/// The longest run of zero groups is compressed; on a length tie the first
/// run wins, and runs of a single group are never compressed.
fn canonical(segments: &[u16; 8]) -> String {
    let mut zero_run: Option<(usize, usize)> = None;
    let mut index = 0;
    for (is_zero, group) in &segments.iter().group_by(|&&segment| segment == 0) {
        let len = group.count();
        if is_zero && len >= 2 && zero_run.map_or(true, |(_, best)| len > best) {
            zero_run = Some((index, len));
        }
        index += len;
    }

    let hex = |segment: &u16| format!("{segment:x}");
    match zero_run {
        None => segments.iter().map(hex).join(":"),
        Some((start, len)) => {
            let head = segments[..start].iter().map(hex).join(":");
            let tail = segments[start + len..].iter().map(hex).join(":");
            format!("{head}::{tail}")
        }
    }
}

fn parse_segment(text: &str) -> Result<u16, AddrError> {
    u16::from_str_radix(text, 16).map_err(|_| AddrError::format("IPv6", text))
}

/// Strict IPv6 text parser.
///
/// Accepts the full-form eight groups, a single `::` compression, and an
/// embedded IPv4 tail (which counts as two groups). Upper and lower case
/// hex are both accepted.
fn parse_ipv6(text: &str) -> Result<(u64, u64), AddrError> {
    let invalid = || AddrError::format("IPv6", text);
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return Err(invalid());
    }

    // Groups before the "::" marker land in `head`, groups after it in
    // `tail`. Without a marker everything stays in `head`.
    let mut head: Vec<u16> = Vec::new();
    let mut tail: Vec<u16> = Vec::new();
    let mut seen_marker = false;

    let mut pos = 0;
    if bytes[0] == b':' {
        // A leading ":" is only valid as the start of "::".
        if bytes.len() < 2 || bytes[1] != b':' {
            return Err(invalid());
        }
        seen_marker = true;
        pos = 2;
    }

    let mut segment_start = pos;
    let mut embedded_v4 = false;
    let mut i = pos;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_hexdigit() {
            i += 1;
        } else if c == b':' {
            let segment_len = i - segment_start;
            if segment_len > 4 {
                return Err(invalid());
            }
            if segment_len == 0 {
                // A second "::" is not allowed.
                if seen_marker {
                    return Err(invalid());
                }
                seen_marker = true;
            } else {
                let segment = parse_segment(&text[segment_start..i])?;
                if seen_marker {
                    tail.push(segment);
                } else {
                    head.push(segment);
                }
            }
            segment_start = i + 1;
            i += 1;
        } else if c == b'.' {
            // A dot means the rest of the address is an embedded IPv4.
            embedded_v4 = true;
            break;
        } else {
            return Err(invalid());
        }
    }

    // A trailing ":" is only valid as the second half of a terminal "::".
    if bytes[bytes.len() - 1] == b':' && !(seen_marker && tail.is_empty()) {
        return Err(invalid());
    }

    if embedded_v4 {
        let value = parse_ipv4_value(&text[segment_start..])?;
        for segment in [(value >> 16) as u16, (value & 0xffff) as u16] {
            if seen_marker {
                tail.push(segment);
            } else {
                head.push(segment);
            }
        }
    } else if bytes[bytes.len() - 1] != b':' {
        let segment_len = bytes.len() - segment_start;
        if segment_len > 4 {
            return Err(invalid());
        }
        let segment = parse_segment(&text[segment_start..])?;
        if seen_marker {
            tail.push(segment);
        } else {
            head.push(segment);
        }
    }

    if !seen_marker {
        if head.len() != 8 {
            return Err(invalid());
        }
    } else if head.len() + tail.len() >= 8 {
        // "::" must stand for at least one zero group.
        return Err(invalid());
    }

    let mut network: u64 = 0;
    let mut host: u64 = 0;
    for (i, &segment) in head.iter().enumerate() {
        if i < 4 {
            network |= (segment as u64) << ((3 - i) * 16);
        } else {
            host |= (segment as u64) << ((7 - i) * 16);
        }
    }
    // The tail fills from the right, so the length of the "::" gap does
    // not have to be computed.
    for (i, &segment) in tail.iter().rev().enumerate() {
        if i < 4 {
            host |= (segment as u64) << (i * 16);
        } else {
            network |= (segment as u64) << ((i - 4) * 16);
        }
    }

    Ok((network, host))
}

impl Address for Ipv6Address {
    const MAX_LENGTH: u8 = MAX_LENGTH;
    const FAMILY: &'static str = "IPv6";
    const ZERO: Ipv6Address = Ipv6Address {
        network: 0,
        host: 0,
    };
    const TOP: Ipv6Address = Ipv6Address {
        network: u64::MAX,
        host: u64::MAX,
    };

    fn from_text(text: &str) -> Result<Ipv6Address, AddrError> {
        let (network, host) = parse_ipv6(text)?;
        Ok(Ipv6Address { network, host })
    }

    fn lo(self, prefix: u8) -> Result<Ipv6Address, AddrError> {
        Self::check_prefix(prefix)?;
        if prefix == 0 {
            return Ok(Ipv6Address::ZERO);
        }
        if prefix <= 64 {
            Ok(Ipv6Address {
                network: self.network & (u64::MAX << (64 - prefix)),
                host: 0,
            })
        } else {
            Ok(Ipv6Address {
                network: self.network,
                host: self.host & (u64::MAX << (128 - prefix)),
            })
        }
    }

    fn hi(self, prefix: u8) -> Result<Ipv6Address, AddrError> {
        Self::check_prefix(prefix)?;
        if prefix == 0 {
            return Ok(Ipv6Address::TOP);
        }
        if prefix <= 64 {
            Ok(Ipv6Address {
                network: self.network | !(u64::MAX << (64 - prefix)),
                host: u64::MAX,
            })
        } else {
            Ok(Ipv6Address {
                network: self.network,
                host: self.host | !(u64::MAX << (128 - prefix)),
            })
        }
    }

    fn next(self, prefix: u8) -> Result<Ipv6Address, AddrError> {
        Self::check_prefix(prefix)?;
        let overflow =
            || AddrError::Range(format!("Next address after {self} overflows the IPv6 space"));
        if prefix == 0 {
            return Err(overflow());
        }
        if prefix <= 64 {
            let step = 1u64 << (64 - prefix);
            let network = self.network.checked_add(step).ok_or_else(overflow)?;
            Ok(Ipv6Address {
                network,
                host: self.host,
            })
        } else {
            let step = 1u64 << (128 - prefix);
            let (host, carry) = self.host.overflowing_add(step);
            let network = if carry {
                self.network.checked_add(1).ok_or_else(overflow)?
            } else {
                self.network
            };
            Ok(Ipv6Address { network, host })
        }
    }

    fn prev(self, prefix: u8) -> Result<Ipv6Address, AddrError> {
        Self::check_prefix(prefix)?;
        let underflow = || {
            AddrError::Range(format!(
                "Previous address before {self} underflows the IPv6 space"
            ))
        };
        if prefix == 0 {
            return Err(underflow());
        }
        if prefix <= 64 {
            let step = 1u64 << (64 - prefix);
            let network = self.network.checked_sub(step).ok_or_else(underflow)?;
            Ok(Ipv6Address {
                network,
                host: self.host,
            })
        } else {
            let step = 1u64 << (128 - prefix);
            let (host, borrow) = self.host.overflowing_sub(step);
            let network = if borrow {
                self.network.checked_sub(1).ok_or_else(underflow)?
            } else {
                self.network
            };
            Ok(Ipv6Address { network, host })
        }
    }
}

impl fmt::Display for Ipv6Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", canonical(&self.segments()))
    }
}

//! IPv4 address value and CIDR arithmetic.
//!
//! Provides [`Ipv4Address`], a 32-bit address with strict text parsing,
//! dotted-decimal formatting and range-safe prefix arithmetic.

use std::fmt;

use super::address::Address;
use super::error::AddrError;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// A 32-bit IPv4 address.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash, Default)]
pub struct Ipv4Address {
    pub value: u32,
}

impl Ipv4Address {
    pub fn new(value: u32) -> Ipv4Address {
        Ipv4Address { value }
    }
}

/// Parse strict dotted-decimal into the raw 32-bit value.
///
/// Exactly four octets, each < 256, separated by single dots. Leading zeros
/// in an octet are accepted and do not signify octal notation. Also used for
/// the embedded-IPv4 tail of an IPv6 address.
pub(crate) fn parse_ipv4_value(text: &str) -> Result<u32, AddrError> {
    let invalid = || AddrError::format("IPv4", text);

    if text.is_empty() || text.starts_with('.') || text.ends_with('.') || text.contains("..") {
        return Err(invalid());
    }

    let mut value: u32 = 0;
    let mut octet: u32 = 0;
    let mut dots = 0;
    for c in text.chars() {
        match c {
            '0'..='9' => {
                octet = octet * 10 + (c as u32 - '0' as u32);
                if octet > 255 {
                    return Err(invalid());
                }
            }
            '.' => {
                value = (value << 8) | octet;
                octet = 0;
                dots += 1;
            }
            _ => return Err(invalid()),
        }
    }

    if dots != 3 {
        return Err(invalid());
    }
    Ok((value << 8) | octet)
}

impl Address for Ipv4Address {
    const MAX_LENGTH: u8 = MAX_LENGTH;
    const FAMILY: &'static str = "IPv4";
    const ZERO: Ipv4Address = Ipv4Address { value: 0 };
    const TOP: Ipv4Address = Ipv4Address { value: u32::MAX };

    fn from_text(text: &str) -> Result<Ipv4Address, AddrError> {
        Ok(Ipv4Address {
            value: parse_ipv4_value(text)?,
        })
    }

    fn lo(self, prefix: u8) -> Result<Ipv4Address, AddrError> {
        Self::check_prefix(prefix)?;
        // Shifting by the full width is undefined, hence the special case.
        if prefix == 0 {
            return Ok(Ipv4Address { value: 0 });
        }
        Ok(Ipv4Address {
            value: self.value & (u32::MAX << (MAX_LENGTH - prefix)),
        })
    }

    fn hi(self, prefix: u8) -> Result<Ipv4Address, AddrError> {
        Self::check_prefix(prefix)?;
        if prefix == 0 {
            return Ok(Ipv4Address { value: u32::MAX });
        }
        Ok(Ipv4Address {
            value: self.value | !(u32::MAX << (MAX_LENGTH - prefix)),
        })
    }

    fn next(self, prefix: u8) -> Result<Ipv4Address, AddrError> {
        Self::check_prefix(prefix)?;
        if prefix == 0 {
            // A step of 2^32 can never stay inside the address space.
            return Err(AddrError::Range(format!(
                "Next address after {self}/0 overflows the IPv4 space"
            )));
        }
        let step = 1u32 << (MAX_LENGTH - prefix);
        let value = self.value.checked_add(step).ok_or_else(|| {
            AddrError::Range(format!("Next address after {self} overflows the IPv4 space"))
        })?;
        Ok(Ipv4Address { value })
    }

    fn prev(self, prefix: u8) -> Result<Ipv4Address, AddrError> {
        Self::check_prefix(prefix)?;
        if prefix == 0 {
            return Err(AddrError::Range(format!(
                "Previous address before {self}/0 underflows the IPv4 space"
            )));
        }
        let step = 1u32 << (MAX_LENGTH - prefix);
        let value = self.value.checked_sub(step).ok_or_else(|| {
            AddrError::Range(format!(
                "Previous address before {self} underflows the IPv4 space"
            ))
        })?;
        Ok(Ipv4Address { value })
    }
}

impl fmt::Display for Ipv4Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            (self.value >> 24) & 0xff,
            (self.value >> 16) & 0xff,
            (self.value >> 8) & 0xff,
            self.value & 0xff
        )
    }
}

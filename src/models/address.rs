//! The capability contract shared by both address families.
//!
//! The sweep engine and block decomposition are generic over any type
//! providing this contract; they never mention a concrete width.

use std::fmt;

use super::error::AddrError;

/// A fixed-width unsigned address value.
///
/// The value is always inside `[0, 2^MAX_LENGTH - 1]`; arithmetic that would
/// leave that range returns [`AddrError::Range`] instead of wrapping.
/// Ordering is plain unsigned numeric comparison over the full width.
pub trait Address: Copy + Eq + Ord + fmt::Debug + fmt::Display + Sized {
    /// Width of the address space in bits (32 or 128).
    const MAX_LENGTH: u8;
    /// Family name used in error messages ("IPv4" / "IPv6").
    const FAMILY: &'static str;
    /// The all-zero address.
    const ZERO: Self;
    /// The all-ones address, top of the address space.
    const TOP: Self;

    /// Parse an address from text. The whole string must match; no
    /// surrounding garbage is tolerated.
    fn from_text(text: &str) -> Result<Self, AddrError>;

    /// Network address: clears all bits beyond the leading `prefix` bits.
    fn lo(self, prefix: u8) -> Result<Self, AddrError>;

    /// Last address of the prefix: sets all bits beyond the leading
    /// `prefix` bits.
    fn hi(self, prefix: u8) -> Result<Self, AddrError>;

    /// Add `2^(MAX_LENGTH - prefix)` to the address.
    fn next(self, prefix: u8) -> Result<Self, AddrError>;

    /// Subtract `2^(MAX_LENGTH - prefix)` from the address.
    fn prev(self, prefix: u8) -> Result<Self, AddrError>;

    /// The address one host step up.
    fn succ(self) -> Result<Self, AddrError> {
        self.next(Self::MAX_LENGTH)
    }

    /// The address one host step down.
    fn pred(self) -> Result<Self, AddrError> {
        self.prev(Self::MAX_LENGTH)
    }

    /// Reject prefix lengths outside `[0, MAX_LENGTH]`.
    fn check_prefix(prefix: u8) -> Result<(), AddrError> {
        if prefix > Self::MAX_LENGTH {
            Err(AddrError::Range(format!(
                "Invalid prefix length /{prefix} for {}",
                Self::FAMILY
            )))
        } else {
            Ok(())
        }
    }
}

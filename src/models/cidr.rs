//! CIDR block model.
//!
//! A [`Cidr`] pairs an address with a prefix length and denotes the
//! inclusive range `[lo, hi]`, both derivable from the pair alone.
//! Serializes to and from its `addr/prefix` textual form.

use std::fmt;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize};

use super::address::Address;
use super::error::AddrError;

/// An address range aligned to and fully described by (address, prefix).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Cidr<A: Address> {
    pub addr: A,
    pub prefix: u8,
}

impl<A: Address> Cidr<A> {
    /// Create a block, validating the prefix length against the family width.
    pub fn new(addr: A, prefix: u8) -> Result<Cidr<A>, AddrError> {
        A::check_prefix(prefix)?;
        Ok(Cidr { addr, prefix })
    }

    /// Parse a block from its `addr/prefix` form (e.g. "10.0.0.0/24").
    pub fn from_text(text: &str) -> Result<Cidr<A>, AddrError> {
        let text = text.trim();
        let (addr, prefix) = text
            .split_once('/')
            .ok_or_else(|| AddrError::format(A::FAMILY, text))?;
        let addr = A::from_text(addr)?;
        let prefix = prefix
            .parse::<u8>()
            .map_err(|_| AddrError::format(A::FAMILY, text))?;
        Cidr::new(addr, prefix)
    }

    /// Lowest address in the block.
    pub fn lo(&self) -> A {
        self.addr
            .lo(self.prefix)
            .unwrap_or_else(|e| panic!("Error computing network address for {self}: {e}"))
    }

    /// Highest address in the block.
    pub fn hi(&self) -> A {
        self.addr
            .hi(self.prefix)
            .unwrap_or_else(|e| panic!("Error computing last address for {self}: {e}"))
    }

    /// Check if an address is contained within this block.
    pub fn contains(&self, addr: A) -> bool {
        addr >= self.lo() && addr <= self.hi()
    }
}

impl<A: Address> fmt::Display for Cidr<A> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix)
    }
}

impl<A: Address> Serialize for Cidr<A> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de, A: Address> Deserialize<'de> for Cidr<A> {
    fn deserialize<D>(deserializer: D) -> Result<Cidr<A>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cidr::from_text(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ipv4Address, Ipv6Address};

    fn block(text: &str) -> Cidr<Ipv4Address> {
        Cidr::from_text(text).unwrap()
    }

    #[test]
    fn test_from_text() {
        let b = block("10.0.0.0/24");
        assert_eq!(b.addr, Ipv4Address::from_text("10.0.0.0").unwrap());
        assert_eq!(b.prefix, 24);
        assert_eq!(block(" 10.0.0.0/24 "), b);
    }

    #[test]
    fn test_from_text_invalid() {
        assert!(Cidr::<Ipv4Address>::from_text("10.0.0.0").is_err());
        assert!(Cidr::<Ipv4Address>::from_text("10.0.0.0/33").is_err());
        assert!(Cidr::<Ipv4Address>::from_text("10.0.0/24").is_err());
        assert!(Cidr::<Ipv4Address>::from_text("10.0.0.0/abc").is_err());
        assert!(Cidr::<Ipv6Address>::from_text("2001:db8::/129").is_err());
    }

    #[test]
    fn test_lo_hi() {
        let b = block("192.168.1.42/24");
        assert_eq!(b.lo(), Ipv4Address::from_text("192.168.1.0").unwrap());
        assert_eq!(b.hi(), Ipv4Address::from_text("192.168.1.255").unwrap());

        let b6 = Cidr::<Ipv6Address>::from_text("2001:db8::/32").unwrap();
        assert_eq!(b6.lo(), Ipv6Address::from_text("2001:db8::").unwrap());
        assert_eq!(
            b6.hi(),
            Ipv6Address::from_text("2001:db8:ffff:ffff:ffff:ffff:ffff:ffff").unwrap()
        );
    }

    #[test]
    fn test_contains() {
        let b = block("10.0.10.0/24");
        assert!(b.contains(Ipv4Address::from_text("10.0.10.0").unwrap()));
        assert!(b.contains(Ipv4Address::from_text("10.0.10.255").unwrap()));
        assert!(!b.contains(Ipv4Address::from_text("10.0.11.0").unwrap()));
    }

    #[test]
    fn test_display() {
        assert_eq!(block("10.0.0.0/8").to_string(), "10.0.0.0/8");
        assert_eq!(
            Cidr::<Ipv6Address>::from_text("2001:0db8::0001/128")
                .unwrap()
                .to_string(),
            "2001:db8::1/128"
        );
    }

    #[test]
    fn test_serde_round_trip() {
        let b = block("10.1.2.0/23");
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "\"10.1.2.0/23\"");
        let back: Cidr<Ipv4Address> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, b);

        assert!(serde_json::from_str::<Cidr<Ipv4Address>>("\"10.0.0.0/99\"").is_err());
    }

    #[test]
    fn test_cmp() {
        assert!(block("10.0.0.0/8") < block("10.0.10.0/24"));
        assert!(block("10.0.10.0/24") < block("10.0.10.64/26"));
    }
}

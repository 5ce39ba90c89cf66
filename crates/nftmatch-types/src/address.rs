//! Account and asset identifiers used throughout nftmatch.
//!
//! Addresses are 20-byte account identifiers rendered as hex. The all-zero
//! address doubles as the native-currency sentinel when used as a payment
//! token; everywhere else it is an invalid destination.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer unit for prices, fees, and balances. All arithmetic on amounts
/// is checked; overflow is an error, never a wrap.
pub type Amount = u128;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 20-byte account identifier (user, contract, or token address).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The all-zero address. As a payment token it denotes the chain's
    /// native currency; as a destination it is always rejected.
    pub const ZERO: Self = Self([0u8; 20]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Whether this is the zero / native-currency sentinel address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Short hex form for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Identifier of a single non-fungible asset within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// BlockHeight
// ---------------------------------------------------------------------------

/// A chain height. Order expirations are heights, not timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "height:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_address_is_sentinel() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address([1u8; 20]).is_zero());
    }

    #[test]
    fn address_display_is_hex() {
        let addr = Address([0xab; 20]);
        let s = format!("{addr}");
        assert!(s.starts_with("0x"));
        assert_eq!(s.len(), 2 + 40);
        assert!(s.contains("abab"));
    }

    #[test]
    fn address_short_form() {
        let addr = Address([0xcd; 20]);
        assert_eq!(addr.short(), "cdcdcdcd");
    }

    #[test]
    fn address_ordering_is_bytewise() {
        let a = Address([1u8; 20]);
        let b = Address([2u8; 20]);
        assert!(a < b);
    }

    #[test]
    fn block_height_next() {
        assert_eq!(BlockHeight(41).next(), BlockHeight(42));
        assert!(BlockHeight(41) < BlockHeight(42));
    }

    #[test]
    fn serde_roundtrips() {
        let addr = Address([7u8; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, back);

        let id = TokenId(99);
        let json = serde_json::to_string(&id).unwrap();
        let back: TokenId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}

//! Capability interfaces of the external collaborators.
//!
//! The engine consumes these as plain synchronous traits: the host answers
//! ownership, royalty, and allowance queries before a transition concludes,
//! and executes the returned effects after it commits. Transfer machinery
//! (acceptance callbacks, allowance bookkeeping) stays on the host side.

use nftmatch_types::{Address, Amount, TokenId};
use serde::{Deserialize, Serialize};

pub use nftmatch_policy::Membership;

/// Royalty terms a collection reports for its assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoyaltyInfo {
    /// Receives the royalty leg of every sale in the collection.
    pub recipient: Address,
    /// Royalty rate in basis points.
    pub bps: u32,
}

impl RoyaltyInfo {
    /// A collection that takes no royalty.
    #[must_use]
    pub fn none() -> Self {
        Self {
            recipient: Address::ZERO,
            bps: 0,
        }
    }
}

/// Ownership and royalty queries against a non-fungible collection.
pub trait AssetOwnership {
    /// Current owner of an asset, or `None` for an unknown token id.
    fn owner_of(&self, collection: Address, token_id: TokenId) -> Option<Address>;

    /// Royalty terms for the collection.
    fn royalty_info(&self, collection: Address) -> RoyaltyInfo;
}

/// Allowance queries against a fungible-token contract.
pub trait TokenAllowance {
    /// How much of `token` the `spender` may pull from `owner`.
    fn allowance(&self, token: Address, owner: Address, spender: Address) -> Amount;
}

/// Umbrella over every capability a transition may consult.
pub trait MarketHost: AssetOwnership + TokenAllowance + Membership {}

impl<T: AssetOwnership + TokenAllowance + Membership> MarketHost for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_royalty_is_zero() {
        let info = RoyaltyInfo::none();
        assert_eq!(info.bps, 0);
        assert!(info.recipient.is_zero());
    }

    #[test]
    fn royalty_info_serde_roundtrip() {
        let info = RoyaltyInfo {
            recipient: Address([5u8; 20]),
            bps: 1000,
        };
        let json = serde_json::to_string(&info).unwrap();
        let back: RoyaltyInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info, back);
    }
}

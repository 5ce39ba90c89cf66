//! Configuration for a marketplace instance.

use serde::{Deserialize, Serialize};

use crate::{Address, constants};

/// Static configuration of one marketplace deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    /// The engine's own on-chain address (escrow holder, never a valid
    /// destination).
    pub marketplace: Address,
    /// Administrator: receives service fees and gates the admin transitions.
    pub owner: Address,
    /// Service fee charged on every sale, in basis points.
    pub service_fee_bps: u32,
    /// Address of the allowlist contract membership checks are issued
    /// against. Replaceable at runtime via `SetAllowlist`.
    pub allowlist: Address,
}

impl MarketplaceConfig {
    /// Config with the default service fee.
    #[must_use]
    pub fn new(marketplace: Address, owner: Address, allowlist: Address) -> Self {
        Self {
            marketplace,
            owner,
            service_fee_bps: constants::DEFAULT_SERVICE_FEE_BPS,
            allowlist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_service_fee() {
        let cfg = MarketplaceConfig::new(
            Address([1u8; 20]),
            Address([2u8; 20]),
            Address([3u8; 20]),
        );
        assert_eq!(cfg.service_fee_bps, 250);
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = MarketplaceConfig::new(
            Address([1u8; 20]),
            Address([2u8; 20]),
            Address([3u8; 20]),
        );
        let json = serde_json::to_string(&cfg).unwrap();
        let back: MarketplaceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}

//! Transition receipts — the audit trail of committed transitions.
//!
//! Every committed transition produces a [`TransitionReceipt`]: the ordered
//! events it emitted and the outbound effects the host must execute. The
//! receipt digest is deterministic — same state, same request, same digest
//! on every replica.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Effect, MarketEvent};

/// The result of one committed transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionReceipt {
    /// Events emitted, in emission order.
    pub events: Vec<MarketEvent>,
    /// Outbound calls for the host to execute after commit, in order.
    pub effects: Vec<Effect>,
}

impl TransitionReceipt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: MarketEvent) {
        self.events.push(event);
    }

    pub fn push_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Whether the transition produced no events and no effects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.effects.is_empty()
    }

    /// Deterministic SHA-256 digest over the canonical serialization.
    ///
    /// Serialization of every receipt field is infallible, so the JSON step
    /// cannot fail.
    #[must_use]
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(b"nftmatch:receipt:v1:");
        hasher.update(serde_json::to_vec(self).expect("receipt serialization is infallible"));
        hasher.finalize().into()
    }

    /// Hex form of [`Self::digest`] for logs and APIs.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Address, BlockHeight, OrderKey, OrderSide, TokenId};

    fn sample() -> TransitionReceipt {
        let mut receipt = TransitionReceipt::new();
        receipt.emit(MarketEvent::SetOrder {
            maker: Address([1u8; 20]),
            side: OrderSide::Sell,
            key: OrderKey::new(Address([2u8; 20]), TokenId(1), Address::ZERO, 100),
            expiration: BlockHeight(50),
        });
        receipt.push_effect(Effect::NativeTransfer {
            to: Address([3u8; 20]),
            amount: 100,
        });
        receipt
    }

    #[test]
    fn empty_receipt() {
        let receipt = TransitionReceipt::new();
        assert!(receipt.is_empty());
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(sample().digest(), sample().digest());
    }

    #[test]
    fn digest_changes_with_content() {
        let a = sample();
        let mut b = sample();
        b.push_effect(Effect::NativeTransfer {
            to: Address([9u8; 20]),
            amount: 1,
        });
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn digest_hex_length() {
        assert_eq!(sample().digest_hex().len(), 64);
    }

    #[test]
    fn receipt_serde_roundtrip() {
        let receipt = sample();
        let json = serde_json::to_string(&receipt).unwrap();
        let back: TransitionReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, back);
    }
}

//! Events and outbound effects produced by committed transitions.
//!
//! The engine performs no I/O. Every committed transition returns the events
//! it emits and the outbound calls ([`Effect`]) the host must execute — the
//! host applies effects after commit, in order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, BlockHeight, OrderKey, OrderSide, TokenId};

/// A market event emitted by a committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    /// An order was created or its expiration updated.
    SetOrder {
        maker: Address,
        side: OrderSide,
        key: OrderKey,
        expiration: BlockHeight,
    },
    /// An order was cancelled by its maker.
    CancelOrder {
        maker: Address,
        side: OrderSide,
        key: OrderKey,
    },
    /// An order was fulfilled by a taker.
    FulfillOrder {
        taker: Address,
        side: OrderSide,
        key: OrderKey,
        seller: Address,
        buyer: Address,
        /// Receives the asset.
        asset_recipient: Address,
        /// Receives the seller proceeds.
        payment_recipient: Address,
        royalty_recipient: Address,
        royalty_amount: Amount,
        service_fee: Amount,
    },
    /// A payment token was approved for use.
    PaymentTokenAllowed { token: Address },
    /// A payment token was removed from the registry.
    PaymentTokenRevoked { token: Address },
    /// The allowlist contract address was replaced.
    AllowlistChanged { allowlist: Address },
}

impl fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetOrder { side, key, .. } => write!(f, "SET_ORDER {side} {key}"),
            Self::CancelOrder { side, key, .. } => write!(f, "CANCEL_ORDER {side} {key}"),
            Self::FulfillOrder { side, key, .. } => write!(f, "FULFILL_ORDER {side} {key}"),
            Self::PaymentTokenAllowed { token } => write!(f, "PAYMENT_TOKEN_ALLOWED {token}"),
            Self::PaymentTokenRevoked { token } => write!(f, "PAYMENT_TOKEN_REVOKED {token}"),
            Self::AllowlistChanged { allowlist } => write!(f, "ALLOWLIST_CHANGED {allowlist}"),
        }
    }
}

/// An outbound call the host executes after the transition commits.
///
/// Effects are descriptions, not actions: returning them keeps the engine
/// deterministic and unit-testable without a live ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Move native currency from the marketplace to `to`.
    NativeTransfer { to: Address, amount: Amount },
    /// Pull `amount` of `token` from `from` to `to` using the allowance
    /// granted to the marketplace.
    TokenTransfer {
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    },
    /// Move the asset from `from` to `to` via the collection's transfer
    /// capability (acceptance callbacks are the collection's concern).
    AssetTransfer {
        collection: Address,
        token_id: TokenId,
        from: Address,
        to: Address,
    },
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativeTransfer { to, amount } => {
                write!(f, "NATIVE {amount} -> {}", to.short())
            }
            Self::TokenTransfer {
                token,
                from,
                to,
                amount,
            } => write!(
                f,
                "TOKEN[{}] {amount} {} -> {}",
                token.short(),
                from.short(),
                to.short()
            ),
            Self::AssetTransfer {
                collection,
                token_id,
                from,
                to,
            } => write!(
                f,
                "ASSET {}{} {} -> {}",
                collection.short(),
                token_id,
                from.short(),
                to.short()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address([b; 20])
    }

    #[test]
    fn event_display() {
        let event = MarketEvent::CancelOrder {
            maker: addr(1),
            side: OrderSide::Buy,
            key: OrderKey::new(addr(2), TokenId(5), Address::ZERO, 100),
        };
        let s = format!("{event}");
        assert!(s.starts_with("CANCEL_ORDER BUY"));
    }

    #[test]
    fn effect_display() {
        let effect = Effect::NativeTransfer {
            to: addr(3),
            amount: 250,
        };
        assert!(format!("{effect}").contains("250"));
    }

    #[test]
    fn event_serde_roundtrip() {
        let event = MarketEvent::SetOrder {
            maker: addr(1),
            side: OrderSide::Sell,
            key: OrderKey::new(addr(2), TokenId(9), addr(4), 777),
            expiration: BlockHeight(1000),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: MarketEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn effect_serde_roundtrip() {
        let effect = Effect::TokenTransfer {
            token: addr(9),
            from: addr(1),
            to: addr(2),
            amount: 10_000,
        };
        let json = serde_json::to_string(&effect).unwrap();
        let back: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, back);
    }
}

//! Order model for the fixed-price book.
//!
//! An order is identified by its [`OrderKey`] plus the side of the book it
//! sits in — there is no separate order id. Distinct prices for the same
//! (collection, token, payment token) coexist as independent entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Address, Amount, BlockHeight, TokenId};

/// Which side of the book an order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderSide {
    /// Maker offers to sell the asset at the key's price.
    Sell,
    /// Maker offers to buy the asset at the key's price.
    Buy,
}

impl OrderSide {
    /// The side the counterparty's order would sit on.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Sell => Self::Buy,
            Self::Buy => Self::Sell,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sell => write!(f, "SELL"),
            Self::Buy => write!(f, "BUY"),
        }
    }
}

/// Composite key locating an order within one side of the book.
///
/// `payment_token == Address::ZERO` denotes the native currency. The key is
/// the full identity of an order; the store holds at most one order per key
/// per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderKey {
    /// The asset contract the order refers to.
    pub collection: Address,
    /// The asset within the collection.
    pub token_id: TokenId,
    /// Payment token address, or `Address::ZERO` for native currency.
    pub payment_token: Address,
    /// Fixed sale/purchase price in `payment_token` units.
    pub price: Amount,
}

impl OrderKey {
    #[must_use]
    pub fn new(
        collection: Address,
        token_id: TokenId,
        payment_token: Address,
        price: Amount,
    ) -> Self {
        Self {
            collection,
            token_id,
            payment_token,
            price,
        }
    }

    /// Whether the order is priced in native currency.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.payment_token.is_zero()
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} @ {} ({})",
            self.collection.short(),
            self.token_id,
            self.price,
            if self.is_native() {
                "native".to_string()
            } else {
                self.payment_token.short()
            }
        )
    }
}

/// An outstanding order. Everything else about it lives in its key.
///
/// Immutable except via maker-exclusive replacement: a `SetOrder` on an
/// occupied key by the same maker updates `expiration` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The account that created the order.
    pub maker: Address,
    /// First height at which the order can no longer be fulfilled.
    pub expiration: BlockHeight,
}

impl Order {
    #[must_use]
    pub fn new(maker: Address, expiration: BlockHeight) -> Self {
        Self { maker, expiration }
    }

    /// An order is expired once the chain has reached its expiration height.
    #[must_use]
    pub fn is_expired_at(&self, height: BlockHeight) -> bool {
        height >= self.expiration
    }
}

//! Escrow ledger — native funds held for outstanding buy orders.
//!
//! When a native-currency buy order is created, its full price moves into
//! the marketplace's custody and is recorded here under the order's key.
//! The entry leaves the ledger exactly once: refunded on cancel, or
//! disbursed on fulfillment. The running total equals the engine-held
//! native balance at all times.

use std::collections::BTreeMap;

use nftmatch_types::{Amount, MarketError, OrderKey, Result};

/// Per-order-key record of native funds in marketplace custody.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscrowLedger {
    held: BTreeMap<OrderKey, Amount>,
}

impl EscrowLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record funds taken into custody for a fresh buy order.
    pub fn deposit(&mut self, key: OrderKey, amount: Amount) {
        self.held.insert(key, amount);
    }

    /// Release the held amount for a cancelled order (refund path).
    ///
    /// # Errors
    /// Returns `InsufficientEscrow` if nothing is held for the key — an
    /// internal invariant breach, since every native buy order deposits on
    /// creation.
    pub fn release(&mut self, key: &OrderKey) -> Result<Amount> {
        self.held
            .remove(key)
            .ok_or(MarketError::InsufficientEscrow { key: *key })
    }

    /// Take the held amount for a fulfilled order (disbursal path).
    ///
    /// Same semantics as [`Self::release`]; the split between the two names
    /// keeps call sites self-describing.
    pub fn disburse(&mut self, key: &OrderKey) -> Result<Amount> {
        self.release(key)
    }

    /// The amount held for one order, if any.
    #[must_use]
    pub fn held_for(&self, key: &OrderKey) -> Option<Amount> {
        self.held.get(key).copied()
    }

    /// Total native funds in custody.
    #[must_use]
    pub fn total(&self) -> Amount {
        self.held.values().sum()
    }

    /// Number of orders with funds in custody.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.held.len()
    }
}

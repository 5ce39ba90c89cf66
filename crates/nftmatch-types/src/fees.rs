//! Fee arithmetic for sale settlement.
//!
//! Pure integer math: royalty and service fees are basis-point rates out of
//! 10,000, applied with floor (truncating) division. Overflow of the working
//! width is checked, never wrapped.

use serde::{Deserialize, Serialize};

use crate::{Amount, MarketError, Result, constants::BPS_DENOMINATOR};

/// A validated (royalty, service) basis-point rate pair.
///
/// Construction rejects rate pairs summing past 10,000 bps, so every
/// schedule in circulation satisfies `royalty + service <= price` for any
/// price it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    royalty_bps: u32,
    service_bps: u32,
}

impl FeeSchedule {
    /// Build a schedule, rejecting rate sums over 100%.
    pub fn new(royalty_bps: u32, service_bps: u32) -> Result<Self> {
        if royalty_bps
            .checked_add(service_bps)
            .is_none_or(|sum| sum > BPS_DENOMINATOR)
        {
            return Err(MarketError::InvalidFeeRate {
                royalty_bps,
                service_bps,
            });
        }
        Ok(Self {
            royalty_bps,
            service_bps,
        })
    }

    #[must_use]
    pub fn royalty_bps(&self) -> u32 {
        self.royalty_bps
    }

    #[must_use]
    pub fn service_bps(&self) -> u32 {
        self.service_bps
    }

    /// Split a sale price into (royalty, service fee, seller proceeds).
    ///
    /// Both fee legs use floor division; the seller receives the exact
    /// remainder, so the three parts always sum to `price`.
    ///
    /// # Errors
    /// Returns `ArithmeticOverflow` if `price * bps` exceeds the working
    /// integer width.
    pub fn split(&self, price: Amount) -> Result<FeeSplit> {
        let royalty = bps_of(price, self.royalty_bps)?;
        let service = bps_of(price, self.service_bps)?;
        // Rate validation at construction guarantees royalty + service <= price.
        let seller_net = price - royalty - service;
        Ok(FeeSplit {
            royalty,
            service,
            seller_net,
        })
    }
}

/// `amount * bps / 10_000` with checked multiplication.
fn bps_of(amount: Amount, bps: u32) -> Result<Amount> {
    amount
        .checked_mul(Amount::from(bps))
        .map(|scaled| scaled / Amount::from(BPS_DENOMINATOR))
        .ok_or(MarketError::ArithmeticOverflow)
}

/// The three-way division of a sale price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// Paid to the collection's royalty recipient.
    pub royalty: Amount,
    /// Paid to the marketplace owner.
    pub service: Amount,
    /// Remainder paid to the seller.
    pub seller_net: Amount,
}

impl FeeSplit {
    /// Total of all three legs. Always equals the input price.
    #[must_use]
    pub fn total(&self) -> Amount {
        self.royalty + self.service + self.seller_net
    }
}

//! Error types for the nftmatch settlement engine.
//!
//! All errors use the `NM_ERR_` prefix convention for easy grepping in logs.
//! Each kind additionally carries a stable negative wire code ([`MarketError::code`])
//! matching the on-chain taxonomy. Codes are grouped by subsystem:
//! - 1xx: Administration
//! - 2xx: Access policy
//! - 3xx: Order lifecycle
//! - 4xx: Destination / counterparty sanity
//! - 5xx: Arithmetic and funds

use thiserror::Error;

use crate::{Address, Amount, OrderKey};

/// Central error enum for all nftmatch transitions.
///
/// Every variant is a synchronous local rejection: the transition aborts
/// with zero state change and zero emitted events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketError {
    // =================================================================
    // Administration (1xx)
    // =================================================================
    /// An owner-gated transition was called by a non-owner.
    #[error("NM_ERR_100: caller {0} is not the marketplace owner")]
    NotContractOwner(Address),

    // =================================================================
    // Access policy (2xx)
    // =================================================================
    /// The caller is not on the marketplace allowlist.
    #[error("NM_ERR_200: caller {0} is not on the allowlist")]
    NotAllowedUser(Address),

    /// The payment token is neither native nor in the approved registry.
    #[error("NM_ERR_201: payment token {0} is not allowed")]
    NotAllowedPaymentToken(Address),

    // =================================================================
    // Order lifecycle (3xx)
    // =================================================================
    /// A sell order's maker must own the asset at creation time.
    #[error("NM_ERR_300: caller {0} does not own the asset")]
    NotTokenOwner(Address),

    /// A buy order's maker must not be the asset's current owner.
    #[error("NM_ERR_301: caller {0} already owns the asset")]
    TokenOwner(Address),

    /// Only the existing order's maker may overwrite an occupied key.
    #[error("NM_ERR_302: order at {key} belongs to another maker")]
    NotSelf { key: OrderKey },

    /// Cancellation requires an existing order made by the caller.
    #[error("NM_ERR_303: no cancellable order at {key} for caller")]
    NotAllowedToCancelOrder { key: OrderKey },

    /// No sell order exists at the requested key.
    #[error("NM_ERR_304: sell order not found at {key}")]
    SellOrderNotFound { key: OrderKey },

    /// No buy order exists at the requested key.
    #[error("NM_ERR_305: buy order not found at {key}")]
    BuyOrderNotFound { key: OrderKey },

    /// The order's expiration height has been reached.
    #[error("NM_ERR_306: order at {key} is expired")]
    Expired { key: OrderKey },

    /// Attached native value does not match what the transition requires.
    #[error("NM_ERR_307: attached amount {attached} does not equal required {required}")]
    NotEqualAmount { attached: Amount, required: Amount },

    /// Orders must carry a nonzero price.
    #[error("NM_ERR_308: order price must be nonzero")]
    ZeroPrice,

    /// The collection does not recognize the token id.
    #[error("NM_ERR_309: unknown asset {collection}/{token_id}")]
    UnknownAsset {
        collection: Address,
        token_id: crate::TokenId,
    },

    // =================================================================
    // Destination / counterparty sanity (4xx)
    // =================================================================
    /// The zero address can never receive an asset or payment.
    #[error("NM_ERR_400: destination is the zero address")]
    ZeroAddressDestination,

    /// The marketplace's own address can never be a destination.
    #[error("NM_ERR_401: destination is the marketplace itself")]
    ThisAddressDestination,

    /// The taker of an order cannot be its maker.
    #[error("NM_ERR_402: taker {0} is the order's maker")]
    SelfTrade(Address),

    // =================================================================
    // Arithmetic and funds (5xx)
    // =================================================================
    /// A checked multiply/add overflowed the working integer width.
    #[error("NM_ERR_500: arithmetic overflow")]
    ArithmeticOverflow,

    /// Royalty and service rates must sum to at most 10,000 bps.
    #[error("NM_ERR_501: fee rates {royalty_bps} + {service_bps} exceed 10000 bps")]
    InvalidFeeRate { royalty_bps: u32, service_bps: u32 },

    /// Pull-payment allowance to the engine does not cover the price.
    #[error("NM_ERR_502: allowance {allowance} does not cover price {required}")]
    InsufficientAllowance {
        allowance: Amount,
        required: Amount,
    },

    /// Escrow invariant breach: no held funds recorded for the order.
    #[error("NM_ERR_503: no escrow held for order at {key}")]
    InsufficientEscrow { key: OrderKey },
}

impl MarketError {
    /// Stable negative wire code for this error kind.
    #[must_use]
    pub fn code(&self) -> i32 {
        match self {
            Self::NotContractOwner(_) => -100,
            Self::NotAllowedUser(_) => -200,
            Self::NotAllowedPaymentToken(_) => -201,
            Self::NotTokenOwner(_) => -300,
            Self::TokenOwner(_) => -301,
            Self::NotSelf { .. } => -302,
            Self::NotAllowedToCancelOrder { .. } => -303,
            Self::SellOrderNotFound { .. } => -304,
            Self::BuyOrderNotFound { .. } => -305,
            Self::Expired { .. } => -306,
            Self::NotEqualAmount { .. } => -307,
            Self::ZeroPrice => -308,
            Self::UnknownAsset { .. } => -309,
            Self::ZeroAddressDestination => -400,
            Self::ThisAddressDestination => -401,
            Self::SelfTrade(_) => -402,
            Self::ArithmeticOverflow => -500,
            Self::InvalidFeeRate { .. } => -501,
            Self::InsufficientAllowance { .. } => -502,
            Self::InsufficientEscrow { .. } => -503,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenId;

    fn key() -> OrderKey {
        OrderKey::new(Address([1u8; 20]), TokenId(7), Address::ZERO, 100)
    }

    #[test]
    fn error_display_contains_prefix() {
        let err = MarketError::NotAllowedUser(Address::ZERO);
        let msg = format!("{err}");
        assert!(msg.starts_with("NM_ERR_200"), "Got: {msg}");
    }

    #[test]
    fn not_equal_amount_display() {
        let err = MarketError::NotEqualAmount {
            attached: 50,
            required: 100,
        };
        let msg = format!("{err}");
        assert!(msg.contains("NM_ERR_307"));
        assert!(msg.contains("50"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn wire_codes_are_negative_and_distinct() {
        let errors = vec![
            MarketError::NotContractOwner(Address::ZERO),
            MarketError::NotAllowedUser(Address::ZERO),
            MarketError::NotAllowedPaymentToken(Address::ZERO),
            MarketError::NotTokenOwner(Address::ZERO),
            MarketError::TokenOwner(Address::ZERO),
            MarketError::NotSelf { key: key() },
            MarketError::NotAllowedToCancelOrder { key: key() },
            MarketError::SellOrderNotFound { key: key() },
            MarketError::BuyOrderNotFound { key: key() },
            MarketError::Expired { key: key() },
            MarketError::NotEqualAmount {
                attached: 0,
                required: 1,
            },
            MarketError::ZeroPrice,
            MarketError::UnknownAsset {
                collection: Address::ZERO,
                token_id: TokenId(0),
            },
            MarketError::ZeroAddressDestination,
            MarketError::ThisAddressDestination,
            MarketError::SelfTrade(Address::ZERO),
            MarketError::ArithmeticOverflow,
            MarketError::InvalidFeeRate {
                royalty_bps: 9000,
                service_bps: 2000,
            },
            MarketError::InsufficientAllowance {
                allowance: 0,
                required: 1,
            },
            MarketError::InsufficientEscrow { key: key() },
        ];
        let mut codes: Vec<i32> = errors.iter().map(MarketError::code).collect();
        assert!(codes.iter().all(|c| *c < 0));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len(), "codes must be distinct");
    }

    #[test]
    fn all_errors_have_nm_err_prefix() {
        let errors = vec![
            MarketError::ZeroPrice,
            MarketError::ArithmeticOverflow,
            MarketError::Expired { key: key() },
            MarketError::SelfTrade(Address::ZERO),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("NM_ERR_"),
                "Error missing NM_ERR_ prefix: {msg}"
            );
        }
    }
}

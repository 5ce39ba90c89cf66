//! # nftmatch-policy
//!
//! **Policy plane**: who may trade, what they may pay with, and the native
//! funds the engine holds while buy orders are outstanding.
//!
//! ## Components
//!
//! 1. **AccessPolicy**: allowlist membership (via the host's [`Membership`]
//!    capability) and the approved payment-token registry
//! 2. **EscrowLedger**: per-order native funds held by the marketplace
//!
//! ## Fail-closed
//!
//! Every trading transition goes through the policy checks before touching
//! the book; a caller or payment token the policy rejects never reaches
//! settlement.

pub mod access;
pub mod escrow;

pub use access::{AccessPolicy, Membership};
pub use escrow::EscrowLedger;

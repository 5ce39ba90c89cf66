//! # nftmatch-settlement
//!
//! **The Settlement Engine**: orchestrates `SetOrder`, `CancelOrder`, and
//! `FulfillOrder` over the order store, access policy, and escrow ledger.
//!
//! ## Architecture
//!
//! The engine owns all mutable marketplace state and performs no I/O:
//! 1. Validates the caller and request through the policy plane
//! 2. Consults the host's capabilities (asset ownership, royalties,
//!    token allowances) — synchronous reads, no suspension
//! 3. Mutates the book and escrow ledger
//! 4. Returns a [`TransitionReceipt`](nftmatch_types::TransitionReceipt):
//!    ordered events plus the outbound calls the host executes after commit
//!
//! ## Atomicity
//!
//! Every transition either fully commits or returns an error with zero
//! observable state change and zero emitted events. Guards run before any
//! mutation; the only fallible step after the guards is an escrow lookup
//! whose failure would be an internal invariant breach.

pub mod capability;
pub mod engine;
pub mod request;

pub use capability::{AssetOwnership, MarketHost, RoyaltyInfo, TokenAllowance};
pub use engine::{CallContext, SettlementEngine};
pub use request::Request;

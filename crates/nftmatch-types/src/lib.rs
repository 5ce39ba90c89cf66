//! # nftmatch-types
//!
//! Shared types, errors, and configuration for the **nftmatch** fixed-price
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`TokenId`], [`BlockHeight`], [`Amount`]
//! - **Order model**: [`Order`], [`OrderSide`], [`OrderKey`]
//! - **Fee model**: [`FeeSchedule`], [`FeeSplit`]
//! - **Result model**: [`MarketEvent`], [`Effect`], [`TransitionReceipt`]
//! - **Configuration**: [`MarketplaceConfig`]
//! - **Errors**: [`MarketError`] with `NM_ERR_` prefix codes
//! - **Constants**: basis-point denominator and system defaults

pub mod address;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod fees;
pub mod order;
pub mod receipt;

// Re-export all primary types at crate root for ergonomic imports:
//   use nftmatch_types::{Address, Order, OrderSide, MarketError, ...};

pub use address::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use fees::*;
pub use order::*;
pub use receipt::*;

// Constants are accessed via `nftmatch_types::constants::FOO`
// (not re-exported to avoid name collisions).

//! # nftmatch-book
//!
//! **The Order Store**: two side-segregated indexed mappings holding the
//! outstanding sell and buy orders of a marketplace.
//!
//! The store is a pure state container:
//!
//! - **Zero side effects**: no capability calls, no balance checks
//! - **Unconditional writes**: `put` overwrites; the settlement engine
//!   enforces key-uniqueness and maker-exclusivity before calling it
//! - **Deterministic iteration**: `BTreeMap` keys, so queries and receipts
//!   read identically on every replica

pub mod book;

pub use book::OrderBook;

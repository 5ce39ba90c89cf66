//! System-wide constants for the nftmatch settlement engine.

/// Basis-point denominator: 10,000 bps = 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Default marketplace service fee in basis points (2.5%).
pub const DEFAULT_SERVICE_FEE_BPS: u32 = 250;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "nftmatch";

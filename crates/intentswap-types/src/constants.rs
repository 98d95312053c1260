//! System-wide constants for the intentswap matching engine.

/// Default matching pass period in milliseconds.
pub const DEFAULT_PASS_INTERVAL_MS: u64 = 2000;

/// Maximum decimal precision carried on amounts (decimal places).
pub const AMOUNT_PRECISION: u32 = 8;

/// The demo venue's primary asset.
pub const DEMO_BASE_ASSET: &str = "ETH";

/// The demo venue's counter asset.
pub const DEMO_QUOTE_ASSET: &str = "XAN";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "intentswap";

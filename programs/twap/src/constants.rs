//! Protocol constants

/// Seed prefix for the per-market TWAP record PDA
pub const TWAP_MARKET_SEED: &[u8] = b"twap_market";

/// Basis point denominator
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Widest bid/ask spread (in bps of the best bid) at which the book is still
/// observed. Wider books are skipped: a thin book is the cheapest to move.
pub const MAX_SPREAD_BPS: u64 = 2_000; // 20%

/// Market expiry value meaning "never expires"
pub const NO_EXPIRY: i64 = 0;

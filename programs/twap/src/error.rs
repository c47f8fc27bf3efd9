//! Error definitions

use anchor_lang::prelude::*;

#[error_code]
pub enum TwapError {
    // Record errors
    #[msg("No TWAP record exists at the supplied address")]
    RecordNotFound,

    #[msg("A TWAP record already exists for this market")]
    TwapMarketAlreadyExists,

    #[msg("Supplied market does not match the market governed by the TWAP record")]
    MarketMismatch,

    #[msg("Supplied TWAP record address is not the one derived from the market")]
    InvalidTwapMarket,

    #[msg("Rent receiver must be the account that paid for the TWAP record")]
    OwnershipViolation,

    #[msg("Insufficient lamports to fund the TWAP record")]
    InsufficientFundsForRent,

    // Lifecycle errors
    #[msg("Underlying market has not expired yet")]
    NotYetExpired,

    // Math errors
    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,

    #[msg("Arithmetic underflow")]
    ArithmeticUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Observation errors
    #[msg("Observation slot is older than the last recorded observation")]
    StaleObservationSlot,

    #[msg("Book is one-sided or empty; no observation was recorded")]
    EmptyBookNoObservation,

    #[msg("Book spread is too wide; no observation was recorded")]
    SpreadTooWide,

    #[msg("An observation was already taken in this slot")]
    ObservationAlreadyRecorded,

    // Market configuration errors
    #[msg("The `open_orders_admin` of the underlying market must be the TWAP record")]
    InvalidOpenOrdersAdmin,

    #[msg("The `close_market_admin` of the underlying market must be the TWAP record")]
    InvalidCloseMarketAdmin,

    #[msg("The `consume_events_admin` of the underlying market must be unset")]
    InvalidConsumeEventsAdmin,

    #[msg("Oracle-pegged orders distort the TWAP so markets with oracles are rejected")]
    NoOracles,

    #[msg("Underlying market must be fresh (seq num zero)")]
    InvalidSeqNum,

    #[msg("Maker fee must be zero")]
    InvalidMakerFee,

    #[msg("Taker fee must be zero")]
    InvalidTakerFee,
}

//! Event definitions

use anchor_lang::prelude::borsh;
use anchor_lang::prelude::*;

/// Event emitted when a TWAP record is created for a market
#[event]
pub struct TwapMarketCreated {
    pub twap_market: Pubkey,
    pub market: Pubkey,
    pub rent_payer: Pubkey,
    pub expected_value: u64,
    pub max_observation_change_per_update_lots: u64,
    pub expiry: i64,
    pub slot: u64,
}

/// Event emitted when a clamped observation is folded into the aggregator
#[event]
pub struct ObservationRecorded {
    pub twap_market: Pubkey,
    pub slot: u64,
    pub spot_price: u64,
    pub observation: u64,
    pub weighted_observation: u128,
    pub observation_aggregator: u128,
}

/// Why a price-moving call left the oracle untouched
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SkipReason {
    OneSidedBook = 0,
    SpreadTooWide = 1,
}

/// Event emitted when a price-moving call could not observe the book
#[event]
pub struct ObservationSkipped {
    pub twap_market: Pubkey,
    pub slot: u64,
    pub reason: SkipReason,
}

#[event]
pub struct OrdersPruned {
    pub twap_market: Pubkey,
    pub open_orders_account: Pubkey,
    pub limit: u8,
    pub timestamp: i64,
}

#[event]
pub struct FundsSettled {
    pub twap_market: Pubkey,
    pub open_orders_account: Pubkey,
    pub timestamp: i64,
}

/// Event emitted when the underlying market and its TWAP record are closed
#[event]
pub struct TwapMarketClosed {
    pub twap_market: Pubkey,
    pub market: Pubkey,
    pub rent_receiver: Pubkey,
    pub reclaimed_lamports: u64,
    pub final_twap: u64,
    pub timestamp: i64,
}

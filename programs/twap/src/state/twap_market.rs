//! Per-market TWAP record

use anchor_lang::prelude::*;
use crate::constants::NO_EXPIRY;
use crate::state::TwapOracle;
use crate::utils::derive_twap_market;

/// The durable oracle record of one underlying market. Lives at
/// `derive_twap_market(market)` and doubles as the market's open-orders and
/// close-market admin.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct TwapMarket {
    /// Underlying order book market this record governs
    pub market: Pubkey, // 32 bytes
    /// Bump of the record PDA
    pub pda_bump: u8, // 1 byte
    /// Underlying market expiry (unix seconds, 0 = never), copied at creation
    pub expiry: i64, // 8 bytes
    /// Paid for this record; the only valid rent receiver on close
    pub rent_payer: Pubkey, // 32 bytes
    /// Clamped TWAP accumulator
    pub twap_oracle: TwapOracle,
}

/// Lifecycle of a record. A closed record no longer exists in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketPhase {
    Active,
    Expired,
}

impl TwapMarket {
    /// Account size including discriminator
    pub const LEN: usize = 8 + // discriminator
        32 + // market
        1 + // pda_bump
        8 + // expiry
        32 + // rent_payer
        TwapOracle::LEN; // twap_oracle

    /// Address of the record for `market`
    pub fn address(market: &Pubkey) -> (Pubkey, u8) {
        derive_twap_market(market, &crate::ID)
    }

    pub fn is_expired(&self, unix_timestamp: i64) -> bool {
        self.expiry != NO_EXPIRY && unix_timestamp >= self.expiry
    }

    pub fn phase(&self, unix_timestamp: i64) -> MarketPhase {
        if self.is_expired(unix_timestamp) {
            MarketPhase::Expired
        } else {
            MarketPhase::Active
        }
    }
}

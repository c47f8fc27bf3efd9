//! PDA derivation helpers
//!
//! A TWAP record lives at an address derived from the market it governs, so
//! any party can recompute it from the market key alone and at most one
//! record can ever exist per market.

use anchor_lang::prelude::*;
use crate::constants::TWAP_MARKET_SEED;

/// Derive the TWAP record PDA for an underlying market
pub fn derive_twap_market(market: &Pubkey, program_id: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[TWAP_MARKET_SEED, market.as_ref()], program_id)
}

/// Signer seeds for the TWAP record PDA (seed, market, bump)
pub fn twap_market_signer_seeds<'a>(market: &'a Pubkey, bump: &'a u8) -> [&'a [u8]; 3] {
    [TWAP_MARKET_SEED, market.as_ref(), bytemuck::bytes_of(bump)]
}

use crate::{
    error::TwapError,
    events::TwapMarketClosed,
    instructions::ProxyContext,
    market::OrderBookMarket,
    state::RecordStore,
};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloseMarket {
    /// Must be the record's rent payer
    pub close_market_rent_receiver: Pubkey,
    pub twap_market: Pubkey,
    pub market: Pubkey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseMarketResult {
    /// Lamports returned from the record to the rent payer
    pub reclaimed_lamports: u64,
    /// TWAP at the moment of closing
    pub final_twap: u64,
}

/// Close the underlying market and the record, refunding both rents to the
/// record's rent payer. The market must have expired and must itself accept
/// the close.
pub fn close_market<S: RecordStore, M: OrderBookMarket>(
    ctx: &mut ProxyContext<'_, S, M>,
    accounts: &CloseMarket,
) -> Result<CloseMarketResult> {
    let twap_market = ctx.load_twap_market(&accounts.twap_market, &accounts.market)?;
    require_keys_eq!(
        twap_market.rent_payer,
        accounts.close_market_rent_receiver,
        TwapError::OwnershipViolation
    );

    let now = ctx.now();
    require!(twap_market.is_expired(now), TwapError::NotYetExpired);

    let final_twap = twap_market.twap_oracle.twap()?;
    let rent_receiver = twap_market.rent_payer;
    ctx.forward(
        &accounts.twap_market,
        &twap_market,
        "close_market",
        |book, authority| book.close_market(authority, &rent_receiver),
    )?;

    let reclaimed_lamports = ctx.store.close(&accounts.twap_market, &rent_receiver)?;

    msg!(
        "TWAP market {} closed with final TWAP {}",
        accounts.twap_market,
        final_twap
    );
    emit!(TwapMarketClosed {
        twap_market: accounts.twap_market,
        market: accounts.market,
        rent_receiver,
        reclaimed_lamports,
        final_twap,
        timestamp: now,
    });

    Ok(CloseMarketResult {
        reclaimed_lamports,
        final_twap,
    })
}

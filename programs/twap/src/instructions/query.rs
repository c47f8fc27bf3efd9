use crate::{
    error::TwapError,
    instructions::ProxyContext,
    market::OrderBookMarket,
    state::{MarketPhase, RecordStore},
};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GetBestBidAndAsk {
    pub market: Pubkey,
}

/// Top of the book in price lots, ignoring expired orders
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BestBidAndAsk {
    pub best_bid: Option<i64>,
    pub best_ask: Option<i64>,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct GetTwap {
    pub twap_market: Pubkey,
    pub market: Pubkey,
}

/// Point-in-time view of a record's oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwapSnapshot {
    pub twap: u64,
    pub last_observation: u64,
    pub observed_slots: u64,
    pub last_updated_slot: u64,
    pub phase: MarketPhase,
}

pub fn get_best_bid_and_ask<S: RecordStore, M: OrderBookMarket>(
    ctx: &ProxyContext<'_, S, M>,
    accounts: &GetBestBidAndAsk,
) -> Result<BestBidAndAsk> {
    require_keys_eq!(ctx.book.address(), accounts.market, TwapError::MarketMismatch);

    let now = u64::try_from(ctx.now()).map_err(|_| TwapError::ArithmeticOverflow)?;
    Ok(BestBidAndAsk {
        best_bid: ctx.book.best_bid_price(now),
        best_ask: ctx.book.best_ask_price(now),
    })
}

/// Read the TWAP without touching the book
pub fn get_twap<S: RecordStore, M: OrderBookMarket>(
    ctx: &ProxyContext<'_, S, M>,
    accounts: &GetTwap,
) -> Result<TwapSnapshot> {
    let twap_market = ctx.load_twap_market(&accounts.twap_market, &accounts.market)?;
    let oracle = &twap_market.twap_oracle;

    Ok(TwapSnapshot {
        twap: oracle.twap()?,
        last_observation: oracle.last_observation,
        observed_slots: oracle.observed_slots()?,
        last_updated_slot: oracle.last_updated_slot,
        phase: twap_market.phase(ctx.now()),
    })
}

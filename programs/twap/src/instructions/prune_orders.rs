use crate::{
    error::TwapError,
    events::OrdersPruned,
    instructions::ProxyContext,
    market::OrderBookMarket,
    state::RecordStore,
};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PruneOrders {
    pub twap_market: Pubkey,
    /// Account whose resting orders are removed
    pub open_orders_account: Pubkey,
    pub market: Pubkey,
}

/// Remove up to `limit` resting orders from an expired market. Anyone may
/// call this once the market has expired.
pub fn prune_orders<S: RecordStore, M: OrderBookMarket>(
    ctx: &mut ProxyContext<'_, S, M>,
    accounts: &PruneOrders,
    limit: u8,
) -> Result<()> {
    let twap_market = ctx.load_twap_market(&accounts.twap_market, &accounts.market)?;
    let now = ctx.now();
    require!(twap_market.is_expired(now), TwapError::NotYetExpired);

    ctx.forward(
        &accounts.twap_market,
        &twap_market,
        "prune_orders",
        |book, authority| book.prune_orders(authority, accounts, limit),
    )?;

    emit!(OrdersPruned {
        twap_market: accounts.twap_market,
        open_orders_account: accounts.open_orders_account,
        limit,
        timestamp: now,
    });
    Ok(())
}

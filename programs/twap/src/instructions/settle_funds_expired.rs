use crate::{
    error::TwapError,
    events::FundsSettled,
    instructions::ProxyContext,
    market::OrderBookMarket,
    state::RecordStore,
};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleFundsExpired {
    pub twap_market: Pubkey,
    pub open_orders_account: Pubkey,
    pub market: Pubkey,
    /// Owner's base token account
    pub user_base_account: Pubkey,
    /// Owner's quote token account
    pub user_quote_account: Pubkey,
}

/// Pay an open-orders account's free balances out to its owner after the
/// market expired, so the market can be wound down without the owner.
pub fn settle_funds_expired<S: RecordStore, M: OrderBookMarket>(
    ctx: &mut ProxyContext<'_, S, M>,
    accounts: &SettleFundsExpired,
) -> Result<()> {
    let twap_market = ctx.load_twap_market(&accounts.twap_market, &accounts.market)?;
    let now = ctx.now();
    require!(twap_market.is_expired(now), TwapError::NotYetExpired);

    ctx.forward(
        &accounts.twap_market,
        &twap_market,
        "settle_funds_expired",
        |book, authority| book.settle_funds_expired(authority, accounts),
    )?;

    emit!(FundsSettled {
        twap_market: accounts.twap_market,
        open_orders_account: accounts.open_orders_account,
        timestamp: now,
    });
    Ok(())
}

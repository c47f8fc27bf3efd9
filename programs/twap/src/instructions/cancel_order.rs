use crate::{
    instructions::ProxyContext,
    market::{OrderBookMarket, Side},
    state::RecordStore,
};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelOrder {
    pub signer: Pubkey,
    pub twap_market: Pubkey,
    pub open_orders_account: Pubkey,
    pub market: Pubkey,
}

/// Cancel one order by its client id. Cancels never observe the book.
/// Returns the cancelled base lots.
pub fn cancel_order_by_client_id<S: RecordStore, M: OrderBookMarket>(
    ctx: &mut ProxyContext<'_, S, M>,
    accounts: &CancelOrder,
    client_order_id: u64,
) -> Result<i64> {
    let twap_market = ctx.load_twap_market(&accounts.twap_market, &accounts.market)?;
    ctx.forward(
        &accounts.twap_market,
        &twap_market,
        "cancel_order_by_client_id",
        |book, authority| book.cancel_order_by_client_order_id(authority, accounts, client_order_id),
    )
}

/// Cancel up to `limit` orders, optionally only on one side of the book
pub fn cancel_all_orders<S: RecordStore, M: OrderBookMarket>(
    ctx: &mut ProxyContext<'_, S, M>,
    accounts: &CancelOrder,
    side_option: Option<Side>,
    limit: u8,
) -> Result<()> {
    let twap_market = ctx.load_twap_market(&accounts.twap_market, &accounts.market)?;
    ctx.forward(
        &accounts.twap_market,
        &twap_market,
        "cancel_all_orders",
        |book, authority| book.cancel_all_orders(authority, accounts, side_option, limit),
    )
}

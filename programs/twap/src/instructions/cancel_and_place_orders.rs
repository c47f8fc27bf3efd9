use crate::{
    instructions::{Forwarded, ProxyContext},
    market::{OrderBookMarket, PlaceOrderArgs},
    state::RecordStore,
};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CancelAndPlaceOrders {
    pub signer: Pubkey,
    pub open_orders_account: Pubkey,
    pub twap_market: Pubkey,
    pub user_base_account: Pubkey,
    pub user_quote_account: Pubkey,
    pub market: Pubkey,
}

/// Observe the book once, then atomically cancel and re-place a batch.
/// Returns one order id slot per placed order.
pub fn cancel_and_place_orders<S: RecordStore, M: OrderBookMarket>(
    ctx: &mut ProxyContext<'_, S, M>,
    accounts: &CancelAndPlaceOrders,
    cancel_client_order_ids: Vec<u64>,
    place_orders: Vec<PlaceOrderArgs>,
) -> Result<Forwarded<Vec<Option<u128>>>> {
    ctx.observe_and_forward(
        &accounts.twap_market,
        &accounts.market,
        "cancel_and_place_orders",
        |book, authority| {
            book.cancel_and_place_orders(authority, accounts, &cancel_client_order_ids, &place_orders)
        },
    )
}

use crate::{
    instructions::{Forwarded, ProxyContext},
    market::{OrderBookMarket, PlaceOrderArgs},
    state::RecordStore,
};
use anchor_lang::prelude::*;

/// Accounts for placing or editing a resting order
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaceOrder {
    /// Owner or delegate of the open-orders account
    pub signer: Pubkey,
    pub open_orders_account: Pubkey,
    pub twap_market: Pubkey,
    /// Source of the deposited funds
    pub user_token_account: Pubkey,
    pub market: Pubkey,
    /// Market vault receiving the deposit
    pub market_vault: Pubkey,
}

/// Observe the book, then place an order. Returns the new order id, if the
/// order rests.
pub fn place_order<S: RecordStore, M: OrderBookMarket>(
    ctx: &mut ProxyContext<'_, S, M>,
    accounts: &PlaceOrder,
    args: PlaceOrderArgs,
) -> Result<Forwarded<Option<u128>>> {
    ctx.observe_and_forward(
        &accounts.twap_market,
        &accounts.market,
        "place_order",
        |book, authority| book.place_order(authority, accounts, &args),
    )
}

/// Observe the book, then replace the order tagged `client_order_id`.
/// `expected_cancel_size` guards against editing an order that was partially
/// filled in the meantime.
pub fn edit_order<S: RecordStore, M: OrderBookMarket>(
    ctx: &mut ProxyContext<'_, S, M>,
    accounts: &PlaceOrder,
    client_order_id: u64,
    expected_cancel_size: i64,
    args: PlaceOrderArgs,
) -> Result<Forwarded<Option<u128>>> {
    ctx.observe_and_forward(
        &accounts.twap_market,
        &accounts.market,
        "edit_order",
        |book, authority| {
            book.edit_order(authority, accounts, client_order_id, expected_cancel_size, &args)
        },
    )
}

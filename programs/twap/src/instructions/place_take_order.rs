use crate::{
    instructions::{Forwarded, ProxyContext},
    market::{OrderBookMarket, PlaceTakeOrderArgs},
    state::RecordStore,
};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaceTakeOrder {
    pub signer: Pubkey,
    pub twap_market: Pubkey,
    pub market: Pubkey,
    pub user_base_account: Pubkey,
    pub user_quote_account: Pubkey,
}

/// Observe the book, then take against it. A zero-size take records an
/// observation without trading, which is how keepers crank the oracle.
pub fn place_take_order<S: RecordStore, M: OrderBookMarket>(
    ctx: &mut ProxyContext<'_, S, M>,
    accounts: &PlaceTakeOrder,
    args: PlaceTakeOrderArgs,
) -> Result<Forwarded<()>> {
    ctx.observe_and_forward(
        &accounts.twap_market,
        &accounts.market,
        "place_take_order",
        |book, authority| book.place_take_order(authority, accounts, &args),
    )
}

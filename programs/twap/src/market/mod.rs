//! Underlying order book market.
//!
//! The proxy never matches orders itself. It reads the top of the book,
//! checks the market's admin configuration and forwards order-lifecycle
//! calls, each signed with the [`MarketAuthority`] of the governing record.

pub mod args;

pub use args::*;

use anchor_lang::prelude::*;
use crate::instructions::{
    CancelAndPlaceOrders, CancelOrder, PlaceOrder, PlaceTakeOrder, PruneOrders, SettleFundsExpired,
};
use crate::state::TwapMarket;
use crate::utils::twap_market_signer_seeds;

/// Admin configuration of the underlying market, as read at record creation
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct MarketConfig {
    pub open_orders_admin: Option<Pubkey>,
    pub close_market_admin: Option<Pubkey>,
    pub consume_events_admin: Option<Pubkey>,
    pub oracle_a: Option<Pubkey>,
    pub oracle_b: Option<Pubkey>,
    pub seq_num: u64,
    pub maker_fee: i64,
    pub taker_fee: i64,
    /// Unix seconds, 0 = never expires
    pub time_expiry: i64,
}

/// Delegated authority over one underlying market.
///
/// Only the proxy can mint one, and only from a record whose address and
/// market binding were verified in the same call.
#[derive(Debug)]
pub struct MarketAuthority {
    twap_market: Pubkey,
    market: Pubkey,
    bump: u8,
}

impl MarketAuthority {
    pub(crate) fn for_record(twap_market: Pubkey, record: &TwapMarket) -> Self {
        Self {
            twap_market,
            market: record.market,
            bump: record.pda_bump,
        }
    }

    /// The record address the market trusts as its admin
    pub fn key(&self) -> Pubkey {
        self.twap_market
    }

    /// The only market this authority is valid for
    pub fn market(&self) -> Pubkey {
        self.market
    }

    pub fn signer_seeds(&self) -> [&[u8]; 3] {
        twap_market_signer_seeds(&self.market, &self.bump)
    }
}

/// Capability surface of the underlying limit-order-book market.
///
/// Every mutator must either apply fully or fail without side effects; the
/// proxy commits its own oracle update only after the forwarded call
/// returns `Ok`.
pub trait OrderBookMarket {
    /// Address of the market account
    fn address(&self) -> Pubkey;

    fn config(&self) -> MarketConfig;

    /// Best resting bid price in lots, ignoring orders expired at `now_ts`
    fn best_bid_price(&self, now_ts: u64) -> Option<i64>;

    /// Best resting ask price in lots, ignoring orders expired at `now_ts`
    fn best_ask_price(&self, now_ts: u64) -> Option<i64>;

    fn place_order(
        &mut self,
        authority: &MarketAuthority,
        accounts: &PlaceOrder,
        args: &PlaceOrderArgs,
    ) -> Result<Option<u128>>;

    fn edit_order(
        &mut self,
        authority: &MarketAuthority,
        accounts: &PlaceOrder,
        client_order_id: u64,
        expected_cancel_size: i64,
        args: &PlaceOrderArgs,
    ) -> Result<Option<u128>>;

    fn place_take_order(
        &mut self,
        authority: &MarketAuthority,
        accounts: &PlaceTakeOrder,
        args: &PlaceTakeOrderArgs,
    ) -> Result<()>;

    fn cancel_and_place_orders(
        &mut self,
        authority: &MarketAuthority,
        accounts: &CancelAndPlaceOrders,
        cancel_client_order_ids: &[u64],
        place_orders: &[PlaceOrderArgs],
    ) -> Result<Vec<Option<u128>>>;

    /// Returns the cancelled base lots
    fn cancel_order_by_client_order_id(
        &mut self,
        authority: &MarketAuthority,
        accounts: &CancelOrder,
        client_order_id: u64,
    ) -> Result<i64>;

    fn cancel_all_orders(
        &mut self,
        authority: &MarketAuthority,
        accounts: &CancelOrder,
        side: Option<Side>,
        limit: u8,
    ) -> Result<()>;

    /// Remove up to `limit` resting orders of one open-orders account from an
    /// expired market
    fn prune_orders(
        &mut self,
        authority: &MarketAuthority,
        accounts: &PruneOrders,
        limit: u8,
    ) -> Result<()>;

    /// Credit an open-orders account's free balances to its owner's token
    /// accounts on an expired market
    fn settle_funds_expired(
        &mut self,
        authority: &MarketAuthority,
        accounts: &SettleFundsExpired,
    ) -> Result<()>;

    /// Close a wound-down market, paying its rent to `sol_destination`.
    /// The market itself rejects the close while positions remain.
    fn close_market(&mut self, authority: &MarketAuthority, sol_destination: &Pubkey) -> Result<()>;
}

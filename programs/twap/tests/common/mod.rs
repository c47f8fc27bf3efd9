//! Test helpers: an in-memory order book and a harness wiring it to a
//! memory-backed record store.

#![allow(dead_code)]

use anchor_lang::prelude::*;
use feels_twap::*;
use std::collections::BTreeSet;

pub const START_SLOT: u64 = 100;
pub const START_TS: i64 = 1_700_000_000;
pub const EXPIRY_TS: i64 = START_TS + 3_600;
pub const PAYER_FUNDS: u64 = 10_000_000_000;

// ============================================================================
// Mock Order Book
// ============================================================================

pub fn opposite(side: Side) -> Side {
    match side {
        Side::Bid => Side::Ask,
        Side::Ask => Side::Bid,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestingOrder {
    pub order_id: u128,
    pub owner: Pubkey,
    pub side: Side,
    pub price_lots: i64,
    pub base_lots: i64,
    pub client_order_id: u64,
    /// 0 = good till cancelled
    pub expiry_timestamp: u64,
}

impl RestingOrder {
    fn is_live(&self, now_ts: u64) -> bool {
        self.expiry_timestamp == 0 || now_ts < self.expiry_timestamp
    }
}

/// Price-time priority book with no fees and no event queue. Every mutator
/// checks the delegated authority the way the real market checks its admins.
#[derive(Debug)]
pub struct MockBook {
    pub address: Pubkey,
    pub config: MarketConfig,
    pub orders: Vec<RestingOrder>,
    pub now_ts: u64,
    pub traded_base_lots: i64,
    pub settled: BTreeSet<Pubkey>,
    pub closed_to: Option<Pubkey>,
    /// Reject the next mutating call
    pub fail_next: bool,
    pub calls: Vec<&'static str>,
    next_order_id: u128,
}

impl MockBook {
    /// A market administered by the record derived from its address
    pub fn new(address: Pubkey, time_expiry: i64) -> Self {
        let (twap_market, _) = TwapMarket::address(&address);
        Self {
            address,
            config: MarketConfig {
                open_orders_admin: Some(twap_market),
                close_market_admin: Some(twap_market),
                time_expiry,
                ..MarketConfig::default()
            },
            orders: Vec::new(),
            now_ts: START_TS as u64,
            traded_base_lots: 0,
            settled: BTreeSet::new(),
            closed_to: None,
            fail_next: false,
            calls: Vec::new(),
            next_order_id: 1,
        }
    }

    /// Rest an order directly, bypassing matching
    pub fn rest(&mut self, owner: Pubkey, side: Side, price_lots: i64, base_lots: i64) -> u128 {
        self.rest_with_expiry(owner, side, price_lots, base_lots, 0)
    }

    pub fn rest_with_expiry(
        &mut self,
        owner: Pubkey,
        side: Side,
        price_lots: i64,
        base_lots: i64,
        expiry_timestamp: u64,
    ) -> u128 {
        let order_id = self.next_order_id;
        self.next_order_id += 1;
        self.orders.push(RestingOrder {
            order_id,
            owner,
            side,
            price_lots,
            base_lots,
            client_order_id: 0,
            expiry_timestamp,
        });
        order_id
    }

    pub fn orders_of(&self, owner: &Pubkey) -> usize {
        self.orders.iter().filter(|order| order.owner == *owner).count()
    }

    fn check(&mut self, authority: &MarketAuthority, call: &'static str) -> Result<()> {
        if authority.market() != self.address {
            return Err(ProgramError::InvalidAccountData.into());
        }
        if self.config.open_orders_admin != Some(authority.key()) {
            return Err(ProgramError::MissingRequiredSignature.into());
        }
        let signer = Pubkey::create_program_address(&authority.signer_seeds(), &feels_twap::ID)
            .map_err(|_| ProgramError::InvalidSeeds)?;
        if signer != authority.key() {
            return Err(ProgramError::InvalidSeeds.into());
        }
        if self.closed_to.is_some() {
            return Err(ProgramError::UninitializedAccount.into());
        }
        if std::mem::take(&mut self.fail_next) {
            return Err(ProgramError::Custom(0x1770).into());
        }
        self.calls.push(call);
        Ok(())
    }

    fn best_index(&self, side: Side, now_ts: u64) -> Option<usize> {
        let live = self
            .orders
            .iter()
            .enumerate()
            .filter(|(_, order)| order.side == side && order.is_live(now_ts));
        match side {
            Side::Bid => live
                .max_by(|(_, a), (_, b)| {
                    a.price_lots
                        .cmp(&b.price_lots)
                        .then(b.order_id.cmp(&a.order_id))
                })
                .map(|(index, _)| index),
            Side::Ask => live
                .min_by(|(_, a), (_, b)| {
                    a.price_lots
                        .cmp(&b.price_lots)
                        .then(a.order_id.cmp(&b.order_id))
                })
                .map(|(index, _)| index),
        }
    }

    /// Match a taker against the opposite side. Returns the unfilled base lots.
    fn take(&mut self, side: Side, limit_price: i64, mut base_lots: i64, levels: u8) -> i64 {
        let maker_side = opposite(side);
        let mut matched_levels = 0u8;
        while base_lots > 0 && matched_levels < levels.max(1) {
            let Some(index) = self.best_index(maker_side, self.now_ts) else {
                break;
            };
            let maker = &mut self.orders[index];
            let crosses = match side {
                Side::Bid => maker.price_lots <= limit_price,
                Side::Ask => maker.price_lots >= limit_price,
            };
            if !crosses {
                break;
            }
            let fill = base_lots.min(maker.base_lots);
            maker.base_lots -= fill;
            base_lots -= fill;
            self.traded_base_lots += fill;
            if maker.base_lots == 0 {
                self.orders.remove(index);
            }
            matched_levels += 1;
        }
        base_lots
    }

    fn crosses_book(&self, side: Side, price_lots: i64) -> bool {
        match side {
            Side::Bid => self
                .best_ask_price(self.now_ts)
                .is_some_and(|ask| ask <= price_lots),
            Side::Ask => self
                .best_bid_price(self.now_ts)
                .is_some_and(|bid| bid >= price_lots),
        }
    }

    fn submit(&mut self, owner: Pubkey, args: &PlaceOrderArgs) -> Result<Option<u128>> {
        if args.price_lots <= 0 && args.order_type != PlaceOrderType::Market {
            return Err(ProgramError::InvalidArgument.into());
        }
        if args.order_type == PlaceOrderType::PostOnly && self.crosses_book(args.side, args.price_lots) {
            return Ok(None);
        }

        let limit_price = match (args.order_type, args.side) {
            (PlaceOrderType::Market, Side::Bid) => i64::MAX,
            (PlaceOrderType::Market, Side::Ask) => 0,
            _ => args.price_lots,
        };
        let remaining = self.take(args.side, limit_price, args.max_base_lots, args.limit);

        let rests = matches!(
            args.order_type,
            PlaceOrderType::Limit | PlaceOrderType::PostOnly | PlaceOrderType::PostOnlySlide
        );
        if remaining == 0 || !rests {
            return Ok(None);
        }

        let order_id = self.rest_with_expiry(
            owner,
            args.side,
            args.price_lots,
            remaining,
            args.expiry_timestamp,
        );
        if let Some(order) = self.orders.last_mut() {
            order.client_order_id = args.client_order_id;
        }
        Ok(Some(order_id))
    }

    fn cancel_client_order(&mut self, owner: &Pubkey, client_order_id: u64) -> Option<i64> {
        let index = self
            .orders
            .iter()
            .position(|order| order.owner == *owner && order.client_order_id == client_order_id)?;
        Some(self.orders.remove(index).base_lots)
    }

    fn remove_orders(&mut self, owner: &Pubkey, side: Option<Side>, limit: u8) {
        let mut removed = 0u8;
        self.orders.retain(|order| {
            let hit = order.owner == *owner && side.map_or(true, |side| order.side == side);
            if hit && removed < limit {
                removed += 1;
                false
            } else {
                true
            }
        });
    }
}

impl OrderBookMarket for MockBook {
    fn address(&self) -> Pubkey {
        self.address
    }

    fn config(&self) -> MarketConfig {
        self.config.clone()
    }

    fn best_bid_price(&self, now_ts: u64) -> Option<i64> {
        self.best_index(Side::Bid, now_ts)
            .map(|index| self.orders[index].price_lots)
    }

    fn best_ask_price(&self, now_ts: u64) -> Option<i64> {
        self.best_index(Side::Ask, now_ts)
            .map(|index| self.orders[index].price_lots)
    }

    fn place_order(
        &mut self,
        authority: &MarketAuthority,
        accounts: &PlaceOrder,
        args: &PlaceOrderArgs,
    ) -> Result<Option<u128>> {
        self.check(authority, "place_order")?;
        self.submit(accounts.open_orders_account, args)
    }

    fn edit_order(
        &mut self,
        authority: &MarketAuthority,
        accounts: &PlaceOrder,
        client_order_id: u64,
        expected_cancel_size: i64,
        args: &PlaceOrderArgs,
    ) -> Result<Option<u128>> {
        self.check(authority, "edit_order")?;
        let owner = accounts.open_orders_account;
        let cancelled = self.cancel_client_order(&owner, client_order_id).unwrap_or(0);
        let filled_meanwhile = expected_cancel_size - cancelled;
        let mut args = *args;
        args.max_base_lots -= filled_meanwhile.max(0);
        if args.max_base_lots <= 0 {
            return Ok(None);
        }
        self.submit(owner, &args)
    }

    fn place_take_order(
        &mut self,
        authority: &MarketAuthority,
        _accounts: &PlaceTakeOrder,
        args: &PlaceTakeOrderArgs,
    ) -> Result<()> {
        self.check(authority, "place_take_order")?;
        if args.max_base_lots == 0 {
            return Ok(());
        }
        self.take(args.side, args.price_lots, args.max_base_lots, args.limit);
        Ok(())
    }

    fn cancel_and_place_orders(
        &mut self,
        authority: &MarketAuthority,
        accounts: &CancelAndPlaceOrders,
        cancel_client_order_ids: &[u64],
        place_orders: &[PlaceOrderArgs],
    ) -> Result<Vec<Option<u128>>> {
        self.check(authority, "cancel_and_place_orders")?;
        let owner = accounts.open_orders_account;
        let snapshot = (self.orders.clone(), self.traded_base_lots);
        for client_order_id in cancel_client_order_ids {
            self.cancel_client_order(&owner, *client_order_id);
        }
        let placed: Result<Vec<Option<u128>>> = place_orders
            .iter()
            .map(|args| self.submit(owner, args))
            .collect();
        if placed.is_err() {
            (self.orders, self.traded_base_lots) = snapshot;
        }
        placed
    }

    fn cancel_order_by_client_order_id(
        &mut self,
        authority: &MarketAuthority,
        accounts: &CancelOrder,
        client_order_id: u64,
    ) -> Result<i64> {
        self.check(authority, "cancel_order_by_client_order_id")?;
        self.cancel_client_order(&accounts.open_orders_account, client_order_id)
            .ok_or_else(|| ProgramError::InvalidArgument.into())
    }

    fn cancel_all_orders(
        &mut self,
        authority: &MarketAuthority,
        accounts: &CancelOrder,
        side: Option<Side>,
        limit: u8,
    ) -> Result<()> {
        self.check(authority, "cancel_all_orders")?;
        self.remove_orders(&accounts.open_orders_account, side, limit);
        Ok(())
    }

    fn prune_orders(
        &mut self,
        authority: &MarketAuthority,
        accounts: &PruneOrders,
        limit: u8,
    ) -> Result<()> {
        self.check(authority, "prune_orders")?;
        self.remove_orders(&accounts.open_orders_account, None, limit);
        Ok(())
    }

    fn settle_funds_expired(
        &mut self,
        authority: &MarketAuthority,
        accounts: &SettleFundsExpired,
    ) -> Result<()> {
        self.check(authority, "settle_funds_expired")?;
        self.settled.insert(accounts.open_orders_account);
        Ok(())
    }

    fn close_market(&mut self, authority: &MarketAuthority, sol_destination: &Pubkey) -> Result<()> {
        self.check(authority, "close_market")?;
        if !self.orders.is_empty() {
            return Err(ProgramError::AccountAlreadyInitialized.into());
        }
        self.closed_to = Some(*sol_destination);
        Ok(())
    }
}

// ============================================================================
// Harness
// ============================================================================

/// One market, its record address and a funded payer
pub struct Harness {
    pub store: MemoryStore,
    pub book: MockBook,
    pub clock: Clock,
    pub market: Pubkey,
    pub twap_market: Pubkey,
    pub payer: Pubkey,
    pub trader: Pubkey,
}

impl Harness {
    pub fn new(time_expiry: i64) -> Self {
        let market = Pubkey::new_unique();
        let (twap_market, _) = TwapMarket::address(&market);
        let payer = Pubkey::new_unique();

        let mut store = MemoryStore::new();
        store.fund(&payer, PAYER_FUNDS).unwrap();

        Self {
            store,
            book: MockBook::new(market, time_expiry),
            clock: Clock {
                slot: START_SLOT,
                unix_timestamp: START_TS,
                ..Clock::default()
            },
            market,
            twap_market,
            payer,
            trader: Pubkey::new_unique(),
        }
    }

    /// Harness with a record already created
    pub fn with_record(expected_value: u64, max_change: u64) -> Self {
        let mut harness = Self::new(EXPIRY_TS);
        harness.create(expected_value, max_change).unwrap();
        harness
    }

    pub fn ctx(&mut self) -> ProxyContext<'_, MemoryStore, MockBook> {
        ProxyContext::new(&mut self.store, &mut self.book, self.clock.clone())
    }

    pub fn create(&mut self, expected_value: u64, max_change: u64) -> Result<TwapMarket> {
        let accounts = CreateTwapMarket {
            market: self.market,
            twap_market: self.twap_market,
            payer: self.payer,
        };
        let params = CreateTwapMarketParams {
            expected_value,
            max_observation_change_per_update_lots: max_change,
        };
        create_twap_market(&mut self.ctx(), &accounts, params)
    }

    pub fn record(&self) -> TwapMarket {
        self.store.load(&self.twap_market).unwrap().unwrap()
    }

    pub fn oracle(&self) -> TwapOracle {
        self.record().twap_oracle
    }

    pub fn advance_slots(&mut self, slots: u64) {
        self.clock.slot += slots;
    }

    pub fn warp_to_timestamp(&mut self, unix_timestamp: i64) {
        self.clock.unix_timestamp = unix_timestamp;
        self.book.now_ts = unix_timestamp as u64;
    }

    /// Replace the book with one bid and one ask
    pub fn set_quotes(&mut self, best_bid: i64, best_ask: i64) {
        let maker = Pubkey::new_unique();
        self.book.orders.clear();
        self.book.rest(maker, Side::Bid, best_bid, 1_000);
        self.book.rest(maker, Side::Ask, best_ask, 1_000);
    }

    pub fn place_accounts(&self) -> PlaceOrder {
        PlaceOrder {
            signer: self.trader,
            open_orders_account: self.trader,
            twap_market: self.twap_market,
            user_token_account: Pubkey::new_unique(),
            market: self.market,
            market_vault: Pubkey::new_unique(),
        }
    }

    pub fn take_accounts(&self) -> PlaceTakeOrder {
        PlaceTakeOrder {
            signer: self.trader,
            twap_market: self.twap_market,
            market: self.market,
            user_base_account: Pubkey::new_unique(),
            user_quote_account: Pubkey::new_unique(),
        }
    }

    pub fn cancel_accounts(&self) -> CancelOrder {
        CancelOrder {
            signer: self.trader,
            twap_market: self.twap_market,
            open_orders_account: self.trader,
            market: self.market,
        }
    }

    pub fn cancel_and_place_accounts(&self) -> CancelAndPlaceOrders {
        CancelAndPlaceOrders {
            signer: self.trader,
            open_orders_account: self.trader,
            twap_market: self.twap_market,
            user_base_account: Pubkey::new_unique(),
            user_quote_account: Pubkey::new_unique(),
            market: self.market,
        }
    }

    pub fn prune_accounts(&self) -> PruneOrders {
        PruneOrders {
            twap_market: self.twap_market,
            open_orders_account: self.trader,
            market: self.market,
        }
    }

    pub fn settle_accounts(&self) -> SettleFundsExpired {
        SettleFundsExpired {
            twap_market: self.twap_market,
            open_orders_account: self.trader,
            market: self.market,
            user_base_account: Pubkey::new_unique(),
            user_quote_account: Pubkey::new_unique(),
        }
    }

    pub fn close_accounts(&self, rent_receiver: Pubkey) -> CloseMarket {
        CloseMarket {
            close_market_rent_receiver: rent_receiver,
            twap_market: self.twap_market,
            market: self.market,
        }
    }

    /// Zero-size take: observes the book without trading
    pub fn crank(&mut self) -> Result<Forwarded<()>> {
        let accounts = self.take_accounts();
        place_take_order(&mut self.ctx(), &accounts, crank_args())
    }

    /// Advance one slot with the given quotes and crank
    pub fn observe_at(&mut self, best_bid: i64, best_ask: i64) -> ObservationOutcome {
        self.advance_slots(1);
        self.set_quotes(best_bid, best_ask);
        self.crank().unwrap().observation
    }
}

// ============================================================================
// Order Builders
// ============================================================================

pub fn limit_order(side: Side, price_lots: i64, max_base_lots: i64, client_order_id: u64) -> PlaceOrderArgs {
    PlaceOrderArgs {
        side,
        price_lots,
        max_base_lots,
        max_quote_lots_including_fees: i64::MAX,
        client_order_id,
        order_type: PlaceOrderType::Limit,
        expiry_timestamp: 0,
        self_trade_behavior: SelfTradeBehavior::DecrementTake,
        limit: 10,
    }
}

pub fn crank_args() -> PlaceTakeOrderArgs {
    PlaceTakeOrderArgs {
        side: Side::Bid,
        price_lots: 1,
        max_base_lots: 0,
        max_quote_lots_including_fees: 0,
        order_type: PlaceOrderType::ImmediateOrCancel,
        limit: 1,
    }
}

// ============================================================================
// Assertions
// ============================================================================

pub fn assert_twap_error<T: std::fmt::Debug>(result: Result<T>, expected: TwapError) {
    match result {
        Ok(value) => panic!("expected {}, got Ok({:?})", expected.name(), value),
        Err(err) => assert!(
            err.to_string().contains(&expected.name()),
            "expected {}, got {}",
            expected.name(),
            err
        ),
    }
}

/// The operation failed with the market's own error, passed through unchanged
pub fn assert_market_error<T: std::fmt::Debug>(result: Result<T>, expected: ProgramError) {
    match result {
        Err(Error::ProgramError(err)) => assert_eq!(err.program_error, expected),
        other => panic!("expected market error {:?}, got {:?}", expected, other),
    }
}

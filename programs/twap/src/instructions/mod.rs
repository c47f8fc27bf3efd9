//! Proxy operations over one underlying market.
//!
//! Price-moving operations observe the book, fold a clamped observation into
//! the record's oracle and only then forward the call; everything else is
//! forwarded as-is. In both cases the call is signed with the record's
//! delegated authority and the record is committed only after the underlying
//! market accepted the call. A rejection by the market is returned to the
//! caller unchanged.

// Record lifecycle
pub mod create_twap_market;
pub mod close_market;

// Price-moving operations
pub mod place_order;
pub mod place_take_order;
pub mod cancel_and_place_orders;

// Pass-through operations
pub mod cancel_order;
pub mod prune_orders;
pub mod settle_funds_expired;

// Read-only queries
pub mod query;

pub use cancel_and_place_orders::*;
pub use cancel_order::*;
pub use close_market::*;
pub use create_twap_market::*;
pub use place_order::*;
pub use place_take_order::*;
pub use prune_orders::*;
pub use query::*;
pub use settle_funds_expired::*;

use anchor_lang::prelude::*;
use crate::error::TwapError;
use crate::events::{ObservationRecorded, ObservationSkipped, SkipReason};
use crate::market::{MarketAuthority, OrderBookMarket};
use crate::state::{ObservationOutcome, RecordStore, TwapMarket};

// ============================================================================
// Execution Context
// ============================================================================

/// Everything one proxy invocation runs against: the record store, the
/// underlying market and the ambient clock.
pub struct ProxyContext<'a, S: RecordStore, M: OrderBookMarket> {
    pub store: &'a mut S,
    pub book: &'a mut M,
    pub clock: Clock,
    pub rent: Rent,
}

/// Return value of a price-moving operation: what the market returned and
/// whether a fresh observation was recorded before forwarding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forwarded<T> {
    pub value: T,
    pub observation: ObservationOutcome,
}

impl<'a, S: RecordStore, M: OrderBookMarket> ProxyContext<'a, S, M> {
    pub fn new(store: &'a mut S, book: &'a mut M, clock: Clock) -> Self {
        Self {
            store,
            book,
            clock,
            rent: Rent::default(),
        }
    }

    pub(crate) fn now(&self) -> i64 {
        self.clock.unix_timestamp
    }

    /// Load a record after proving the supplied addresses belong together:
    /// the market is the one being driven, the record address is derived
    /// from it and the stored record governs it.
    pub(crate) fn load_twap_market(&self, twap_market: &Pubkey, market: &Pubkey) -> Result<TwapMarket> {
        require_keys_eq!(self.book.address(), *market, TwapError::MarketMismatch);

        let (expected, _) = TwapMarket::address(market);
        require_keys_eq!(expected, *twap_market, TwapError::InvalidTwapMarket);

        let record = self
            .store
            .load(twap_market)?
            .ok_or(TwapError::RecordNotFound)?;
        require_keys_eq!(record.market, *market, TwapError::MarketMismatch);

        Ok(record)
    }

    /// Forward a call to the underlying market under the record's authority.
    /// The market's own error is passed through untouched.
    pub(crate) fn forward<T>(
        &mut self,
        twap_market: &Pubkey,
        record: &TwapMarket,
        operation: &str,
        call: impl FnOnce(&mut M, &MarketAuthority) -> Result<T>,
    ) -> Result<T> {
        let authority = MarketAuthority::for_record(*twap_market, record);
        call(&mut *self.book, &authority).map_err(|err| {
            msg!("Underlying market rejected {}: {}", operation, err);
            err
        })
    }

    /// Observe the book, then forward. The oracle update and the forwarded
    /// call commit together or not at all.
    pub(crate) fn observe_and_forward<T>(
        &mut self,
        twap_market: &Pubkey,
        market: &Pubkey,
        operation: &str,
        call: impl FnOnce(&mut M, &MarketAuthority) -> Result<T>,
    ) -> Result<Forwarded<T>> {
        let mut record = self.load_twap_market(twap_market, market)?;

        let now = u64::try_from(self.now()).map_err(|_| TwapError::ArithmeticOverflow)?;
        let best_bid = self.book.best_bid_price(now);
        let best_ask = self.book.best_ask_price(now);
        let observation = record
            .twap_oracle
            .update(self.clock.slot, best_bid, best_ask)?;

        let value = self.forward(twap_market, &record, operation, call)?;
        self.store.save(twap_market, &record)?;

        self.log_observation(twap_market, &record, &observation);
        Ok(Forwarded { value, observation })
    }

    fn log_observation(&self, twap_market: &Pubkey, record: &TwapMarket, outcome: &ObservationOutcome) {
        match *outcome {
            ObservationOutcome::Recorded {
                spot_price,
                observation,
                weighted_observation,
            } => emit!(ObservationRecorded {
                twap_market: *twap_market,
                slot: self.clock.slot,
                spot_price,
                observation,
                weighted_observation,
                observation_aggregator: record.twap_oracle.observation_aggregator,
            }),
            ObservationOutcome::OneSidedBook => emit!(ObservationSkipped {
                twap_market: *twap_market,
                slot: self.clock.slot,
                reason: SkipReason::OneSidedBook,
            }),
            ObservationOutcome::SpreadTooWide => emit!(ObservationSkipped {
                twap_market: *twap_market,
                slot: self.clock.slot,
                reason: SkipReason::SpreadTooWide,
            }),
            ObservationOutcome::SameSlot => {}
        }
    }
}

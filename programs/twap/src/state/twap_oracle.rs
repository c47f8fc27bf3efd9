//! Clamped time-weighted average price accumulator.
//!
//! Each accepted observation is bounded to `max_observation_change_per_update_lots`
//! away from the previous one and weighted by the slots elapsed since the
//! last accepted update. The TWAP is `observation_aggregator / (slots + 1)`.

use anchor_lang::prelude::*;
use crate::error::TwapError;
use crate::logic::{clamp_observation, spot_price, SpotPrice};
use crate::utils::SafeMath;

// ============================================================================
// Oracle State
// ============================================================================

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TwapOracle {
    /// Seed price supplied at creation; the first observation
    pub expected_value: u64,
    /// Slot the record was created in; fixed forever
    pub initial_slot: u64,
    /// Slot of the most recent accepted observation
    pub last_updated_slot: u64,
    /// Slot of the most recent observation attempt, accepted or skipped
    pub last_observed_slot: u64,
    /// Most recent accepted (post-clamp) observation, in price lots
    pub last_observation: u64,
    /// Running sum of `observation * elapsed_slots`
    pub observation_aggregator: u128,
    /// Largest move a single update may apply to `last_observation`
    pub max_observation_change_per_update_lots: u64,
}

/// Result of one observation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationOutcome {
    /// A clamped observation was folded into the aggregator
    Recorded {
        spot_price: u64,
        observation: u64,
        weighted_observation: u128,
    },
    /// The book was already observed in this slot
    SameSlot,
    /// No two-sided book to observe
    OneSidedBook,
    /// Spread too wide to trust the mid-price
    SpreadTooWide,
}

impl ObservationOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, ObservationOutcome::Recorded { .. })
    }

    /// The recorded observation, or the named reason no observation was taken
    pub fn require_recorded(&self) -> Result<u64> {
        match self {
            ObservationOutcome::Recorded { observation, .. } => Ok(*observation),
            ObservationOutcome::SameSlot => err!(TwapError::ObservationAlreadyRecorded),
            ObservationOutcome::OneSidedBook => err!(TwapError::EmptyBookNoObservation),
            ObservationOutcome::SpreadTooWide => err!(TwapError::SpreadTooWide),
        }
    }
}

impl TwapOracle {
    /// Serialized size
    pub const LEN: usize = 8 + // expected_value
        8 + // initial_slot
        8 + // last_updated_slot
        8 + // last_observed_slot
        8 + // last_observation
        16 + // observation_aggregator
        8; // max_observation_change_per_update_lots

    /// Seed the oracle at `slot`. The seed counts once in the aggregator so
    /// the initial slot always carries weight.
    pub fn new(expected_value: u64, max_observation_change_per_update_lots: u64, slot: u64) -> Self {
        Self {
            expected_value,
            initial_slot: slot,
            last_updated_slot: slot,
            last_observed_slot: slot,
            last_observation: expected_value,
            observation_aggregator: expected_value as u128,
            max_observation_change_per_update_lots,
        }
    }

    /// Observe the top of the book at `slot`.
    ///
    /// Only the first call in a slot looks at the book; later calls in the
    /// same slot leave the oracle untouched. A slot older than the last
    /// observation is rejected. On error nothing is modified.
    pub fn update(
        &mut self,
        slot: u64,
        best_bid: Option<i64>,
        best_ask: Option<i64>,
    ) -> Result<ObservationOutcome> {
        require!(
            slot >= self.last_updated_slot && slot >= self.last_observed_slot,
            TwapError::StaleObservationSlot
        );

        if slot == self.last_observed_slot {
            return Ok(ObservationOutcome::SameSlot);
        }

        let spot = match spot_price(best_bid, best_ask) {
            SpotPrice::Mid(price) => price,
            SpotPrice::OneSided => {
                self.last_observed_slot = slot;
                return Ok(ObservationOutcome::OneSidedBook);
            }
            SpotPrice::SpreadTooWide => {
                self.last_observed_slot = slot;
                return Ok(ObservationOutcome::SpreadTooWide);
            }
        };

        let observation = clamp_observation(
            self.last_observation,
            spot,
            self.max_observation_change_per_update_lots,
        );

        // last_updated_slot <= last_observed_slot < slot, so at least one slot
        // has elapsed here
        let elapsed = slot.safe_sub(self.last_updated_slot)?;
        let weighted_observation = (observation as u128).safe_mul(elapsed as u128)?;
        let observation_aggregator = self.observation_aggregator.safe_add(weighted_observation)?;
        msg!("Observation: {}", observation);
        msg!("Weighted observation: {}", weighted_observation);

        self.observation_aggregator = observation_aggregator;
        self.last_observed_slot = slot;
        self.last_updated_slot = slot;
        self.last_observation = observation;

        Ok(ObservationOutcome::Recorded {
            spot_price: spot,
            observation,
            weighted_observation,
        })
    }

    /// Number of slots covered by the aggregator, counting the initial slot
    pub fn observed_slots(&self) -> Result<u64> {
        self.last_updated_slot
            .safe_sub(self.initial_slot)?
            .safe_add(1)
    }

    /// Time-weighted average price in price lots, truncated
    pub fn twap(&self) -> Result<u64> {
        let slots = self.observed_slots()? as u128;
        let twap = self.observation_aggregator.safe_div(slots)?;
        u64::try_from(twap).map_err(|_| TwapError::ArithmeticOverflow.into())
    }
}

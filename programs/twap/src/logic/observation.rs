//! Spot price extraction and the per-update clamp.
//!
//! The clamp is the only manipulation defense: whatever the raw book says, a
//! single update can move the recorded observation by at most
//! `max_change` lots.

use crate::constants::{BPS_DENOMINATOR, MAX_SPREAD_BPS};

/// What the top of the book says right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpotPrice {
    /// Two-sided book within the spread limit; mid-price in price lots
    Mid(u64),
    /// A side is empty (or carries a non-positive price)
    OneSided,
    /// Both sides present but the spread exceeds `MAX_SPREAD_BPS`
    SpreadTooWide,
}

/// Mid-price of the book, rounded up.
///
/// Computed in `i128` so `bid + ask` cannot overflow for any pair of `i64`
/// prices.
pub fn spot_price(best_bid: Option<i64>, best_ask: Option<i64>) -> SpotPrice {
    let (bid, ask) = match (best_bid, best_ask) {
        (Some(bid), Some(ask)) if bid > 0 && ask > 0 => (bid as i128, ask as i128),
        _ => return SpotPrice::OneSided,
    };

    let max_ask = bid * (BPS_DENOMINATOR + MAX_SPREAD_BPS) as i128;
    if ask * BPS_DENOMINATOR as i128 > max_ask {
        return SpotPrice::SpreadTooWide;
    }

    // Both inputs are positive i64, so the mean fits back into u64.
    let mid = (bid + ask + 1) / 2;
    SpotPrice::Mid(mid as u64)
}

/// Bound `candidate` to `[previous - max_change, previous + max_change]`.
///
/// Formulated on the distance to `previous` so neither bound is ever
/// computed past the numeric range: when the candidate is out of reach the
/// result lies strictly between `previous` and `candidate`.
pub fn clamp_observation(previous: u64, candidate: u64, max_change: u64) -> u64 {
    if candidate >= previous {
        if candidate - previous <= max_change {
            candidate
        } else {
            previous + max_change
        }
    } else if previous - candidate <= max_change {
        candidate
    } else {
        previous - max_change
    }
}

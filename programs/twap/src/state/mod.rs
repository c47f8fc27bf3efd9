//! Persistent state: the per-market record, its oracle and the record store

pub mod store;
pub mod twap_market;
pub mod twap_oracle;

pub use store::*;
pub use twap_market::*;
pub use twap_oracle::*;

// Compile-time assertions for account sizes
#[cfg(feature = "size-checks")]
mod size_assertions {
    use super::*;
    use static_assertions::const_assert_eq;

    // six u64 fields and the u128 aggregator
    const_assert_eq!(TwapOracle::LEN, 6 * 8 + 16);

    // 8 (discriminator) + 32 (market) + 1 (bump) + 8 (expiry) + 32 (rent payer) + oracle
    const_assert_eq!(TwapMarket::LEN, 8 + 32 + 1 + 8 + 32 + 64);
}

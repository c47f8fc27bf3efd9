//! # Feels TWAP
//!
//! Manipulation-resistant time-weighted average price oracle that sits in
//! front of a limit-order-book market. Every order-lifecycle operation on the
//! underlying market goes through this proxy, which owns the market's
//! administrative authorities and records a clamped price observation before
//! forwarding anything that can move price.
//!
//! The underlying book is reached through the [`OrderBookMarket`] trait and
//! records live in a [`RecordStore`], so the same handlers drive both the
//! on-chain binding and off-chain simulations.
#![allow(unexpected_cfgs)]
use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod logic;
pub mod market;
pub mod state;
pub mod utils;

pub use error::TwapError;
pub use instructions::*;
pub use market::*;
pub use state::*;

declare_id!("Fee1sTwapMarket11111111111111111111111111111");

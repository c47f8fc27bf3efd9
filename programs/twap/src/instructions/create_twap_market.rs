use crate::{
    error::TwapError,
    events::TwapMarketCreated,
    instructions::ProxyContext,
    market::{MarketConfig, OrderBookMarket},
    state::{RecordStore, TwapMarket, TwapOracle},
};
use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreateTwapMarket {
    /// Underlying market, already created with the record as its admin
    pub market: Pubkey,
    /// Record address derived from `market`
    pub twap_market: Pubkey,
    /// Pays the record's rent and becomes its rent payer
    pub payer: Pubkey,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreateTwapMarketParams {
    /// Seed price in lots; also the first observation
    pub expected_value: u64,
    /// Largest move one update may apply to the observation
    pub max_observation_change_per_update_lots: u64,
}

pub fn create_twap_market<S: RecordStore, M: OrderBookMarket>(
    ctx: &mut ProxyContext<'_, S, M>,
    accounts: &CreateTwapMarket,
    params: CreateTwapMarketParams,
) -> Result<TwapMarket> {
    require_keys_eq!(ctx.book.address(), accounts.market, TwapError::MarketMismatch);

    let (expected, pda_bump) = TwapMarket::address(&accounts.market);
    require_keys_eq!(expected, accounts.twap_market, TwapError::InvalidTwapMarket);
    require!(
        ctx.store.load(&accounts.twap_market)?.is_none(),
        TwapError::TwapMarketAlreadyExists
    );

    let config = ctx.book.config();
    validate_market_config(&config, &accounts.twap_market)?;

    let twap_market = TwapMarket {
        market: accounts.market,
        pda_bump,
        expiry: config.time_expiry,
        rent_payer: accounts.payer,
        twap_oracle: TwapOracle::new(
            params.expected_value,
            params.max_observation_change_per_update_lots,
            ctx.clock.slot,
        ),
    };

    let lamports = ctx.rent.minimum_balance(TwapMarket::LEN);
    ctx.store
        .create(&accounts.twap_market, &twap_market, &accounts.payer, lamports)?;

    msg!("TWAP market created for {}", accounts.market);
    emit!(TwapMarketCreated {
        twap_market: accounts.twap_market,
        market: accounts.market,
        rent_payer: accounts.payer,
        expected_value: params.expected_value,
        max_observation_change_per_update_lots: params.max_observation_change_per_update_lots,
        expiry: twap_market.expiry,
        slot: ctx.clock.slot,
    });

    Ok(twap_market)
}

/// The record must hold every administrative authority the market exposes
/// and the market must not carry anything that lets price move outside the
/// proxy.
pub fn validate_market_config(config: &MarketConfig, twap_market: &Pubkey) -> Result<()> {
    require!(
        config.open_orders_admin == Some(*twap_market),
        TwapError::InvalidOpenOrdersAdmin
    );
    require!(
        config.close_market_admin == Some(*twap_market),
        TwapError::InvalidCloseMarketAdmin
    );
    require!(
        config.consume_events_admin.is_none(),
        TwapError::InvalidConsumeEventsAdmin
    );
    require!(
        config.oracle_a.is_none() && config.oracle_b.is_none(),
        TwapError::NoOracles
    );
    require!(config.seq_num == 0, TwapError::InvalidSeqNum);
    require!(config.maker_fee == 0, TwapError::InvalidMakerFee);
    require!(config.taker_fee == 0, TwapError::InvalidTakerFee);
    Ok(())
}

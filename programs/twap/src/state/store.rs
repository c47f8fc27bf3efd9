//! Record storage.
//!
//! Abstracts the account-allocation primitive the proxy relies on: creating
//! a record at an address that is already taken must fail, which together
//! with the derived address guarantees one record per market.

use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use crate::error::TwapError;
use crate::state::TwapMarket;
use crate::utils::SafeMath;

/// Handlers load a record, forward to the market and only then `save` or
/// `close` it, after the market has already applied the call. Implementors
/// must therefore never fail `save` or `close` for an address whose record
/// `load` just returned; anything that can fail (capacity, encoding,
/// permissions) belongs in `load` or `create`.
pub trait RecordStore {
    /// Load the record at `address`, if one exists
    fn load(&self, address: &Pubkey) -> Result<Option<TwapMarket>>;

    /// Allocate a new record at `address`, moving `lamports` of rent from
    /// `payer` into it. Fails if the address is already allocated.
    fn create(
        &mut self,
        address: &Pubkey,
        record: &TwapMarket,
        payer: &Pubkey,
        lamports: u64,
    ) -> Result<()>;

    /// Overwrite an existing record. Infallible for a loaded record.
    fn save(&mut self, address: &Pubkey, record: &TwapMarket) -> Result<()>;

    /// Deallocate the record and move its lamports to `destination`.
    /// Returns the lamports moved. Infallible for a loaded record.
    fn close(&mut self, address: &Pubkey, destination: &Pubkey) -> Result<u64>;
}

#[derive(Debug, Clone)]
struct StoredAccount {
    lamports: u64,
    data: Vec<u8>,
}

/// In-memory record store holding Anchor account bytes and lamport balances
#[derive(Debug, Default)]
pub struct MemoryStore {
    accounts: BTreeMap<Pubkey, StoredAccount>,
    balances: BTreeMap<Pubkey, u64>,
    /// Total lamports ever funded; every balance and record is a share of it
    supply: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit lamports to a wallet
    pub fn fund(&mut self, wallet: &Pubkey, lamports: u64) -> Result<()> {
        self.supply = self.supply.safe_add(lamports)?;
        let balance = self.balances.entry(*wallet).or_insert(0);
        *balance += lamports;
        Ok(())
    }

    /// Lamports held by a wallet or a record
    pub fn lamports(&self, address: &Pubkey) -> u64 {
        self.accounts
            .get(address)
            .map(|account| account.lamports)
            .or_else(|| self.balances.get(address).copied())
            .unwrap_or(0)
    }

    pub fn contains(&self, address: &Pubkey) -> bool {
        self.accounts.contains_key(address)
    }

    fn encode(record: &TwapMarket) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(TwapMarket::LEN);
        record.try_serialize(&mut data)?;
        Ok(data)
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, address: &Pubkey) -> Result<Option<TwapMarket>> {
        match self.accounts.get(address) {
            Some(account) => {
                let record = TwapMarket::try_deserialize(&mut account.data.as_slice())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn create(
        &mut self,
        address: &Pubkey,
        record: &TwapMarket,
        payer: &Pubkey,
        lamports: u64,
    ) -> Result<()> {
        require!(
            !self.accounts.contains_key(address),
            TwapError::TwapMarketAlreadyExists
        );

        let balance = self.balances.get(payer).copied().unwrap_or(0);
        require!(balance >= lamports, TwapError::InsufficientFundsForRent);

        let data = Self::encode(record)?;
        self.balances.insert(*payer, balance - lamports);
        self.accounts.insert(*address, StoredAccount { lamports, data });
        Ok(())
    }

    fn save(&mut self, address: &Pubkey, record: &TwapMarket) -> Result<()> {
        let data = Self::encode(record)?;
        let account = self
            .accounts
            .get_mut(address)
            .ok_or(TwapError::RecordNotFound)?;
        account.data = data;
        Ok(())
    }

    fn close(&mut self, address: &Pubkey, destination: &Pubkey) -> Result<u64> {
        let lamports = self
            .accounts
            .get(address)
            .map(|account| account.lamports)
            .ok_or(TwapError::RecordNotFound)?;

        // balances never sum past `supply`, so this cannot overflow
        let balance = self.balances.get(destination).copied().unwrap_or(0);
        let credited = balance.safe_add(lamports)?;

        self.accounts.remove(address);
        self.balances.insert(*destination, credited);
        Ok(lamports)
    }
}

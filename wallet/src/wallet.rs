use std::sync::{Mutex, MutexGuard, PoisonError};

use rust_decimal::Decimal;

use super::error::WalletError;
use super::reducer;
use super::types::{Amount, Asset, Balances, Transaction, TransactionType};

/// Live balances for a single holder.
///
/// All operations go through one lock, so each deposit, withdrawal or batch
/// is a single step from one committed [`Balances`] to the next. Separate
/// wallets share nothing.
#[derive(Debug, Default)]
pub struct Wallet {
    balances: Mutex<Balances>,
}

impl Wallet {
    /// Creates a wallet with every asset at zero
    pub fn new() -> Self {
        Wallet {
            balances: Mutex::new(Balances::zero()),
        }
    }

    /// Creates a wallet from starting balances for any subset of assets.
    /// Assets not listed start at zero; a negative value is rejected.
    pub fn with_balances<I>(initial: I) -> Result<Self, WalletError>
    where
        I: IntoIterator<Item = (Asset, Amount)>,
    {
        let mut balances = Balances::zero();
        for (asset, amount) in initial {
            if amount < Decimal::ZERO {
                return Err(WalletError::InvalidInitialBalance { asset, amount });
            }
            balances = balances.with(asset, amount);
        }

        Ok(Wallet {
            balances: Mutex::new(balances),
        })
    }

    pub fn deposit(&self, asset: Asset, amount: Amount) -> Result<(), WalletError> {
        let tx = Transaction::new(TransactionType::Deposit, asset, amount)?;
        let mut balances = self.lock();
        commit(&mut balances, &tx)?;
        Ok(())
    }

    /// Returns `Ok(false)` when the balance could not cover `amount`. In that
    /// case nothing changes.
    pub fn withdraw(&self, asset: Asset, amount: Amount) -> Result<bool, WalletError> {
        let tx = Transaction::new(TransactionType::Withdraw, asset, amount)?;
        let mut balances = self.lock();
        commit(&mut balances, &tx)
    }

    /// Copy of the current balances
    pub fn snapshot(&self) -> Balances {
        *self.lock()
    }

    /// Applies `transactions` in order on top of the current state and returns
    /// the resulting snapshot. The lock is held for the whole batch.
    pub fn process<'a, I>(&self, transactions: I) -> Result<Balances, WalletError>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut balances = self.lock();
        let mut applied = 0usize;
        let mut rejected = 0usize;

        for tx in transactions {
            if commit(&mut balances, tx)? {
                applied += 1;
            } else {
                rejected += 1;
            }
        }

        tracing::debug!(applied, rejected, "processed batch");
        Ok(*balances)
    }

    // A panic can only happen before the single assignment in `commit`, so a
    // poisoned lock still guards a committed state
    fn lock(&self) -> MutexGuard<'_, Balances> {
        self.balances.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Runs one reducer step against the locked state and commits the result.
/// Returns whether the target asset's balance changed.
fn commit(state: &mut Balances, tx: &Transaction) -> Result<bool, WalletError> {
    let asset = tx.asset();
    let before = state.get(asset);
    let next = reducer::apply_one(state, tx)?;
    let changed = next.get(asset) != before;
    *state = next;

    if changed {
        tracing::debug!(%tx, balance = %state.get(asset), "committed transaction");
    } else {
        tracing::debug!(%tx, balance = %before, "withdrawal rejected: insufficient funds");
    }

    Ok(changed)
}

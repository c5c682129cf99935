//! Pure balance transitions. Nothing here holds state; every function takes
//! the current balances by reference and hands back a fresh value.

use rust_decimal::Decimal;

use crate::error::WalletError;
use crate::types::{Balances, Transaction, TransactionType};

/// Applies a single transaction and returns the next balances.
///
/// A withdrawal larger than the available balance leaves every asset as it
/// was. Reporting that outcome is the caller's job.
pub fn apply_one(balances: &Balances, transaction: &Transaction) -> Result<Balances, WalletError> {
    let asset = transaction.asset();
    let amount = transaction.amount();

    // Unreachable through Transaction::new, but the invariant below depends on it
    if amount <= Decimal::ZERO {
        return Err(WalletError::InvalidTransaction {
            reason: format!("{transaction} has a non-positive amount"),
        });
    }

    let current = balances.get(asset);
    match transaction.kind() {
        TransactionType::Deposit => {
            let next = current
                .checked_add(amount)
                .ok_or(WalletError::BalanceOverflow { asset })?;
            Ok(balances.with(asset, next))
        }
        TransactionType::Withdraw => {
            if current >= amount {
                Ok(balances.with(asset, current - amount))
            } else {
                Ok(*balances)
            }
        }
    }
}

/// Folds `transactions` over `initial` in order. An empty sequence returns
/// `initial` unchanged.
pub fn apply_all<'a, I>(initial: &Balances, transactions: I) -> Result<Balances, WalletError>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .try_fold(*initial, |state, tx| apply_one(&state, tx))
}

use std::fmt;

use wallet::{Transaction, TransactionType, Wallet, WalletError};

pub mod batch;
pub mod demo;
pub mod run;

/// Outcome of one interactive step
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    Done,
    InsufficientFunds,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Done => f.write_str("DONE"),
            Status::InsufficientFunds => f.write_str("FAILED (insufficient funds)"),
        }
    }
}

/// Routes a transaction through the wallet's interactive API so a rejected
/// withdrawal can be reported per step.
pub fn apply(wallet: &Wallet, tx: &Transaction) -> Result<Status, WalletError> {
    match tx.kind() {
        TransactionType::Deposit => {
            wallet.deposit(tx.asset(), tx.amount())?;
            Ok(Status::Done)
        }
        TransactionType::Withdraw => {
            if wallet.withdraw(tx.asset(), tx.amount())? {
                Ok(Status::Done)
            } else {
                Ok(Status::InsufficientFunds)
            }
        }
    }
}

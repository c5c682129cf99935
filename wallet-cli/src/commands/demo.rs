use std::io::{self, Write};

use clap::Args;
use rust_decimal::Decimal;
use wallet::{Asset, Balances, Transaction, WalletError};

use super::{Status, apply};
use crate::opt::WalletArgs;

const DELIMITER: &str = "------------------------------------------------------------";

#[derive(Debug, Clone, Args)]
pub struct Demo {
    #[command(flatten)]
    pub wallet: WalletArgs,
}

/// The reference scenario: the second BTC withdrawal cannot be covered
pub fn example_transactions() -> Result<Vec<Transaction>, WalletError> {
    Ok(vec![
        Transaction::deposit(Asset::Btc, Decimal::new(15, 1))?,
        Transaction::deposit(Asset::Usd, Decimal::new(1000, 0))?,
        Transaction::withdraw(Asset::Usd, Decimal::new(300, 0))?,
        Transaction::withdraw(Asset::Btc, Decimal::new(20, 1))?,
        Transaction::deposit(Asset::Eth, Decimal::new(50, 1))?,
        Transaction::withdraw(Asset::Btc, Decimal::new(5, 1))?,
    ])
}

impl Demo {
    pub fn exec(self) -> anyhow::Result<()> {
        let wallet = self.wallet.build_wallet()?;
        let transactions = example_transactions()?;
        tracing::info!(count = transactions.len(), "replaying example transactions");

        let stdout = io::stdout();
        let mut out = stdout.lock();

        writeln!(out, "Initial state: {}", wallet.snapshot())?;
        writeln!(out)?;
        writeln!(out, "Processing transactions:")?;
        writeln!(out, "{DELIMITER}")?;

        for (i, tx) in transactions.iter().enumerate() {
            let status = apply(&wallet, tx)?;
            writeln!(out, "{}", step_line(i + 1, tx, &wallet.snapshot(), status))?;
        }

        writeln!(out, "{DELIMITER}")?;
        self.wallet.write_final(&mut out, &wallet.snapshot())
    }
}

fn step_line(index: usize, tx: &Transaction, balances: &Balances, status: Status) -> String {
    format!("{index}. {tx}: {balances} {status}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wallet::Wallet;

    #[test]
    fn test_example_transactions_reach_expected_state() {
        let wallet = Wallet::new();
        let statuses: Vec<Status> = example_transactions()
            .unwrap()
            .iter()
            .map(|tx| apply(&wallet, tx).unwrap())
            .collect();

        assert_eq!(statuses[3], Status::InsufficientFunds);
        assert_eq!(
            statuses.iter().filter(|s| **s == Status::Done).count(),
            5
        );

        let balances = wallet.snapshot();
        assert_eq!(balances.btc, dec!(1.0));
        assert_eq!(balances.eth, dec!(5.0));
        assert_eq!(balances.usd, dec!(700));
        assert_eq!(balances.to_string(), "BTC: 1.0, ETH: 5.0, USD: 700");
    }

    #[test]
    fn test_step_line() {
        let tx = Transaction::withdraw(Asset::Btc, dec!(2.0)).unwrap();
        let balances = Balances::zero().with(Asset::Btc, dec!(1.5));
        assert_eq!(
            step_line(4, &tx, &balances, Status::InsufficientFunds),
            "4. WITHDRAW BTC 2.0: BTC: 1.5, ETH: 0, USD: 0 FAILED (insufficient funds)"
        );
    }
}

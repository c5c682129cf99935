use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use wallet::Transaction;

use crate::opt::WalletArgs;

#[derive(Debug, Clone, Args)]
pub struct Batch {
    /// JSON array of transactions, e.g.
    /// `[{"type": "DEPOSIT", "asset": "BTC", "amount": "1.5"}]`.
    /// Reads stdin when omitted.
    #[arg(value_name = "PATH")]
    pub input: Option<PathBuf>,
    #[command(flatten)]
    pub wallet: WalletArgs,
}

impl Batch {
    pub fn exec(self) -> anyhow::Result<()> {
        let wallet = self.wallet.build_wallet()?;

        let transactions = match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("could not open {}", path.display()))?;
                read_transactions(BufReader::new(file))
                    .with_context(|| format!("could not read transactions from {}", path.display()))?
            }
            None => read_transactions(io::stdin().lock())?,
        };
        tracing::info!(count = transactions.len(), "processing batch");

        // Per-transaction outcomes are not reported in batch mode
        let balances = wallet.process(&transactions)?;
        self.wallet.write_final(&mut io::stdout().lock(), &balances)
    }
}

pub fn read_transactions<R: Read>(reader: R) -> anyhow::Result<Vec<Transaction>> {
    serde_json::from_reader(reader).context("invalid transaction batch")
}

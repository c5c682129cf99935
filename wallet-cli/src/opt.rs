use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use wallet::{Asset, Balances, Wallet, parse_asset};

use crate::commands::{batch::Batch, demo::Demo, run::Run};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

impl Opt {
    pub fn exec(self) -> anyhow::Result<()> {
        match self.command {
            Command::Demo(demo) => demo.exec(),
            Command::Run(run) => run.exec(),
            Command::Batch(batch) => batch.exec(),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Replay the reference scenario step by step.
    Demo(Demo),
    /// Apply `TYPE ASSET AMOUNT` lines from a file or stdin, one at a time.
    Run(Run),
    /// Apply a JSON array of transactions in a single batch.
    Batch(Batch),
}

/// Wallet setup and output options shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct WalletArgs {
    /// Starting balance for one asset, e.g. `--initial BTC=1.5`. Repeatable.
    #[arg(long = "initial", value_name = "ASSET=AMOUNT", value_parser = parse_initial)]
    pub initial: Vec<(Asset, Decimal)>,
    /// JSON object with starting balances, e.g. `{"BTC": "1.0", "USD": "250"}`.
    /// `--initial` values take precedence.
    #[arg(long, value_name = "PATH")]
    pub balances_file: Option<PathBuf>,
    /// Print the final balances as JSON instead of the display format.
    #[arg(long)]
    pub json: bool,
}

impl WalletArgs {
    pub fn build_wallet(&self) -> anyhow::Result<Wallet> {
        let mut initial: BTreeMap<Asset, Decimal> = match &self.balances_file {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("could not open {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("could not read balances from {}", path.display()))?
            }
            None => BTreeMap::new(),
        };
        initial.extend(self.initial.iter().copied());

        tracing::debug!(?initial, "building wallet");
        Wallet::with_balances(initial).context("invalid initial balances")
    }

    pub fn write_final<W: Write>(&self, out: &mut W, balances: &Balances) -> anyhow::Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut *out, balances)?;
            writeln!(out)?;
        } else {
            writeln!(out, "Final balances: {balances}")?;
        }
        Ok(())
    }
}

fn parse_initial(s: &str) -> Result<(Asset, Decimal), anyhow::Error> {
    let (asset, amount) = s
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("expected ASSET=AMOUNT, got '{}'", s))?;
    let asset = parse_asset(asset)?;
    let amount = Decimal::from_str(amount.trim())
        .with_context(|| format!("invalid amount for {}: '{}'", asset, amount))?;
    Ok((asset, amount))
}

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use wallet::{Wallet, parse_transaction};

use super::{Status, apply};
use crate::opt::WalletArgs;

#[derive(Debug, Clone, Args)]
pub struct Run {
    /// File with one `TYPE ASSET AMOUNT` per line (default: stdin).
    #[arg(long, short, value_name = "PATH")]
    pub input: Option<PathBuf>,
    /// Stop at the first line that fails to parse instead of skipping it.
    #[arg(long)]
    pub strict: bool,
    #[command(flatten)]
    pub wallet: WalletArgs,
}

/// Counters for one pass over the input
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub applied: usize,
    pub insufficient_funds: usize,
    pub invalid: usize,
}

impl Run {
    pub fn exec(self) -> anyhow::Result<()> {
        let wallet = self.wallet.build_wallet()?;

        let reader: Box<dyn BufRead> = match &self.input {
            Some(path) => Box::new(BufReader::new(
                File::open(path).with_context(|| format!("could not open {}", path.display()))?,
            )),
            None => Box::new(BufReader::new(io::stdin())),
        };

        let stdout = io::stdout();
        let mut out = stdout.lock();
        let summary = run_lines(&wallet, reader, &mut out, self.strict)?;
        tracing::info!(
            applied = summary.applied,
            insufficient_funds = summary.insufficient_funds,
            invalid = summary.invalid,
            "input processed"
        );

        self.wallet.write_final(&mut out, &wallet.snapshot())
    }
}

/// Applies each line to `wallet` and reports the outcome to `out`.
/// Blank lines and lines starting with `#` are ignored.
pub fn run_lines<R: BufRead, W: Write>(
    wallet: &Wallet,
    reader: R,
    out: &mut W,
    strict: bool,
) -> anyhow::Result<RunSummary> {
    let mut summary = RunSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("could not read line {line_number}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let tx = match parse_transaction(trimmed) {
            Ok(tx) => tx,
            Err(err) if strict => {
                return Err(err).with_context(|| format!("line {line_number}"));
            }
            Err(err) => {
                tracing::warn!(line = line_number, %err, "skipping invalid transaction");
                writeln!(out, "{line_number}. {trimmed}: {err}")?;
                summary.invalid += 1;
                continue;
            }
        };

        let status = apply(wallet, &tx)?;
        match status {
            Status::Done => summary.applied += 1,
            Status::InsufficientFunds => summary.insufficient_funds += 1,
        }
        writeln!(out, "{line_number}. {tx}: {} {status}", wallet.snapshot())?;
    }

    Ok(summary)
}

use std::fmt;

use crate::types::{Asset, Balances};

/// Renders balances as `BTC: <v>, ETH: <v>, USD: <v>`.
///
/// Values keep their decimal scale (`1.0` stays `1.0`); any zero renders as `0`.
pub fn format_balances(balances: &Balances) -> String {
    Asset::ALL
        .iter()
        .map(|&asset| {
            let amount = balances.get(asset);
            if amount.is_zero() {
                format!("{asset}: 0")
            } else {
                format!("{asset}: {amount}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Balances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_balances(self))
    }
}

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ParseError, WalletError};

/// Amounts are exact base-10 decimals, never binary floats
pub type Amount = Decimal;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    Btc,
    Eth,
    Usd,
}

impl Asset {
    /// Every supported asset, in display order
    pub const ALL: [Asset; 3] = [Asset::Btc, Asset::Eth, Asset::Usd];

    pub fn symbol(self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
            Asset::Usd => "USD",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Asset {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BTC" => Ok(Asset::Btc),
            "ETH" => Ok(Asset::Eth),
            "USD" => Ok(Asset::Usd),
            _ => Err(ParseError::InvalidAsset {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Credit the asset, always applies
    Deposit,
    /// Debit the asset, only applies when the balance covers the amount
    Withdraw,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Deposit => f.write_str("DEPOSIT"),
            TransactionType::Withdraw => f.write_str("WITHDRAW"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEPOSIT" => Ok(TransactionType::Deposit),
            "WITHDRAW" => Ok(TransactionType::Withdraw),
            _ => Err(ParseError::InvalidTransactionType {
                value: s.to_string(),
            }),
        }
    }
}

/// A validated deposit or withdrawal. The amount is strictly positive for
/// every value built through [`Transaction::new`] or deserialization.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    pub(crate) kind: TransactionType,
    pub(crate) asset: Asset,
    pub(crate) amount: Amount,
}

impl Transaction {
    pub fn new(kind: TransactionType, asset: Asset, amount: Amount) -> Result<Self, WalletError> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount { kind, amount });
        }
        Ok(Transaction {
            kind,
            asset,
            amount,
        })
    }

    pub fn deposit(asset: Asset, amount: Amount) -> Result<Self, WalletError> {
        Self::new(TransactionType::Deposit, asset, amount)
    }

    pub fn withdraw(asset: Asset, amount: Amount) -> Result<Self, WalletError> {
        Self::new(TransactionType::Withdraw, asset, amount)
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn asset(&self) -> Asset {
        self.asset
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.kind, self.asset, self.amount)
    }
}

// Wire shape of a transaction, e.g. {"type":"DEPOSIT","asset":"BTC","amount":"1.5"}
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct TransactionRecord {
    #[serde(rename = "type")]
    kind: TransactionType,
    asset: Asset,
    amount: Amount,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = WalletError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::new(record.kind, record.asset, record.amount).map_err(|_| {
            WalletError::InvalidTransaction {
                reason: format!(
                    "{} {} amount must be positive, got {}",
                    record.kind, record.asset, record.amount
                ),
            }
        })
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(tx: Transaction) -> Self {
        TransactionRecord {
            kind: tx.kind,
            asset: tx.asset,
            amount: tx.amount,
        }
    }
}

/// Full set of balances at one point in time. Every asset is always present.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    #[serde(rename = "BTC", default)]
    pub btc: Amount,
    #[serde(rename = "ETH", default)]
    pub eth: Amount,
    #[serde(rename = "USD", default)]
    pub usd: Amount,
}

impl Balances {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, asset: Asset) -> Amount {
        match asset {
            Asset::Btc => self.btc,
            Asset::Eth => self.eth,
            Asset::Usd => self.usd,
        }
    }

    /// Returns a copy with one balance replaced, leaving `self` untouched
    pub fn with(&self, asset: Asset, amount: Amount) -> Self {
        let mut next = *self;
        match asset {
            Asset::Btc => next.btc = amount,
            Asset::Eth => next.eth = amount,
            Asset::Usd => next.usd = amount,
        }
        next
    }

    pub fn iter(&self) -> impl Iterator<Item = (Asset, Amount)> + '_ {
        Asset::ALL.into_iter().map(|asset| (asset, self.get(asset)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_asset_from_str_is_case_insensitive() {
        assert_eq!("btc".parse::<Asset>().unwrap(), Asset::Btc);
        assert_eq!("Eth".parse::<Asset>().unwrap(), Asset::Eth);
        assert_eq!(" USD ".parse::<Asset>().unwrap(), Asset::Usd);
        assert!(matches!(
            "XRP".parse::<Asset>(),
            Err(ParseError::InvalidAsset { .. })
        ));
    }

    #[test]
    fn test_transaction_type_from_str() {
        assert_eq!(
            "deposit".parse::<TransactionType>().unwrap(),
            TransactionType::Deposit
        );
        assert_eq!(
            "WITHDRAW".parse::<TransactionType>().unwrap(),
            TransactionType::Withdraw
        );
        assert!(matches!(
            "TRANSFER".parse::<TransactionType>(),
            Err(ParseError::InvalidTransactionType { .. })
        ));
    }

    #[test]
    fn test_transaction_rejects_non_positive_amount() {
        assert!(matches!(
            Transaction::deposit(Asset::Btc, dec!(0)),
            Err(WalletError::InvalidAmount { .. })
        ));
        assert!(matches!(
            Transaction::withdraw(Asset::Usd, dec!(-1)),
            Err(WalletError::InvalidAmount { .. })
        ));

        let tx = Transaction::deposit(Asset::Eth, dec!(2.5)).unwrap();
        assert_eq!(tx.kind(), TransactionType::Deposit);
        assert_eq!(tx.asset(), Asset::Eth);
        assert_eq!(tx.amount(), dec!(2.5));
    }

    #[test]
    fn test_transaction_json_record() {
        let tx: Transaction =
            serde_json::from_str(r#"{"type":"WITHDRAW","asset":"USD","amount":"300"}"#).unwrap();
        assert_eq!(tx, Transaction::withdraw(Asset::Usd, dec!(300)).unwrap());

        let json = serde_json::to_value(tx).unwrap();
        assert_eq!(json["type"], "WITHDRAW");
        assert_eq!(json["asset"], "USD");
    }

    #[test]
    fn test_transaction_json_rejects_non_positive_amount() {
        let err = serde_json::from_str::<Transaction>(
            r#"{"type":"DEPOSIT","asset":"BTC","amount":"-1"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("amount must be positive"));
    }

    #[test]
    fn test_balances_with_leaves_receiver_unchanged() {
        let balances = Balances::zero();
        let next = balances.with(Asset::Eth, dec!(5));

        assert_eq!(balances.get(Asset::Eth), dec!(0));
        assert_eq!(next.get(Asset::Eth), dec!(5));
        assert_eq!(next.get(Asset::Btc), dec!(0));
        assert_eq!(next.get(Asset::Usd), dec!(0));
    }

    #[test]
    fn test_balances_partial_json_defaults_to_zero() {
        let balances: Balances = serde_json::from_str(r#"{"USD":"250.50"}"#).unwrap();
        assert_eq!(balances.usd, dec!(250.50));
        assert_eq!(balances.btc, dec!(0));
        assert_eq!(balances.eth, dec!(0));
    }

    #[test]
    fn test_balances_iter_in_display_order() {
        let balances = Balances {
            btc: dec!(1),
            eth: dec!(2),
            usd: dec!(3),
        };
        let assets: Vec<Asset> = balances.iter().map(|(asset, _)| asset).collect();
        assert_eq!(assets, Asset::ALL.to_vec());
    }
}

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ParseError;
use crate::types::{Asset, Transaction, TransactionType};

pub fn parse_asset(value: &str) -> Result<Asset, ParseError> {
    Asset::from_str(value)
}

/// Parses a `TYPE ASSET AMOUNT` line, e.g. `deposit btc 1.5`.
///
/// Tokens are whitespace separated; type and asset are case-insensitive.
/// The amount accepts plain and scientific notation and must be positive.
pub fn parse_transaction(line: &str) -> Result<Transaction, ParseError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let [kind, asset, amount] = parts.as_slice() else {
        return Err(ParseError::InvalidTransactionFormat);
    };

    let kind = TransactionType::from_str(kind)?;
    let asset = parse_asset(asset)?;
    let amount = parse_amount(amount)?;

    Transaction::new(kind, asset, amount).map_err(|_| ParseError::NonPositiveAmount { amount })
}

fn parse_amount(value: &str) -> Result<Decimal, ParseError> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| ParseError::InvalidAmountLiteral {
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_deposit() {
        let tx = parse_transaction("DEPOSIT BTC 1.5").unwrap();
        assert_eq!(tx.kind(), TransactionType::Deposit);
        assert_eq!(tx.asset(), Asset::Btc);
        assert_eq!(tx.amount(), dec!(1.5));
    }

    #[test]
    fn test_parse_withdraw() {
        let tx = parse_transaction("WITHDRAW USD 300").unwrap();
        assert_eq!(tx.kind(), TransactionType::Withdraw);
        assert_eq!(tx.asset(), Asset::Usd);
        assert_eq!(tx.amount(), dec!(300));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let tx = parse_transaction("deposit eth 2.5").unwrap();
        assert_eq!(tx.kind(), TransactionType::Deposit);
        assert_eq!(tx.asset(), Asset::Eth);
        assert_eq!(tx.amount(), dec!(2.5));
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let tx = parse_transaction("  DEPOSIT   BTC \t 1.0  ").unwrap();
        assert_eq!(tx.asset(), Asset::Btc);
        assert_eq!(tx.amount(), dec!(1.0));
    }

    #[test]
    fn test_parse_scientific_amount() {
        let tx = parse_transaction("DEPOSIT BTC 1e-8").unwrap();
        assert_eq!(tx.amount(), dec!(0.00000001));
    }

    #[test]
    fn test_parse_wrong_token_count() {
        assert_eq!(
            parse_transaction("DEPOSIT BTC"),
            Err(ParseError::InvalidTransactionFormat)
        );
        assert_eq!(
            parse_transaction("DEPOSIT BTC 1 2"),
            Err(ParseError::InvalidTransactionFormat)
        );
        assert_eq!(parse_transaction(""), Err(ParseError::InvalidTransactionFormat));
    }

    #[test]
    fn test_parse_unknown_type() {
        assert!(matches!(
            parse_transaction("TRANSFER BTC 1.0"),
            Err(ParseError::InvalidTransactionType { value }) if value == "TRANSFER"
        ));
    }

    #[test]
    fn test_parse_unknown_asset() {
        let err = parse_transaction("DEPOSIT XRP 100").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidAsset {
                value: "XRP".to_string()
            }
        );
        assert!(err.to_string().contains("Supported: BTC, ETH, USD"));
    }

    #[test]
    fn test_parse_unparsable_amount() {
        assert!(matches!(
            parse_transaction("DEPOSIT BTC abc"),
            Err(ParseError::InvalidAmountLiteral { value }) if value == "abc"
        ));
    }

    #[test]
    fn test_parse_non_positive_amount() {
        assert_eq!(
            parse_transaction("WITHDRAW ETH 0"),
            Err(ParseError::NonPositiveAmount { amount: dec!(0) })
        );
        assert_eq!(
            parse_transaction("DEPOSIT ETH -2"),
            Err(ParseError::NonPositiveAmount { amount: dec!(-2) })
        );
    }

    #[test]
    fn test_type_is_checked_before_asset() {
        assert!(matches!(
            parse_transaction("SEND XRP abc"),
            Err(ParseError::InvalidTransactionType { .. })
        ));
    }
}

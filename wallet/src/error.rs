use rust_decimal::Decimal;

use crate::types::{Asset, TransactionType};

/// Failures raised by the wallet core. Insufficient funds is not one of
/// them: a withdrawal that cannot be covered is reported as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    #[error("{kind} amount must be positive, got {amount}")]
    InvalidAmount {
        kind: TransactionType,
        amount: Decimal,
    },
    #[error("balance cannot be negative: {asset}={amount}")]
    InvalidInitialBalance { asset: Asset, amount: Decimal },
    #[error("invalid transaction: {reason}")]
    InvalidTransaction { reason: String },
    #[error("balance overflow on {asset}")]
    BalanceOverflow { asset: Asset },
}

/// Failures raised while reading a `TYPE ASSET AMOUNT` line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid transaction format. Expected: 'TYPE ASSET AMOUNT'")]
    InvalidTransactionFormat,
    #[error("Invalid transaction type: '{value}'. Expected: DEPOSIT or WITHDRAW")]
    InvalidTransactionType { value: String },
    #[error("Invalid asset: '{value}'. Supported: BTC, ETH, USD")]
    InvalidAsset { value: String },
    #[error("Invalid amount: '{value}'. Must be a valid number.")]
    InvalidAmountLiteral { value: String },
    #[error("Transaction amount must be positive, got {amount}")]
    NonPositiveAmount { amount: Decimal },
}

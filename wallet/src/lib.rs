pub mod error;
pub mod format;
pub mod parse;
pub mod reducer;
pub mod types;
pub mod wallet;

pub use error::{ParseError, WalletError};
pub use format::format_balances;
pub use parse::{parse_asset, parse_transaction};
pub use types::{Amount, Asset, Balances, Transaction, TransactionType};
pub use wallet::Wallet;

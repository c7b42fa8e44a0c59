pub mod block;
pub mod currency;
pub mod request;
pub mod transfer;

pub use block::Block;
pub use currency::{CurrencyConfig, CurrencyKind, CurrencyOptions, NATIVE_CURRENCY_ID};
pub use request::{GeneratedAddress, TransactionOptions, TransactionRequest};
pub use transfer::{CanonicalTransaction, TransactionStatus};

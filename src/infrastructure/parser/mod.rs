pub mod parser;

pub use parser::{ScannedTransaction, TRANSFER_EVENT_TOPIC, TransactionClassifier, is_transfer_event};

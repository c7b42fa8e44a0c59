pub mod adapter;
pub mod balance_service;
pub mod block_service;
pub mod currency_router;
pub mod tx;
pub mod tx_service;

pub use adapter::{BlockchainAdapter, WalletAdapter};
pub use block_service::TronBlockchain;
pub use tx_service::TronWallet;

pub mod config;
pub mod settings;

pub use config::AppConfig;
pub use settings::{BlockchainFeatures, BlockchainSettings, WalletCredentials, WalletFeatures, WalletSettings};

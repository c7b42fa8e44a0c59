pub mod node_signer;
pub mod signer_trait;

pub use node_signer::NodeSigner;
pub use signer_trait::TransactionSigner;

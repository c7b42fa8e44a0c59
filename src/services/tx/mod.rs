pub mod fee;
pub mod signer;
pub mod types;

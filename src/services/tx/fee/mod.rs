pub mod fee_service;

pub use fee_service::{DEFAULT_FEE_LIMIT, collection_fee, fee_limit};

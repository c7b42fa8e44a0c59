pub mod domain;
pub mod rpc;

pub use domain::*;

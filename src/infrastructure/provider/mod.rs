pub mod client;
pub mod tron_provider;
mod retry_adapter;

pub use client::TronClient;
pub use retry_adapter::RetryAdapter;
pub use tron_provider::{HttpTransport, TransportFactory, TronTransport, http_transport_factory};

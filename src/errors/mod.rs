pub mod error;

pub use error::{AdapterError, ClientError, CodecError, Result, TransportError};

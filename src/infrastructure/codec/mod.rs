pub mod address;

pub use address::{ADDRESS_PREFIX, AddressCodec, TronAddressCodec, strip_address_prefix};

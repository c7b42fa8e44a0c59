pub mod check;
pub mod convert;
pub mod format;
pub mod logger;

pub use check::*;
pub use convert::*;

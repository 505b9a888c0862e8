pub mod errors;
pub mod format;

pub use errors::*;
pub use format::*;

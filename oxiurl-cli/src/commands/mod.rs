//! Command implementations for OxiUrl CLI.

pub mod compress;
pub mod expand;
pub mod inspect;
pub mod utf8;

pub use compress::cmd_compress;
pub use expand::cmd_expand;
pub use inspect::cmd_inspect;
pub use utf8::{cmd_utf8_decode, cmd_utf8_encode};

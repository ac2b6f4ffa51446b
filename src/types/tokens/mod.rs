//! Strong types for token-related values
//!
//! ```text
//! Address (any form)
//!     |
//!     | normalize_native()
//!     ↓
//! Address (native coin always NATIVE_COIN_ADDRESS)
//!     |
//!     | TokenDecimals
//!     ↓
//! U256 minimal units <-> decimal string
//! ```

mod address;
mod decimals;

pub use address::{is_native, normalize_native, NATIVE_COIN_ADDRESS};
pub use decimals::TokenDecimals;

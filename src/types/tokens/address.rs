//! Native coin address conventions

use alloy_primitives::{address, Address};

/// Sentinel address aggregators use for the chain's native coin.
pub const NATIVE_COIN_ADDRESS: Address = address!("eeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");

/// Map every spelling of the native coin to [`NATIVE_COIN_ADDRESS`].
///
/// The zero address is accepted as native; any other address is returned
/// unchanged.
///
/// ```
/// use alloy_primitives::Address;
/// use relayswap::{normalize_native, NATIVE_COIN_ADDRESS};
///
/// assert_eq!(normalize_native(Address::ZERO), NATIVE_COIN_ADDRESS);
/// ```
pub fn normalize_native(token: Address) -> Address {
    if token.is_zero() {
        NATIVE_COIN_ADDRESS
    } else {
        token
    }
}

/// Whether `token` denotes the native coin itself (not its wrapped form).
pub fn is_native(token: Address) -> bool {
    normalize_native(token) == NATIVE_COIN_ADDRESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_and_sentinel_are_native() {
        assert!(is_native(Address::ZERO));
        assert!(is_native(NATIVE_COIN_ADDRESS));
    }

    #[test]
    fn test_token_is_untouched() {
        let token: Address = "0x55d398326f99059fF775485246999027B3197955".parse().unwrap();
        assert_eq!(normalize_native(token), token);
        assert!(!is_native(token));
    }
}

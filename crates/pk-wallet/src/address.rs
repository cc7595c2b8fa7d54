//! Address display and validation helpers.

/// Truncate an address for display: first four and last four characters
/// joined by an ellipsis. Addresses too short to truncate are returned
/// unchanged.
pub fn format_wallet_address(address: &str) -> String {
    if address.len() <= 8 {
        return address.to_owned();
    }
    // `get` rejects slices that would split a multi-byte character; such
    // input is not a real address, so pass it through untruncated.
    match (address.get(..4), address.get(address.len() - 4..)) {
        (Some(head), Some(tail)) => format!("{head}...{tail}"),
        _ => address.to_owned(),
    }
}

/// Base58 check for Solana-style addresses (32-44 chars, no `0OIl`).
pub fn is_valid_solana_address(address: &str) -> bool {
    (32..=44).contains(&address.len())
        && address.chars().all(|c| {
            c.is_ascii_alphanumeric() && !matches!(c, '0' | 'O' | 'I' | 'l')
        })
}

/// `0x` followed by exactly 40 hex digits.
pub fn is_valid_ethereum_address(address: &str) -> bool {
    let Some(hex) = address.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_addresses() {
        assert_eq!(
            format_wallet_address("0x1234567890abcdef1234567890abcdef12345678"),
            "0x12...5678"
        );
    }

    #[test]
    fn short_addresses_pass_through() {
        assert_eq!(format_wallet_address("abcd"), "abcd");
        assert_eq!(format_wallet_address(""), "");
    }

    #[test]
    fn multibyte_input_never_splits_a_character() {
        // No char boundary at byte 4: must pass through, not panic.
        let address = "ああああああああああ";
        assert_eq!(format_wallet_address(address), address);

        // Boundaries line up: truncates normally.
        assert_eq!(
            format_wallet_address("abcd€€€€€€wxyz"),
            "abcd...wxyz"
        );
    }

    #[test]
    fn solana_address_validation() {
        assert!(is_valid_solana_address(
            "4Nd1mBQtrMJVYVfKf2PJy9NZUZdTAsp7D4xWLs4gDB4T"
        ));
        // Contains the excluded base58 characters
        assert!(!is_valid_solana_address(
            "0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl"
        ));
        assert!(!is_valid_solana_address("tooshort"));
    }

    #[test]
    fn ethereum_address_validation() {
        assert!(is_valid_ethereum_address(
            "0x52908400098527886E0F7030069857D2E4169EE7"
        ));
        assert!(!is_valid_ethereum_address(
            "52908400098527886E0F7030069857D2E4169EE7"
        ));
        assert!(!is_valid_ethereum_address("0x1234"));
        assert!(!is_valid_ethereum_address(
            "0xZZ908400098527886E0F7030069857D2E4169EE7"
        ));
    }
}

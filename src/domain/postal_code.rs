//! Format checks for US and Canadian postal codes.
//!
//! These only check shape. Whether a postal code matches the card's billing
//! address is decided server side when the payment method is created.

use once_cell::sync::Lazy;
use regex::Regex;

static US_POSTAL_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[0-9]{5}(-[0-9]{4})?\s*$").expect("US postal code pattern is valid")
});

static CA_POSTAL_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[ABCEGHJKLMNPRSTVXY][0-9][ABCEGHJKLMNPRSTVWXYZ]\s?[0-9][ABCEGHJKLMNPRSTVWXYZ][0-9]$",
    )
    .expect("CA postal code pattern is valid")
});

/// ZIP or ZIP+4, surrounding whitespace allowed.
pub fn is_valid_us_postal_code(postal_code: &str) -> bool {
    US_POSTAL_CODE.is_match(postal_code)
}

/// `A1A 1A1`, case-insensitive, optional single space.
pub fn is_valid_ca_postal_code(postal_code: &str) -> bool {
    CA_POSTAL_CODE.is_match(postal_code)
}

pub fn is_valid_postal_code(postal_code: &str) -> bool {
    is_valid_us_postal_code(postal_code) || is_valid_ca_postal_code(postal_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_postal_codes() {
        assert!(is_valid_us_postal_code("55056"));
        assert!(is_valid_us_postal_code("55056-1234"));
        assert!(is_valid_us_postal_code("  55056  "));
        assert!(!is_valid_us_postal_code("550"));
        assert!(!is_valid_us_postal_code("55056-12"));
        assert!(!is_valid_us_postal_code("5505a"));
    }

    #[test]
    fn test_ca_postal_codes() {
        assert!(is_valid_ca_postal_code("K1A 0B1"));
        assert!(is_valid_ca_postal_code("k1a0b1"));
        // D, F, I, O, Q, U never appear; W and Z never lead
        assert!(!is_valid_ca_postal_code("D1A 0B1"));
        assert!(!is_valid_ca_postal_code("W1A 0B1"));
        assert!(!is_valid_ca_postal_code("K1A  0B1"));
    }

    #[test]
    fn test_either_format() {
        assert!(is_valid_postal_code("55056"));
        assert!(is_valid_postal_code("K1A 0B1"));
        assert!(!is_valid_postal_code(""));
    }
}

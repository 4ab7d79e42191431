//! Portuguese NIF (Número de Identificação Fiscal) check digit.
//!
//! The ninth digit is a mod-11 check over the first eight, weighted 9..2
//! from the left. A remainder that would give 10 or 11 maps to 0.

/// Validate a 9-digit NIF.
///
/// Total over all inputs: anything that is not exactly nine ASCII digits
/// is simply invalid.
pub fn is_valid_nif(nif: &str) -> bool {
    let bytes = nif.as_bytes();
    if bytes.len() != 9 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    weighted_check(&bytes[..8]) == bytes[8] - b'0'
}

/// Compute the check digit for an 8-digit prefix.
///
/// Returns `None` unless `prefix` is exactly eight ASCII digits.
pub fn check_digit(prefix: &str) -> Option<u8> {
    let bytes = prefix.as_bytes();
    if bytes.len() != 8 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(weighted_check(bytes))
}

fn weighted_check(digits: &[u8]) -> u8 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| u32::from(d - b'0') * (9 - i as u32))
        .sum();
    let check = 11 - (sum % 11);
    if check >= 10 { 0 } else { check as u8 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_valid() {
        assert!(is_valid_nif("999999990"));
        assert!(is_valid_nif("100000061"));
        assert!(is_valid_nif("501442600"));
    }

    #[test]
    fn known_invalid() {
        assert!(!is_valid_nif("592001260"));
        assert!(!is_valid_nif("999999991"));
    }

    #[test]
    fn malformed_input_is_invalid() {
        assert!(!is_valid_nif(""));
        assert!(!is_valid_nif("99999999"));
        assert!(!is_valid_nif("9999999900"));
        assert!(!is_valid_nif("99999999O"));
        assert!(!is_valid_nif("ãããã"));
    }

    #[test]
    fn check_digit_matches_validation() {
        assert_eq!(check_digit("99999999"), Some(0));
        assert_eq!(check_digit("10000006"), Some(1));
        assert_eq!(check_digit("1234567"), None);
        assert_eq!(check_digit("1234567a"), None);
    }
}

#![no_main]

use actud::nif::{check_digit, is_valid_nif};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let valid = is_valid_nif(s);
    if let Some(prefix) = s.get(..8) {
        if let Some(check) = check_digit(prefix) {
            assert_eq!(valid, s.len() == 9 && s.as_bytes()[8] == b'0' + check);
        }
    }
});

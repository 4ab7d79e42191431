#![no_main]

use actud::{ParseOptions, Record};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Errors are fine, panics are bugs.
        let _ = Record::parse(s, ParseOptions::strict());
        let _ = Record::parse(s, ParseOptions::lenient());
    }
});

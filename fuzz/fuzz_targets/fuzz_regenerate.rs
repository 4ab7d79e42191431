#![no_main]

use actud::{ParseOptions, Record};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(mut first) = Record::parse(s, ParseOptions::lenient()) else {
        return;
    };
    // Incomplete records regenerate with empty required values, which
    // do not satisfy the length bounds on the way back in.
    if !first.is_valid() {
        return;
    }
    let once = first.regenerate().to_owned();
    // Canonical output must parse and regenerate to itself.
    let mut second = Record::parse(&once, ParseOptions::lenient())
        .expect("regenerated output must parse");
    assert_eq!(second.regenerate(), once);
});

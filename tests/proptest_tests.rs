//! Property tests for the NIF check digit and canonical regeneration.

use actud::nif::{check_digit, is_valid_nif};
use actud::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy::MidpointAwayFromZero;

/// Non-negative amounts with at most two decimals.
fn arb_cents() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Non-negative amounts with up to four decimals, biased towards values
/// below one cent.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::ZERO),
        (0i64..100, 0u32..=4).prop_map(|(n, scale)| Decimal::new(n, scale)),
        (0i64..1_000_000_000, 0u32..=4).prop_map(|(n, scale)| Decimal::new(n, scale)),
    ]
}

fn arb_nif() -> impl Strategy<Value = String> {
    "[1-9][0-9]{7}".prop_map(|prefix| {
        let check = check_digit(&prefix).unwrap();
        format!("{prefix}{check}")
    })
}

fn arb_type() -> impl Strategy<Value = InvoiceType> {
    proptest::sample::select(InvoiceType::ALL.to_vec())
}

fn arb_status() -> impl Strategy<Value = InvoiceStatus> {
    proptest::sample::select(InvoiceStatus::ALL.to_vec())
}

fn arb_country() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(countries::countries().iter().map(|c| c.code).collect::<Vec<_>>())
}

/// A well-formed record with every optional amount drawn from a range
/// that includes zero and sub-cent values.
fn arb_record() -> impl Strategy<Value = String> {
    (
        arb_nif(),
        arb_country(),
        arb_type(),
        arb_status(),
        "[A-Z]{2,3} [0-9]{1,4}/[0-9]{2}",
        proptest::collection::vec(arb_amount(), 12),
        "[A-Za-z0-9/]{4}",
    )
        .prop_map(|(nif, country, kind, status, number, amounts, hash)| {
            let optional = ["I2", "I3", "I4", "I5", "I6", "I7", "I8", "L", "M"];
            let mut raw = format!(
                "A:{nif}*B:999999990*C:{country}*D:{}*E:{}*F:20240206*G:{number}*H:0*I1:PT",
                kind.code(),
                status.code()
            );
            for (key, amount) in optional.iter().zip(&amounts) {
                raw.push_str(&format!("*{key}:{amount}"));
            }
            raw.push_str(&format!(
                "*N:{}*O:{}*P:{}*Q:{hash}*R:2648",
                amounts[9], amounts[10], amounts[11]
            ));
            raw
        })
}

proptest! {
    /// Appending the computed check digit always yields a valid NIF.
    #[test]
    fn check_digit_completes_valid_nif(nif in arb_nif()) {
        prop_assert!(is_valid_nif(&nif));
    }

    /// Any other final digit is rejected.
    #[test]
    fn wrong_check_digit_rejected(prefix in "[0-9]{8}", offset in 1u8..10) {
        let check = check_digit(&prefix).unwrap();
        let wrong = (check + offset) % 10;
        let candidate = format!("{prefix}{wrong}");
        prop_assert!(!is_valid_nif(&candidate));
    }

    /// Validation never panics on arbitrary text.
    #[test]
    fn nif_validation_is_total(s in ".*") {
        let _ = is_valid_nif(&s);
    }

    /// Parsing canonical output gives back the same canonical output.
    #[test]
    fn regeneration_is_stable(raw in arb_record()) {
        let mut first = parse(&raw).unwrap();
        prop_assert!(first.is_valid());
        let once = first.regenerate().to_owned();
        let mut second = parse(&once).unwrap();
        prop_assert_eq!(second.regenerate(), once.as_str());
    }

    /// Every optional amount that is written reads back as non-zero.
    #[test]
    fn written_optional_amounts_are_nonzero(raw in arb_record()) {
        let mut first = parse(&raw).unwrap();
        let once = first.regenerate().to_owned();
        let second = parse(&once).unwrap();
        for spec in optional_specs().filter(|s| s.field.is_amount()) {
            if once.split('*').any(|seg| seg.starts_with(&format!("{}:", spec.key))) {
                prop_assert!(!second.body().amount(spec.field).unwrap_or_default().is_zero());
            }
        }
    }

    /// Optional amounts that round to zero never appear; the others always do.
    #[test]
    fn zero_optional_amounts_omitted(raw in arb_record()) {
        let mut record = parse(&raw).unwrap();
        let body = record.body().clone();
        let text = record.regenerate().to_owned();
        for spec in optional_specs().filter(|s| s.field.is_amount()) {
            let present = text.split('*').any(|seg| seg.starts_with(&format!("{}:", spec.key)));
            let nonzero = body
                .amount(spec.field)
                .is_some_and(|a| !a.round_dp_with_strategy(2, MidpointAwayFromZero).is_zero());
            prop_assert_eq!(present, nonzero, "key {}", spec.key);
        }
    }

    /// Two-decimal amounts survive a round trip exactly.
    #[test]
    fn amount_round_trip(amount in arb_cents()) {
        let mut body = RecordBody::default();
        body.try_set_gross_total(&format_amount(amount)).unwrap();
        prop_assert_eq!(body.gross_total(), amount);
    }

    /// Parsing arbitrary input never panics, in either mode.
    #[test]
    fn parse_is_total(s in "[A-Z0-9:*. /-]{0,200}") {
        let _ = parse(&s);
        let _ = Record::parse(&s, ParseOptions::lenient());
    }
}

#[test]
fn country_zy_strict_and_lenient() {
    let raw = "A:999999990*B:100000061*C:ZY*D:FT*E:N*F:20240206*G:FT 1/1*H:0*I1:PT*N:0*O:0";
    assert!(parse(raw).is_err());
    let record = Record::parse(raw, ParseOptions::lenient()).unwrap();
    assert!(!record.is_valid());
    assert_eq!(record.body().buyer_country(), None);
}

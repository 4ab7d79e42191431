//! Inputs a scanner can realistically hand over: truncated frames, stray
//! separators, duplicated keys, odd characters.

use actud::*;
use rust_decimal_macros::dec;

const SAMPLE: &str = "A:999999990*B:100000061*C:PT*D:FT*E:N*F:20201123*G:FAC 1/19*H:0*I1:PT*I7:17.90*I8:4.12*N:4.12*O:22.02*Q:LJT/*R:2648";

// --- Tokenizing ---

#[test]
fn value_keeps_extra_colons() {
    let raw = SAMPLE.replace("G:FAC 1/19", "G:FAC:2024/1");
    let record = parse(&raw).unwrap();
    assert_eq!(record.body().invoice_no(), Some("FAC:2024/1"));
}

#[test]
fn stray_separators_are_ignored() {
    let raw = format!("**{}**", SAMPLE.replace("*B:", "**B:"));
    let mut record = parse(&raw).unwrap();
    assert!(record.is_valid());
    assert_eq!(record.regenerate(), SAMPLE);
}

#[test]
fn segment_without_colon_is_skipped() {
    let raw = format!("{SAMPLE}*garbage");
    let record = parse(&raw).unwrap();
    assert!(record.is_valid());
    assert!(record.suppressed_errors().is_empty());
}

#[test]
fn unknown_keys_are_ignored() {
    let raw = format!("{SAMPLE}*Z:whatever*I9:1.00");
    let mut record = parse(&raw).unwrap();
    assert_eq!(record.regenerate(), SAMPLE);
}

#[test]
fn keys_are_case_sensitive() {
    let raw = SAMPLE.replace("A:999999990", "a:999999990");
    match parse(&raw).unwrap_err() {
        ActudError::MissingFields { missing, received } => {
            assert_eq!(missing, ["A"]);
            assert_eq!(received[0], "a");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn duplicate_key_last_value_wins_even_if_first_was_bad() {
    let raw = SAMPLE.replace("D:FT", "D:ZZ*D:FS");
    let record = parse(&raw).unwrap();
    assert_eq!(record.body().invoice_type(), Some(InvoiceType::SimplifiedInvoice));
}

#[test]
fn duplicate_key_reported_once_in_received() {
    let raw = "A:999999990*A:999999990";
    match parse(raw).unwrap_err() {
        ActudError::MissingFields { received, .. } => assert_eq!(received, ["A"]),
        other => panic!("unexpected error: {other}"),
    }
}

// --- Lengths count characters, not bytes ---

#[test]
fn multibyte_text_within_limit() {
    let comment = "ç".repeat(65);
    let raw = format!("{SAMPLE}*S:{comment}");
    let record = parse(&raw).unwrap();
    assert_eq!(record.body().comment().map(|c| c.chars().count()), Some(65));
}

#[test]
fn comment_over_limit() {
    let raw = format!("{SAMPLE}*S:{}", "x".repeat(66));
    let err = Record::parse(&raw, ParseOptions::lenient()).unwrap_err();
    assert_eq!(
        err,
        ActudError::Length {
            field: Field::Comment,
            observed: 66,
            min: 0,
            max: 65
        }
    );
}

#[test]
fn hash_over_limit() {
    let raw = SAMPLE.replace("Q:LJT/", "Q:LJT/x");
    assert!(matches!(
        parse(&raw).unwrap_err(),
        ActudError::Length {
            field: Field::Hash,
            ..
        }
    ));
}

#[test]
fn empty_document_number_is_allowed() {
    let raw = SAMPLE.replace("G:FAC 1/19", "G:");
    let mut record = parse(&raw).unwrap();
    assert_eq!(record.body().invoice_no(), Some(""));
    assert!(record.regenerate().contains("*G:*"));
}

// --- Dates ---

#[test]
fn impossible_date_kept_as_read() {
    let mut record = parse(&SAMPLE.replace("F:20201123", "F:20201341")).unwrap();
    let date = record.body().invoice_date().unwrap();
    assert_eq!(date.calendar_date(), None);
    assert!(record.regenerate().contains("*F:20201341*"));
}

#[test]
fn non_digit_date() {
    let raw = SAMPLE.replace("F:20201123", "F:2020-1-2");
    assert!(parse(&raw).unwrap_err().is_value_error());

    let mut record = Record::parse(&raw, ParseOptions::lenient()).unwrap();
    assert!(!record.is_valid());
    assert_eq!(record.body().invoice_date(), None);
    assert!(record.regenerate().contains("*F:*"));
}

// --- Amounts ---

#[test]
fn amounts_are_rounded_to_cents() {
    let raw = SAMPLE.replace("O:22.02", "O:22.015");
    let mut record = parse(&raw).unwrap();
    assert_eq!(record.body().gross_total(), dec!(22.015));
    assert!(record.regenerate().contains("*O:22.02*"));
}

#[test]
fn integral_amount_gets_two_decimals() {
    let mut record = parse(&SAMPLE.replace("O:22.02", "O:22")).unwrap();
    assert!(record.regenerate().contains("*O:22.00*"));
}

#[test]
fn zero_optional_amount_is_omitted() {
    let raw = SAMPLE.replace("I7:17.90", "I7:0.00");
    let mut record = parse(&raw).unwrap();
    assert!(!record.regenerate().contains("I7"));
}

#[test]
fn sub_cent_optional_amount_is_omitted() {
    let raw = SAMPLE.replace("*I7:17.90", "*I2:0.001*I7:17.90");
    let mut record = parse(&raw).unwrap();
    let once = record.regenerate().to_owned();
    assert!(!once.contains("I2:"));

    let mut again = parse(&once).unwrap();
    assert_eq!(again.regenerate(), once);
}

#[test]
fn half_cent_optional_amount_rounds_up_and_is_kept() {
    let raw = SAMPLE.replace("*I7:17.90", "*I2:0.005*I7:17.90");
    let mut record = parse(&raw).unwrap();
    let once = record.regenerate().to_owned();
    assert!(once.contains("*I2:0.01*"));

    let mut again = parse(&once).unwrap();
    assert_eq!(again.regenerate(), once);
}

#[test]
fn zero_required_amount_is_written() {
    let raw = SAMPLE.replace("N:4.12", "N:0");
    let mut record = parse(&raw).unwrap();
    assert!(record.regenerate().contains("*N:0.00*"));
}

#[test]
fn empty_amount_is_a_value_error() {
    let raw = SAMPLE.replace("O:22.02", "O:");
    let err = parse(&raw).unwrap_err();
    assert_eq!(err.field(), Some(Field::GrossTotal));
    assert!(err.is_value_error());
}

#[test]
fn amount_with_comma_decimal_separator() {
    let raw = SAMPLE.replace("O:22.02", "O:22,02");
    assert!(parse(&raw).is_err());
}

// --- Optional text fields ---

#[test]
fn empty_comment_is_omitted() {
    let mut record = parse(&format!("{SAMPLE}*S:")).unwrap();
    assert_eq!(record.body().comment(), None);
    assert!(record.regenerate().ends_with("*R:2648"));
}

#[test]
fn missing_hash_and_certificate_still_written() {
    let raw = SAMPLE.replace("*Q:LJT/*R:2648", "");
    let mut record = parse(&raw).unwrap();
    assert!(record.is_valid());
    assert!(record.regenerate().ends_with("*O:22.02*Q:*R:"));
}

#[test]
fn missing_hash_and_certificate_reparse_to_same_body() {
    let raw = SAMPLE.replace("*Q:LJT/*R:2648", "");
    let mut first = parse(&raw).unwrap();
    let second = parse(first.regenerate()).unwrap();
    assert_eq!(second.body(), first.body());
    assert_eq!(second.body().hash(), None);
    assert_eq!(second.body().certificate_number(), None);
}

// --- Sentinels collected in order ---

#[test]
fn suppressed_errors_in_field_order() {
    let raw = SAMPLE
        .replace("C:PT", "C:ZY")
        .replace("E:N", "E:X")
        .replace("I7:17.90", "I7:?");
    let record = Record::parse(&raw, ParseOptions::lenient()).unwrap();
    let fields: Vec<_> = record
        .suppressed_errors()
        .iter()
        .filter_map(ActudError::field)
        .collect();
    assert_eq!(
        fields,
        [Field::BuyerCountry, Field::InvoiceStatus, Field::Vat3Base]
    );
}

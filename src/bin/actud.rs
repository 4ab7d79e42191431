//! Decode ATCUD payloads read from a file or stdin.
//!
//! Input is split into frames on CR and LF, the way barcode scanners on a
//! serial line terminate each read. Every frame is parsed on its own; a bad
//! frame is reported and the next one is still decoded.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use actud::{FIELD_SPECS, ParseOptions, Record, format_amount};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "actud", version, about = "Decode Portuguese invoice ATCUD QR payloads")]
struct Cli {
    /// File to read; stdin when omitted.
    input: Option<PathBuf>,

    /// Keep going on unknown codes, bad check digits and missing keys.
    #[arg(long)]
    ignore_errors: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Human-readable field listing.
    Text,
    /// One JSON object per frame.
    Json,
    /// Canonical ATCUD text.
    Regenerate,
}

fn read_input(path: Option<&PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn frames(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|frame| !frame.is_empty())
}

fn render_text(record: &Record) -> String {
    let body = record.body();
    let text = |v: Option<&str>| v.unwrap_or("").to_owned();
    let mut lines = vec![
        ("valid", record.is_valid().to_string()),
        ("seller NIF", text(body.seller_vat_number())),
        ("buyer NIF", text(body.buyer_vat_number())),
        ("buyer country", body.buyer_country_label().to_owned()),
        ("document type", body.invoice_type_label().to_owned()),
        ("document status", body.invoice_status_label().to_owned()),
        (
            "document date",
            body.invoice_date().map(|d| d.to_string()).unwrap_or_default(),
        ),
        ("document number", text(body.invoice_no())),
        ("ATCUD", text(body.actud())),
        ("fiscal space", body.tax_country_region_label().to_owned()),
    ];
    for spec in FIELD_SPECS.iter().filter(|s| s.field.is_amount()) {
        if let Some(amount) = body.amount(spec.field) {
            lines.push((spec.field.name(), format_amount(amount)));
        }
    }
    lines.push(("hash", text(body.hash())));
    lines.push(("certificate", text(body.certificate_number())));
    if let Some(comment) = body.comment() {
        lines.push(("comment", comment.to_owned()));
    }
    for err in record.suppressed_errors() {
        lines.push(("suppressed", err.to_string()));
    }

    let mut out = String::new();
    for (label, value) in lines {
        let _ = writeln!(out, "{:<22}{value}", format!("{label}:"));
    }
    out
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let input = match read_input(cli.input.as_ref()) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("FATAL: cannot read input: {e}");
            return ExitCode::from(2);
        }
    };

    let options = ParseOptions::strict().ignore_errors(cli.ignore_errors);
    let mut failed = false;

    for (idx, frame) in frames(&input).enumerate() {
        let mut record = match Record::parse(frame, options) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!(frame = idx + 1, raw = frame, "frame rejected");
                eprintln!("FAIL: frame {}: {e}", idx + 1);
                failed = true;
                continue;
            }
        };

        match cli.format {
            Format::Text => println!("{}", render_text(&record)),
            Format::Regenerate => println!("{}", record.regenerate()),
            Format::Json => {
                record.regenerate();
                match serde_json::to_string(&record) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("FAIL: frame {}: {e}", idx + 1);
                        failed = true;
                    }
                }
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

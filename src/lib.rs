//! # actud
//!
//! Parser, validator and serializer for the ATCUD payload printed as a QR
//! code on Portuguese invoices (Portaria n.º 195/2020).
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Field rules follow the SAF-T(PT) tables: NIF check digits, ISO 3166-1
//! country codes, and the closed document type and status code lists.
//!
//! ## Quick Start
//!
//! ```rust
//! use actud::{ParseOptions, Record};
//! use rust_decimal::Decimal;
//!
//! let raw = "A:999999990*B:100000061*C:PT*D:FT*E:N*F:20201123*G:FAC 1/19*H:0\
//!            *I1:PT*I7:17.90*I8:4.12*N:4.12*O:22.02*Q:LJT/*R:2648";
//!
//! let mut record = Record::parse(raw, ParseOptions::strict()).unwrap();
//! assert!(record.is_valid());
//! assert_eq!(record.body().invoice_type_label(), "Fatura");
//! assert_eq!(record.body().gross_total(), Decimal::new(2202, 2));
//!
//! record.body_mut().try_set_comment("Obrigado").unwrap();
//! assert!(record.regenerate().ends_with("*S:Obrigado"));
//! ```
//!
//! ## Untrusted input
//!
//! Scanner streams deliver garbage as well as records. With
//! [`ParseOptions::lenient`] unknown codes, bad check digits and missing
//! keys no longer abort parsing; the record is returned with
//! `is_valid() == false` and the failures listed in
//! [`Record::suppressed_errors`]. Length violations are always fatal.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Record codec, country table, NIF check digit |
//! | `cli` | `actud` command-line decoder |

#[cfg(feature = "core")]
pub mod core;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;

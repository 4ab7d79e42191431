//! ATCUD record codec.
//!
//! Tokenizes the `KEY:VALUE*KEY:VALUE` payload of Portuguese invoice QR
//! codes, validates every field against the fiscal rules (NIF check digit,
//! ISO 3166 countries, SAF-T document codes), and writes a possibly edited
//! record back in canonical form.

mod amount;
mod body;
pub mod countries;
mod date;
mod document;
mod error;
mod field;
pub mod nif;
mod options;
mod record;

pub use amount::format_amount;
pub use body::*;
pub use countries::{Country, TaxRegion, find_country, is_known_country_code};
pub use date::InvoiceDate;
pub use document::*;
pub use error::*;
pub use field::*;
pub use nif::is_valid_nif;
pub use options::ParseOptions;
pub use record::*;

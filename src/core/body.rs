//! The validated field set of an ATCUD record.

use std::fmt::{self, Write as _};

use rust_decimal::Decimal;
use serde::Serialize;

use super::amount::{check_non_negative, format_amount, parse_amount, round_amount};
use super::countries::{self, Country, TaxRegion};
use super::date::InvoiceDate;
use super::document::{InvoiceStatus, InvoiceType, UNKNOWN_LABEL};
use super::error::ActudError;
use super::field::{Emission, FIELD_SPECS, Field};
use super::nif;
use super::options::ParseOptions;

/// Literal used on the wire for an unknown buyer country (final consumer).
pub const UNKNOWN_COUNTRY: &str = "Desconhecido";

/// Outcome of a successful `try_set_*` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// The value passed validation and was stored.
    Accepted,
    /// The value failed a suppressible check; the field holds its sentinel.
    Substituted(ActudError),
}

impl Assignment {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Field-by-field validated ATCUD body.
///
/// Every `try_set_*` method first checks the value length (never
/// suppressible) and then the field's semantic rule. With
/// [`ParseOptions::ignore_errors`] a semantic failure stores a sentinel
/// instead of failing:
///
/// | Field | Sentinel |
/// |---|---|
/// | SellerVatNumber | the supplied value, unverified |
/// | BuyerCountry, TaxCountryRegion | `None` (unknown) |
/// | InvoiceType, InvoiceStatus, InvoiceDate | `None` |
/// | amounts (non-numeric text) | unset, reads as 0 |
///
/// Negative amounts are rejected regardless of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordBody {
    #[serde(skip)]
    options: ParseOptions,
    seller_vat_number: Option<String>,
    buyer_vat_number: Option<String>,
    buyer_country: Option<&'static Country>,
    invoice_type: Option<InvoiceType>,
    invoice_status: Option<InvoiceStatus>,
    invoice_date: Option<InvoiceDate>,
    invoice_no: Option<String>,
    #[serde(rename = "ACTUD")]
    actud: Option<String>,
    tax_country_region: Option<TaxRegion>,
    vat_exempt_taxable_base: Option<Decimal>,
    vat1_base: Option<Decimal>,
    vat1: Option<Decimal>,
    vat2_base: Option<Decimal>,
    vat2: Option<Decimal>,
    vat3_base: Option<Decimal>,
    vat3: Option<Decimal>,
    not_taxable: Option<Decimal>,
    stamp_tax: Option<Decimal>,
    tax_payable: Option<Decimal>,
    gross_total: Option<Decimal>,
    withholding_tax_amount: Option<Decimal>,
    hash: Option<String>,
    certificate_number: Option<String>,
    comment: Option<String>,
}

impl Default for RecordBody {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

fn check_length(field: Field, value: &str) -> Result<(), ActudError> {
    let Some((min, max)) = field.length_bounds() else {
        return Ok(());
    };
    let observed = value.chars().count();
    if observed < min || observed > max {
        return Err(ActudError::Length {
            field,
            observed,
            min,
            max,
        });
    }
    Ok(())
}

/// Empty trailer text (Q, R, S) reads back as unset.
fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

impl RecordBody {
    /// An empty body. Every field is unset.
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            seller_vat_number: None,
            buyer_vat_number: None,
            buyer_country: None,
            invoice_type: None,
            invoice_status: None,
            invoice_date: None,
            invoice_no: None,
            actud: None,
            tax_country_region: None,
            vat_exempt_taxable_base: None,
            vat1_base: None,
            vat1: None,
            vat2_base: None,
            vat2: None,
            vat3_base: None,
            vat3: None,
            not_taxable: None,
            stamp_tax: None,
            tax_payable: None,
            gross_total: None,
            withholding_tax_amount: None,
            hash: None,
            certificate_number: None,
            comment: None,
        }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Turn a semantic check result into either the checked value or,
    /// when errors are ignored, the sentinel.
    fn settle<T>(
        &self,
        field: Field,
        outcome: Result<T, ActudError>,
        sentinel: T,
    ) -> Result<(T, Assignment), ActudError> {
        match outcome {
            Ok(value) => Ok((value, Assignment::Accepted)),
            Err(err) if self.options.ignore_errors && err.is_suppressible() => {
                tracing::warn!(field = field.name(), error = %err, "invalid value replaced by sentinel");
                Ok((sentinel, Assignment::Substituted(err)))
            }
            Err(err) => Err(err),
        }
    }

    /// Assign a raw wire value to `field`.
    pub fn try_set(&mut self, field: Field, value: &str) -> Result<Assignment, ActudError> {
        match field {
            Field::SellerVatNumber => self.try_set_seller_vat_number(value),
            Field::BuyerVatNumber => self.try_set_buyer_vat_number(value),
            Field::BuyerCountry => self.try_set_buyer_country(value),
            Field::InvoiceType => self.try_set_invoice_type(value),
            Field::InvoiceStatus => self.try_set_invoice_status(value),
            Field::InvoiceDate => self.try_set_invoice_date(value),
            Field::InvoiceNo => self.try_set_invoice_no(value),
            Field::Actud => self.try_set_actud(value),
            Field::TaxCountryRegion => self.try_set_tax_country_region(value),
            Field::Hash => self.try_set_hash(value),
            Field::CertificateNumber => self.try_set_certificate_number(value),
            Field::Comment => self.try_set_comment(value),
            amount => self.try_set_amount(amount, value),
        }
    }

    // ── Identity fields ─────────────────────────────────────────────────

    /// A: seller NIF, 9 digits with a valid check digit.
    pub fn seller_vat_number(&self) -> Option<&str> {
        self.seller_vat_number.as_deref()
    }

    pub fn try_set_seller_vat_number(&mut self, value: &str) -> Result<Assignment, ActudError> {
        let field = Field::SellerVatNumber;
        check_length(field, value)?;
        let outcome = if nif::is_valid_nif(value) {
            Ok(())
        } else {
            Err(ActudError::Checksum { field })
        };
        let ((), assignment) = self.settle(field, outcome, ())?;
        self.seller_vat_number = Some(value.to_owned());
        Ok(assignment)
    }

    /// B: buyer tax id, up to 30 characters (foreign ids allowed).
    pub fn buyer_vat_number(&self) -> Option<&str> {
        self.buyer_vat_number.as_deref()
    }

    pub fn try_set_buyer_vat_number(&mut self, value: &str) -> Result<Assignment, ActudError> {
        check_length(Field::BuyerVatNumber, value)?;
        self.buyer_vat_number = Some(value.to_owned());
        Ok(Assignment::Accepted)
    }

    /// C: buyer country. `None` means unknown (`Desconhecido`).
    pub fn buyer_country(&self) -> Option<&'static Country> {
        self.buyer_country
    }

    /// Country name, or `Desconhecido` when unknown.
    pub fn buyer_country_label(&self) -> &'static str {
        self.buyer_country.map_or(UNKNOWN_COUNTRY, |c| c.name)
    }

    pub fn try_set_buyer_country(&mut self, value: &str) -> Result<Assignment, ActudError> {
        let field = Field::BuyerCountry;
        if value.eq_ignore_ascii_case(UNKNOWN_COUNTRY) {
            self.buyer_country = None;
            return Ok(Assignment::Accepted);
        }
        check_length(field, value)?;
        let outcome = countries::find_country(value)
            .map(Some)
            .map_err(|e| e.into_value_error(field));
        let (country, assignment) = self.settle(field, outcome, None)?;
        self.buyer_country = country;
        Ok(assignment)
    }

    pub fn set_buyer_country(&mut self, country: Option<&'static Country>) {
        self.buyer_country = country;
    }

    /// D: document type.
    pub fn invoice_type(&self) -> Option<InvoiceType> {
        self.invoice_type
    }

    /// Printed label of the document type, `Unknown` when unset.
    pub fn invoice_type_label(&self) -> &'static str {
        self.invoice_type.map_or(UNKNOWN_LABEL, |t| t.label())
    }

    pub fn try_set_invoice_type(&mut self, value: &str) -> Result<Assignment, ActudError> {
        let field = Field::InvoiceType;
        check_length(field, value)?;
        let outcome = InvoiceType::from_code(value)
            .map(Some)
            .map_err(|e| e.into_value_error(field));
        let (kind, assignment) = self.settle(field, outcome, None)?;
        self.invoice_type = kind;
        Ok(assignment)
    }

    pub fn set_invoice_type(&mut self, kind: InvoiceType) {
        self.invoice_type = Some(kind);
    }

    /// E: document status.
    pub fn invoice_status(&self) -> Option<InvoiceStatus> {
        self.invoice_status
    }

    pub fn invoice_status_label(&self) -> &'static str {
        self.invoice_status.map_or(UNKNOWN_LABEL, |s| s.label())
    }

    pub fn try_set_invoice_status(&mut self, value: &str) -> Result<Assignment, ActudError> {
        let field = Field::InvoiceStatus;
        check_length(field, value)?;
        let outcome = InvoiceStatus::from_code(value)
            .map(Some)
            .map_err(|e| e.into_value_error(field));
        let (status, assignment) = self.settle(field, outcome, None)?;
        self.invoice_status = status;
        Ok(assignment)
    }

    pub fn set_invoice_status(&mut self, status: InvoiceStatus) {
        self.invoice_status = Some(status);
    }

    /// F: document date.
    pub fn invoice_date(&self) -> Option<InvoiceDate> {
        self.invoice_date
    }

    pub fn try_set_invoice_date(&mut self, value: &str) -> Result<Assignment, ActudError> {
        let field = Field::InvoiceDate;
        check_length(field, value)?;
        let outcome = InvoiceDate::from_digits(value)
            .map(Some)
            .ok_or_else(|| ActudError::value(field, format!("'{value}' is not a YYYYMMDD date")));
        let (date, assignment) = self.settle(field, outcome, None)?;
        self.invoice_date = date;
        Ok(assignment)
    }

    pub fn set_invoice_date(&mut self, date: impl Into<InvoiceDate>) {
        self.invoice_date = Some(date.into());
    }

    /// G: unique document identifier, up to 60 characters.
    pub fn invoice_no(&self) -> Option<&str> {
        self.invoice_no.as_deref()
    }

    pub fn try_set_invoice_no(&mut self, value: &str) -> Result<Assignment, ActudError> {
        check_length(Field::InvoiceNo, value)?;
        self.invoice_no = Some(value.to_owned());
        Ok(Assignment::Accepted)
    }

    /// H: ATCUD unique document code, up to 70 characters.
    pub fn actud(&self) -> Option<&str> {
        self.actud.as_deref()
    }

    pub fn try_set_actud(&mut self, value: &str) -> Result<Assignment, ActudError> {
        check_length(Field::Actud, value)?;
        self.actud = Some(value.to_owned());
        Ok(Assignment::Accepted)
    }

    /// I1: fiscal space. `None` means no rate table applies (`0`).
    pub fn tax_country_region(&self) -> Option<TaxRegion> {
        self.tax_country_region
    }

    pub fn tax_country_region_label(&self) -> &'static str {
        self.tax_country_region.map_or(UNKNOWN_LABEL, |r| r.name())
    }

    pub fn try_set_tax_country_region(&mut self, value: &str) -> Result<Assignment, ActudError> {
        let field = Field::TaxCountryRegion;
        check_length(field, value)?;
        if value == "0" {
            self.tax_country_region = None;
            return Ok(Assignment::Accepted);
        }
        let outcome = TaxRegion::resolve(value)
            .map(Some)
            .map_err(|e| e.into_value_error(field));
        let (region, assignment) = self.settle(field, outcome, None)?;
        self.tax_country_region = region;
        Ok(assignment)
    }

    pub fn set_tax_country_region(&mut self, region: Option<TaxRegion>) {
        self.tax_country_region = region;
    }

    // ── Amounts ─────────────────────────────────────────────────────────

    fn amount_slot(&mut self, field: Field) -> Option<&mut Option<Decimal>> {
        let slot = match field {
            Field::VatExemptTaxableBase => &mut self.vat_exempt_taxable_base,
            Field::Vat1Base => &mut self.vat1_base,
            Field::Vat1 => &mut self.vat1,
            Field::Vat2Base => &mut self.vat2_base,
            Field::Vat2 => &mut self.vat2,
            Field::Vat3Base => &mut self.vat3_base,
            Field::Vat3 => &mut self.vat3,
            Field::NotTaxable => &mut self.not_taxable,
            Field::StampTax => &mut self.stamp_tax,
            Field::TaxPayable => &mut self.tax_payable,
            Field::GrossTotal => &mut self.gross_total,
            Field::WithholdingTaxAmount => &mut self.withholding_tax_amount,
            _ => return None,
        };
        Some(slot)
    }

    /// The stored amount of an amount field; `None` when never set or when
    /// `field` is not an amount.
    pub fn amount(&self, field: Field) -> Option<Decimal> {
        match field {
            Field::VatExemptTaxableBase => self.vat_exempt_taxable_base,
            Field::Vat1Base => self.vat1_base,
            Field::Vat1 => self.vat1,
            Field::Vat2Base => self.vat2_base,
            Field::Vat2 => self.vat2,
            Field::Vat3Base => self.vat3_base,
            Field::Vat3 => self.vat3,
            Field::NotTaxable => self.not_taxable,
            Field::StampTax => self.stamp_tax,
            Field::TaxPayable => self.tax_payable,
            Field::GrossTotal => self.gross_total,
            Field::WithholdingTaxAmount => self.withholding_tax_amount,
            _ => None,
        }
    }

    /// Parse and store an amount given as wire text.
    pub fn try_set_amount(&mut self, field: Field, value: &str) -> Result<Assignment, ActudError> {
        if !field.is_amount() {
            return Err(ActudError::value(field, "not an amount field"));
        }
        let outcome = parse_amount(field, value).map(Some);
        let (amount, assignment) = self.settle(field, outcome, None)?;
        if let Some(amount) = amount {
            check_non_negative(field, amount)?;
        }
        if let Some(slot) = self.amount_slot(field) {
            *slot = amount;
        }
        Ok(assignment)
    }

    /// Store an amount. Negative values are rejected.
    pub fn set_amount(&mut self, field: Field, amount: Decimal) -> Result<(), ActudError> {
        check_non_negative(field, amount)?;
        let slot = self
            .amount_slot(field)
            .ok_or_else(|| ActudError::value(field, "not an amount field"))?;
        *slot = Some(amount);
        Ok(())
    }

    /// I2
    pub fn vat_exempt_taxable_base(&self) -> Decimal {
        self.vat_exempt_taxable_base.unwrap_or_default()
    }

    pub fn try_set_vat_exempt_taxable_base(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::VatExemptTaxableBase, value)
    }

    /// I3
    pub fn vat1_base(&self) -> Decimal {
        self.vat1_base.unwrap_or_default()
    }

    pub fn try_set_vat1_base(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::Vat1Base, value)
    }

    /// I4
    pub fn vat1(&self) -> Decimal {
        self.vat1.unwrap_or_default()
    }

    pub fn try_set_vat1(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::Vat1, value)
    }

    /// I5
    pub fn vat2_base(&self) -> Decimal {
        self.vat2_base.unwrap_or_default()
    }

    pub fn try_set_vat2_base(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::Vat2Base, value)
    }

    /// I6
    pub fn vat2(&self) -> Decimal {
        self.vat2.unwrap_or_default()
    }

    pub fn try_set_vat2(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::Vat2, value)
    }

    /// I7
    pub fn vat3_base(&self) -> Decimal {
        self.vat3_base.unwrap_or_default()
    }

    pub fn try_set_vat3_base(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::Vat3Base, value)
    }

    /// I8
    pub fn vat3(&self) -> Decimal {
        self.vat3.unwrap_or_default()
    }

    pub fn try_set_vat3(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::Vat3, value)
    }

    /// L
    pub fn not_taxable(&self) -> Decimal {
        self.not_taxable.unwrap_or_default()
    }

    pub fn try_set_not_taxable(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::NotTaxable, value)
    }

    /// M
    pub fn stamp_tax(&self) -> Decimal {
        self.stamp_tax.unwrap_or_default()
    }

    pub fn try_set_stamp_tax(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::StampTax, value)
    }

    /// N: total tax.
    pub fn tax_payable(&self) -> Decimal {
        self.tax_payable.unwrap_or_default()
    }

    pub fn try_set_tax_payable(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::TaxPayable, value)
    }

    /// O: document total including taxes.
    pub fn gross_total(&self) -> Decimal {
        self.gross_total.unwrap_or_default()
    }

    pub fn try_set_gross_total(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::GrossTotal, value)
    }

    /// P
    pub fn withholding_tax_amount(&self) -> Decimal {
        self.withholding_tax_amount.unwrap_or_default()
    }

    pub fn try_set_withholding_tax_amount(&mut self, value: &str) -> Result<Assignment, ActudError> {
        self.try_set_amount(Field::WithholdingTaxAmount, value)
    }

    // ── Trailer ─────────────────────────────────────────────────────────

    /// Q: four characters of the document signature.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    pub fn try_set_hash(&mut self, value: &str) -> Result<Assignment, ActudError> {
        check_length(Field::Hash, value)?;
        self.hash = non_empty(value);
        Ok(Assignment::Accepted)
    }

    /// R: certificate number of the invoicing software.
    pub fn certificate_number(&self) -> Option<&str> {
        self.certificate_number.as_deref()
    }

    pub fn try_set_certificate_number(&mut self, value: &str) -> Result<Assignment, ActudError> {
        check_length(Field::CertificateNumber, value)?;
        self.certificate_number = non_empty(value);
        Ok(Assignment::Accepted)
    }

    /// S: free text.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn try_set_comment(&mut self, value: &str) -> Result<Assignment, ActudError> {
        check_length(Field::Comment, value)?;
        self.comment = non_empty(value);
        Ok(Assignment::Accepted)
    }

    // ── Serialization ───────────────────────────────────────────────────

    /// Wire text of a field in its current state.
    pub fn wire_value(&self, field: Field) -> String {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        match field {
            Field::SellerVatNumber => text(&self.seller_vat_number),
            Field::BuyerVatNumber => text(&self.buyer_vat_number),
            Field::BuyerCountry => self
                .buyer_country
                .map_or(UNKNOWN_COUNTRY, |c| c.code)
                .to_owned(),
            Field::InvoiceType => self.invoice_type.map(|t| t.code()).unwrap_or_default().to_owned(),
            Field::InvoiceStatus => self
                .invoice_status
                .map(|s| s.code())
                .unwrap_or_default()
                .to_owned(),
            Field::InvoiceDate => self
                .invoice_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
            Field::InvoiceNo => text(&self.invoice_no),
            Field::Actud => text(&self.actud),
            Field::TaxCountryRegion => self
                .tax_country_region
                .map_or("0", |r| r.code())
                .to_owned(),
            Field::Hash => text(&self.hash),
            Field::CertificateNumber => text(&self.certificate_number),
            Field::Comment => text(&self.comment),
            amount => format_amount(self.amount(amount).unwrap_or_default()),
        }
    }

    /// Whether an optional field carries something worth emitting: an
    /// amount that is non-zero once rounded to cents, or non-empty text.
    fn is_set(&self, field: Field) -> bool {
        if field.is_amount() {
            return self
                .amount(field)
                .is_some_and(|a| !round_amount(a).is_zero());
        }
        !self.wire_value(field).is_empty()
    }
}

/// Canonical ATCUD text: fixed key order, amounts with two decimals,
/// optional fields only when set.
impl fmt::Display for RecordBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for spec in FIELD_SPECS {
            if spec.emission == Emission::WhenSet && !self.is_set(spec.field) {
                continue;
            }
            if !first {
                f.write_char('*')?;
            }
            write!(f, "{}:{}", spec.key, self.wire_value(spec.field))?;
            first = false;
        }
        Ok(())
    }
}

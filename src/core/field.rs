//! Field identities and the key tables of the ATCUD grammar.
//!
//! Every key of the QR payload (`A`, `B`, ..., `I1`..`I8`, ..., `S`) maps to
//! exactly one [`Field`]. [`FIELD_SPECS`] lists them in canonical emission
//! order; the required and optional key tables are views over it.

use std::fmt;

use serde::{Serialize, Serializer};

use Emission::{Always, WhenSet};
use Presence::{Optional, Required};

/// One field of the ATCUD record body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// A: NIF do Emitente.
    SellerVatNumber,
    /// B: NIF do Adquirente.
    BuyerVatNumber,
    /// C: País do Adquirente.
    BuyerCountry,
    /// D: Tipo de Documento.
    InvoiceType,
    /// E: Estado do Documento.
    InvoiceStatus,
    /// F: Data do Documento (YYYYMMDD).
    InvoiceDate,
    /// G: Identificação única do Documento.
    InvoiceNo,
    /// H: ATCUD.
    Actud,
    /// I1: Espaço Fiscal.
    TaxCountryRegion,
    /// I2: Base tributável isenta de IVA.
    VatExemptTaxableBase,
    /// I3: Base tributável à taxa reduzida.
    Vat1Base,
    /// I4: Total de IVA à taxa reduzida.
    Vat1,
    /// I5: Base tributável à taxa intermédia.
    Vat2Base,
    /// I6: Total de IVA à taxa intermédia.
    Vat2,
    /// I7: Base tributável à taxa normal.
    Vat3Base,
    /// I8: Total de IVA à taxa normal.
    Vat3,
    /// L: Não sujeito / não tributável em IVA.
    NotTaxable,
    /// M: Imposto do Selo.
    StampTax,
    /// N: Total de impostos.
    TaxPayable,
    /// O: Total do documento com impostos.
    GrossTotal,
    /// P: Retenções na fonte.
    WithholdingTaxAmount,
    /// Q: 4 caracteres do Hash.
    Hash,
    /// R: Número do certificado.
    CertificateNumber,
    /// S: Outras informações.
    Comment,
}

impl Field {
    /// Field name as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SellerVatNumber => "SellerVatNumber",
            Self::BuyerVatNumber => "BuyerVatNumber",
            Self::BuyerCountry => "BuyerCountry",
            Self::InvoiceType => "InvoiceType",
            Self::InvoiceStatus => "InvoiceStatus",
            Self::InvoiceDate => "InvoiceDate",
            Self::InvoiceNo => "InvoiceNo",
            Self::Actud => "ACTUD",
            Self::TaxCountryRegion => "TaxCountryRegion",
            Self::VatExemptTaxableBase => "VatExemptTaxableBase",
            Self::Vat1Base => "Vat1Base",
            Self::Vat1 => "Vat1",
            Self::Vat2Base => "Vat2Base",
            Self::Vat2 => "Vat2",
            Self::Vat3Base => "Vat3Base",
            Self::Vat3 => "Vat3",
            Self::NotTaxable => "NotTaxable",
            Self::StampTax => "StampTax",
            Self::TaxPayable => "TaxPayable",
            Self::GrossTotal => "GrossTotal",
            Self::WithholdingTaxAmount => "WithholdingTaxAmount",
            Self::Hash => "Hash",
            Self::CertificateNumber => "CertificateNumber",
            Self::Comment => "Comment",
        }
    }

    /// Wire key of this field.
    pub fn key(&self) -> &'static str {
        match self {
            Self::SellerVatNumber => "A",
            Self::BuyerVatNumber => "B",
            Self::BuyerCountry => "C",
            Self::InvoiceType => "D",
            Self::InvoiceStatus => "E",
            Self::InvoiceDate => "F",
            Self::InvoiceNo => "G",
            Self::Actud => "H",
            Self::TaxCountryRegion => "I1",
            Self::VatExemptTaxableBase => "I2",
            Self::Vat1Base => "I3",
            Self::Vat1 => "I4",
            Self::Vat2Base => "I5",
            Self::Vat2 => "I6",
            Self::Vat3Base => "I7",
            Self::Vat3 => "I8",
            Self::NotTaxable => "L",
            Self::StampTax => "M",
            Self::TaxPayable => "N",
            Self::GrossTotal => "O",
            Self::WithholdingTaxAmount => "P",
            Self::Hash => "Q",
            Self::CertificateNumber => "R",
            Self::Comment => "S",
        }
    }

    /// Look up the field for a wire key.
    pub fn from_key(key: &str) -> Option<Self> {
        FIELD_SPECS
            .iter()
            .find(|spec| spec.key == key)
            .map(|spec| spec.field)
    }

    /// Inclusive `(min, max)` character length, or `None` for amounts,
    /// which are bounded by their numeric rules instead.
    ///
    /// `BuyerCountry` reports the bounds of an ISO code; the literal
    /// `Desconhecido` is accepted before this check applies.
    pub fn length_bounds(&self) -> Option<(usize, usize)> {
        match self {
            Self::SellerVatNumber => Some((9, 9)),
            Self::BuyerVatNumber => Some((0, 30)),
            Self::BuyerCountry => Some((2, 2)),
            Self::InvoiceType => Some((2, 2)),
            Self::InvoiceStatus => Some((1, 1)),
            Self::InvoiceDate => Some((8, 8)),
            Self::InvoiceNo => Some((0, 60)),
            Self::Actud => Some((0, 70)),
            Self::TaxCountryRegion => Some((1, 5)),
            Self::Hash | Self::CertificateNumber => Some((0, 4)),
            Self::Comment => Some((0, 65)),
            _ => None,
        }
    }

    /// Whether this field holds a monetary amount.
    pub fn is_amount(&self) -> bool {
        matches!(
            self,
            Self::VatExemptTaxableBase
                | Self::Vat1Base
                | Self::Vat1
                | Self::Vat2Base
                | Self::Vat2
                | Self::Vat3Base
                | Self::Vat3
                | Self::NotTaxable
                | Self::StampTax
                | Self::TaxPayable
                | Self::GrossTotal
                | Self::WithholdingTaxAmount
        )
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Whether a key must be present for the record to be valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// When a field is written back during regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Always written, empty when unset.
    Always,
    /// Written only when the value is non-zero / non-empty.
    WhenSet,
}

/// Table entry binding a wire key to its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub field: Field,
    pub presence: Presence,
    pub emission: Emission,
}

const fn spec(key: &'static str, field: Field, presence: Presence, emission: Emission) -> FieldSpec {
    FieldSpec {
        key,
        field,
        presence,
        emission,
    }
}

/// All keys in canonical emission order.
pub static FIELD_SPECS: &[FieldSpec] = &[
    spec("A", Field::SellerVatNumber, Required, Always),
    spec("B", Field::BuyerVatNumber, Required, Always),
    spec("C", Field::BuyerCountry, Required, Always),
    spec("D", Field::InvoiceType, Required, Always),
    spec("E", Field::InvoiceStatus, Required, Always),
    spec("F", Field::InvoiceDate, Required, Always),
    spec("G", Field::InvoiceNo, Required, Always),
    spec("H", Field::Actud, Required, Always),
    spec("I1", Field::TaxCountryRegion, Required, Always),
    spec("I2", Field::VatExemptTaxableBase, Optional, WhenSet),
    spec("I3", Field::Vat1Base, Optional, WhenSet),
    spec("I4", Field::Vat1, Optional, WhenSet),
    spec("I5", Field::Vat2Base, Optional, WhenSet),
    spec("I6", Field::Vat2, Optional, WhenSet),
    spec("I7", Field::Vat3Base, Optional, WhenSet),
    spec("I8", Field::Vat3, Optional, WhenSet),
    spec("L", Field::NotTaxable, Optional, WhenSet),
    spec("M", Field::StampTax, Optional, WhenSet),
    spec("N", Field::TaxPayable, Required, Always),
    spec("O", Field::GrossTotal, Required, Always),
    spec("P", Field::WithholdingTaxAmount, Optional, WhenSet),
    spec("Q", Field::Hash, Optional, Always),
    spec("R", Field::CertificateNumber, Optional, Always),
    spec("S", Field::Comment, Optional, WhenSet),
];

/// Required keys in declaration order.
pub fn required_specs() -> impl Iterator<Item = &'static FieldSpec> {
    FIELD_SPECS.iter().filter(|s| s.presence == Required)
}

/// Optional keys in declaration order.
pub fn optional_specs() -> impl Iterator<Item = &'static FieldSpec> {
    FIELD_SPECS.iter().filter(|s| s.presence == Optional)
}

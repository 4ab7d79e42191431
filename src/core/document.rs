//! SAF-T(PT) document type (D) and document status (E) codes.

use std::fmt;

use serde::{Serialize, Serializer};

use super::error::EnumerationError;

/// Label shown when a record carries no recognised code.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// SAF-T(PT) document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceType {
    /// FT: Fatura.
    Invoice,
    /// FR: Fatura-Recibo.
    InvoiceReceipt,
    /// FS: Fatura Simplificada.
    SimplifiedInvoice,
    /// NC: Nota de Crédito.
    CreditNote,
    /// ND: Nota de Débito.
    DebitNote,
    // Transport documents
    /// GR: Guia de Remessa.
    DeliveryNote,
    /// GT: Guia de Transporte.
    TransportGuide,
    /// GA: Guia de Movimentação de Ativos Próprios.
    OwnAssetsGuide,
    /// GC: Guia de Consignação.
    ConsignmentGuide,
    /// GD: Guia ou Nota de Devolução.
    ReturnGuide,
    // Conference documents
    /// CM: Consulta de Mesa.
    TableConsultation,
    /// FC: Fatura de Consignação.
    ConsignmentInvoice,
    /// CC: Crédito de Correção.
    CorrectionCredit,
    /// FO: Folha de Obra.
    WorkSheet,
    /// OR: Orçamento.
    Quote,
    /// PF: Pró-forma.
    ProForma,
    /// NE: Nota de Encomenda.
    PurchaseOrder,
    /// OU: Outros.
    Other,
    // Receipts
    /// RC: Recibo no âmbito do regime de IVA de Caixa.
    CashVatReceipt,
    /// RG: Outros recibos.
    GeneralReceipt,
    // Insurance
    /// RP: Prémio ou recibo de prémio.
    Premium,
    /// RE: Estorno ou recibo de estorno.
    Reversal,
    /// CS: Imputação a co-seguradoras.
    CoinsurerImputation,
    /// LD: Imputação a co-seguradora líder.
    LeadCoinsurerImputation,
    /// RA: Resseguro aceite.
    AcceptedReinsurance,
}

impl InvoiceType {
    /// Every member, in SAF-T table order.
    pub const ALL: [Self; 25] = [
        Self::Invoice,
        Self::InvoiceReceipt,
        Self::SimplifiedInvoice,
        Self::CreditNote,
        Self::DebitNote,
        Self::DeliveryNote,
        Self::TransportGuide,
        Self::OwnAssetsGuide,
        Self::ConsignmentGuide,
        Self::ReturnGuide,
        Self::TableConsultation,
        Self::ConsignmentInvoice,
        Self::CorrectionCredit,
        Self::WorkSheet,
        Self::Quote,
        Self::ProForma,
        Self::PurchaseOrder,
        Self::Other,
        Self::CashVatReceipt,
        Self::GeneralReceipt,
        Self::Premium,
        Self::Reversal,
        Self::CoinsurerImputation,
        Self::LeadCoinsurerImputation,
        Self::AcceptedReinsurance,
    ];

    /// Two-letter SAF-T code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Invoice => "FT",
            Self::InvoiceReceipt => "FR",
            Self::SimplifiedInvoice => "FS",
            Self::CreditNote => "NC",
            Self::DebitNote => "ND",
            Self::DeliveryNote => "GR",
            Self::TransportGuide => "GT",
            Self::OwnAssetsGuide => "GA",
            Self::ConsignmentGuide => "GC",
            Self::ReturnGuide => "GD",
            Self::TableConsultation => "CM",
            Self::ConsignmentInvoice => "FC",
            Self::CorrectionCredit => "CC",
            Self::WorkSheet => "FO",
            Self::Quote => "OR",
            Self::ProForma => "PF",
            Self::PurchaseOrder => "NE",
            Self::Other => "OU",
            Self::CashVatReceipt => "RC",
            Self::GeneralReceipt => "RG",
            Self::Premium => "RP",
            Self::Reversal => "RE",
            Self::CoinsurerImputation => "CS",
            Self::LeadCoinsurerImputation => "LD",
            Self::AcceptedReinsurance => "RA",
        }
    }

    /// Portuguese label as printed on documents.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Invoice => "Fatura",
            Self::InvoiceReceipt => "Fatura-Recibo",
            Self::SimplifiedInvoice => "Fatura Simplificada",
            Self::CreditNote => "Nota de Crédito",
            Self::DebitNote => "Nota de Débito",
            Self::DeliveryNote => "Guia de Remessa",
            Self::TransportGuide => "Guia de Transporte",
            Self::OwnAssetsGuide => "Guia de Movimentação de Ativos Próprios",
            Self::ConsignmentGuide => "Guia de Consignação",
            Self::ReturnGuide => "Guia ou Nota de Devolução Efetuada pelo Cliente",
            Self::TableConsultation => "Consulta de Mesa",
            Self::ConsignmentInvoice => "Fatura de Consignação",
            Self::CorrectionCredit => "Crédito de Correção",
            Self::WorkSheet => "Folha de Obra",
            Self::Quote => "Orçamento",
            Self::ProForma => "Pró-forma",
            Self::PurchaseOrder => "Nota de Encomenda",
            Self::Other => "Outros",
            Self::CashVatReceipt => "Recibo - Regime de IVA de Caixa",
            Self::GeneralReceipt => "Recibo Geral",
            Self::Premium => "Prémio ou Recibo de Prémio",
            Self::Reversal => "Estorno ou Recibo de Estorno",
            Self::CoinsurerImputation => "Imputação a Cosseguradoras",
            Self::LeadCoinsurerImputation => "Imputação a Cosseguradora Líder",
            Self::AcceptedReinsurance => "Resseguro Aceite",
        }
    }

    /// Parse from the two-letter code (case-sensitive).
    pub fn from_code(code: &str) -> Result<Self, EnumerationError> {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .ok_or_else(|| EnumerationError {
                kind: "document type code",
                value: code.into(),
            })
    }

    /// Parse from the printed label.
    pub fn from_label(label: &str) -> Result<Self, EnumerationError> {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == label)
            .ok_or_else(|| EnumerationError {
                kind: "document type label",
                value: label.into(),
            })
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for InvoiceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// SAF-T(PT) document status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceStatus {
    /// N: Normal.
    Normal,
    /// S: Autofaturação (self-billed).
    SelfBilled,
    /// A: Documento anulado (cancelled).
    Cancelled,
    /// R: Documento de resumo doutros documentos (summary of other documents).
    Summary,
    /// F: Documento faturado (invoiced).
    Invoiced,
}

impl InvoiceStatus {
    pub const ALL: [Self; 5] = [
        Self::Normal,
        Self::SelfBilled,
        Self::Cancelled,
        Self::Summary,
        Self::Invoiced,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Self::Normal => "N",
            Self::SelfBilled => "S",
            Self::Cancelled => "A",
            Self::Summary => "R",
            Self::Invoiced => "F",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::SelfBilled => "Autofaturação",
            Self::Cancelled => "Documento anulado",
            Self::Summary => {
                "Documento de resumo doutros documentos criados noutras aplicações e gerado nesta aplicação"
            }
            Self::Invoiced => "Documento faturado",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, EnumerationError> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| EnumerationError {
                kind: "document status code",
                value: code.into(),
            })
    }

    pub fn from_label(label: &str) -> Result<Self, EnumerationError> {
        Self::ALL
            .into_iter()
            .find(|s| s.label() == label)
            .ok_or_else(|| EnumerationError {
                kind: "document status label",
                value: label.into(),
            })
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for InvoiceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

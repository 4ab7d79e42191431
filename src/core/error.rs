use thiserror::Error;

use super::field::Field;

/// Errors raised while assigning fields or parsing a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ActudError {
    /// Value length outside the field's bounds. Never suppressed.
    #[error("{field} can only accept values between {min} and {max} characters long (got {observed})")]
    Length {
        field: Field,
        observed: usize,
        min: usize,
        max: usize,
    },

    /// Semantically invalid value (negative amount, unknown code, ...).
    #[error("{field} is not valid: {reason}")]
    Value { field: Field, reason: String },

    /// Check digit mismatch (NIF).
    #[error("{field} does not respect the required format: check digit mismatch")]
    Checksum { field: Field },

    /// One or more required keys absent from the input.
    #[error(
        "not a valid ATCUD record, missing required keys: {}",
        .missing.join(", ")
    )]
    MissingFields {
        /// Absent required keys, in declaration order.
        missing: Vec<&'static str>,
        /// Keys found in the input, in first-seen order.
        received: Vec<String>,
    },
}

impl ActudError {
    pub(crate) fn value(field: Field, reason: impl Into<String>) -> Self {
        Self::Value {
            field,
            reason: reason.into(),
        }
    }

    /// The field the error refers to, if it concerns a single field.
    pub fn field(&self) -> Option<Field> {
        match self {
            Self::Length { field, .. } | Self::Value { field, .. } | Self::Checksum { field } => {
                Some(*field)
            }
            Self::MissingFields { .. } => None,
        }
    }

    /// True for `Value` and its `Checksum` specialization.
    pub fn is_value_error(&self) -> bool {
        matches!(self, Self::Value { .. } | Self::Checksum { .. })
    }

    /// Whether `ignore_errors` may turn this kind of failure into a sentinel.
    ///
    /// Length violations never are. Negative amounts are reported as
    /// `Value` but are rejected before suppression is considered.
    pub fn is_suppressible(&self) -> bool {
        !matches!(self, Self::Length { .. })
    }
}

/// Unknown ISO 3166-1 alpha-2 code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown country code '{code}'")]
pub struct LookupError {
    pub code: String,
}

/// Code or label outside a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct EnumerationError {
    /// What was being looked up, e.g. "document type code".
    pub kind: &'static str,
    pub value: String,
}

impl LookupError {
    pub(crate) fn into_value_error(self, field: Field) -> ActudError {
        ActudError::value(field, self.to_string())
    }
}

impl EnumerationError {
    pub(crate) fn into_value_error(self, field: Field) -> ActudError {
        ActudError::value(field, self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_message() {
        let err = ActudError::Length {
            field: Field::SellerVatNumber,
            observed: 10,
            min: 9,
            max: 9,
        };
        assert_eq!(
            err.to_string(),
            "SellerVatNumber can only accept values between 9 and 9 characters long (got 10)"
        );
        assert!(!err.is_suppressible());
        assert!(!err.is_value_error());
    }

    #[test]
    fn checksum_is_a_value_error() {
        let err = ActudError::Checksum {
            field: Field::SellerVatNumber,
        };
        assert!(err.is_value_error());
        assert!(err.is_suppressible());
        assert_eq!(err.field(), Some(Field::SellerVatNumber));
    }

    #[test]
    fn missing_fields_message() {
        let err = ActudError::MissingFields {
            missing: vec!["A", "I1"],
            received: vec!["B".into()],
        };
        assert_eq!(
            err.to_string(),
            "not a valid ATCUD record, missing required keys: A, I1"
        );
        assert_eq!(err.field(), None);
    }

    #[test]
    fn lookup_surfaces_as_value_error() {
        let err = LookupError { code: "ZY".into() }.into_value_error(Field::BuyerCountry);
        assert_eq!(err.to_string(), "BuyerCountry is not valid: unknown country code 'ZY'");
    }
}

//! ATCUD record envelope: tokenizing, populating the body, regenerating.

use std::collections::HashMap;
use std::str::FromStr;

use serde::Serialize;

use super::body::{Assignment, RecordBody};
use super::error::ActudError;
use super::field::{self, FieldSpec};
use super::options::ParseOptions;

/// Separator between `KEY:VALUE` segments.
pub const FIELD_SEPARATOR: char = '*';
/// Separator between a key and its value.
pub const KEY_SEPARATOR: char = ':';

/// One `KEY:VALUE` segment of the raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Split raw input into tokens, in input order.
///
/// Each segment is split once, on its first `:`; the value keeps any
/// further `:` characters. Segments without a `:` carry no value and are
/// skipped.
pub fn tokenize(raw: &str) -> Vec<RawToken<'_>> {
    raw.split(FIELD_SEPARATOR)
        .filter_map(|segment| match segment.split_once(KEY_SEPARATOR) {
            Some((key, value)) => Some(RawToken { key, value }),
            None => {
                if !segment.is_empty() {
                    tracing::debug!(segment, "skipping segment without key separator");
                }
                None
            }
        })
        .collect()
}

/// A parsed ATCUD record.
///
/// Holds the original input, the validated [`RecordBody`], and whether
/// every required key was present and accepted. The body may be mutated
/// after parsing; [`regenerate`](Self::regenerate) then rebuilds the
/// canonical text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    body: RecordBody,
    raw_input: String,
    is_valid: bool,
    regenerated_input: Option<String>,
    #[serde(skip)]
    suppressed: Vec<ActudError>,
}

impl Record {
    /// Parse a raw ATCUD line.
    ///
    /// In strict mode the first invalid field aborts parsing, and absent
    /// required keys yield [`ActudError::MissingFields`]. With
    /// `ignore_errors` both become sentinels and `is_valid() == false`;
    /// length violations still abort.
    pub fn parse(raw: &str, options: ParseOptions) -> Result<Self, ActudError> {
        let tokens = tokenize(raw);

        let mut values: HashMap<&str, &str> = HashMap::with_capacity(tokens.len());
        let mut received: Vec<String> = Vec::with_capacity(tokens.len());
        for token in &tokens {
            if values.insert(token.key, token.value).is_some() {
                tracing::debug!(key = token.key, "duplicate key, keeping last value");
            } else {
                received.push(token.key.to_owned());
            }
        }

        let mut body = RecordBody::new(options);
        let mut suppressed = Vec::new();
        let mut missing = Vec::new();
        let mut required_rejected = false;

        for spec in field::required_specs() {
            match values.get(spec.key) {
                Some(value) => {
                    if let Some(err) = assign(&mut body, spec, value)? {
                        required_rejected = true;
                        suppressed.push(err);
                    }
                }
                None => missing.push(spec.key),
            }
        }

        for spec in field::optional_specs() {
            if let Some(value) = values.get(spec.key) {
                if let Some(err) = assign(&mut body, spec, value)? {
                    suppressed.push(err);
                }
            }
        }

        let is_valid = missing.is_empty() && !required_rejected;
        if !missing.is_empty() {
            let err = ActudError::MissingFields { missing, received };
            if !options.ignore_errors {
                return Err(err);
            }
            tracing::warn!(error = %err, "record marked invalid");
            suppressed.push(err);
        } else if required_rejected {
            tracing::warn!("record marked invalid: required field replaced by sentinel");
        }

        Ok(Self {
            body,
            raw_input: raw.to_owned(),
            is_valid,
            regenerated_input: None,
            suppressed,
        })
    }

    pub fn body(&self) -> &RecordBody {
        &self.body
    }

    /// Mutable access for editing fields before [`regenerate`](Self::regenerate).
    pub fn body_mut(&mut self) -> &mut RecordBody {
        &mut self.body
    }

    /// True iff every required key was present and accepted as-is.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// The input this record was parsed from.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    /// The text produced by the last [`regenerate`](Self::regenerate) call.
    pub fn regenerated_input(&self) -> Option<&str> {
        self.regenerated_input.as_deref()
    }

    /// Failures that `ignore_errors` turned into sentinels, in the order
    /// they occurred.
    pub fn suppressed_errors(&self) -> &[ActudError] {
        &self.suppressed
    }

    /// Rebuild the canonical text from the current body and cache it.
    pub fn regenerate(&mut self) -> &str {
        self.regenerated_input.insert(self.body.to_string())
    }
}

fn assign(
    body: &mut RecordBody,
    spec: &FieldSpec,
    value: &str,
) -> Result<Option<ActudError>, ActudError> {
    match body.try_set(spec.field, value)? {
        Assignment::Accepted => Ok(None),
        Assignment::Substituted(err) => Ok(Some(err)),
    }
}

impl FromStr for Record {
    type Err = ActudError;

    /// Strict parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, ParseOptions::strict())
    }
}

/// Parse with default (strict) options.
pub fn parse(raw: &str) -> Result<Record, ActudError> {
    raw.parse()
}

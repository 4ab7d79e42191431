use serde::{Deserialize, Serialize};

/// Options threaded into every [`RecordBody`](super::RecordBody).
///
/// `ignore_errors` suppresses semantic failures (bad check digit, unknown
/// code or country, missing required keys) so that untrusted input still
/// yields a usable record. Length violations and negative amounts are
/// always rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    pub ignore_errors: bool,
}

impl ParseOptions {
    /// Reject every invalid value (the default).
    pub fn strict() -> Self {
        Self::default()
    }

    /// Substitute sentinels for suppressible failures.
    pub fn lenient() -> Self {
        Self {
            ignore_errors: true,
        }
    }

    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = ignore;
        self
    }
}

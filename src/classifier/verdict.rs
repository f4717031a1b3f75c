//! Classification verdicts.

use serde::{Serialize, Serializer};
use std::fmt;
use utoipa::ToSchema;

/// Why a URL received its verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictReason {
    /// Input was missing or empty.
    NoUrl,
    /// An unsafe rule matched.
    SuspiciousPattern,
    /// No rule matched but the scheme is not `https://`.
    NotHttps,
    /// Nothing suspicious found.
    Clean,
}

impl VerdictReason {
    /// Human-readable message sent to clients.
    pub fn message(self) -> &'static str {
        match self {
            VerdictReason::NoUrl => "No URL provided",
            VerdictReason::SuspiciousPattern => "Suspicious domain or pattern",
            VerdictReason::NotHttps => "Link is not using HTTPS",
            VerdictReason::Clean => "No suspicious patterns found",
        }
    }
}

impl fmt::Display for VerdictReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for VerdictReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Safety verdict for a single URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Verdict {
    /// Whether the link looks safe.
    pub safe: bool,
    /// Why.
    #[schema(value_type = String, example = "No suspicious patterns found")]
    pub reason: VerdictReason,
}

impl Verdict {
    pub fn safe() -> Self {
        Self {
            safe: true,
            reason: VerdictReason::Clean,
        }
    }

    pub fn unsafe_because(reason: VerdictReason) -> Self {
        Self {
            safe: false,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_wire_format() {
        let json = serde_json::to_value(Verdict::unsafe_because(VerdictReason::NotHttps)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"safe": false, "reason": "Link is not using HTTPS"})
        );

        let json = serde_json::to_value(Verdict::safe()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"safe": true, "reason": "No suspicious patterns found"})
        );
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Participants who can pay for a shared expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Payer {
    Alice,
    Bob,
}

impl Payer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alice => "Alice",
            Self::Bob => "Bob",
        }
    }
}

/// Serde helpers for the ISO-8601 timestamps used on the wire.
///
/// Serialization always emits millisecond precision with a `Z` suffix
/// (`2024-05-01T00:00:00.000Z`); deserialization accepts any RFC 3339 value.
pub mod iso_date {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|date| date.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

pub mod expense {
    use super::*;

    /// A stored expense as returned by the service.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Expense {
        pub id: i64,
        #[serde(with = "crate::iso_date")]
        pub date: DateTime<Utc>,
        pub description: String,
        pub payer: Payer,
        pub amount: f64,
    }

    /// Request body for `POST /api/expenses`.
    ///
    /// `payer` and `date` are kept as raw strings so the server can report
    /// them as validation errors instead of rejecting the whole body.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub payer: String,
        /// ISO-8601 timestamp or a bare `YYYY-MM-DD` date.
        pub date: String,
        #[serde(default)]
        pub description: Option<String>,
        pub amount: f64,
    }

    /// Response body for `POST /api/expenses/reset`.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ExpensesReset {
        pub message: String,
        pub data: Vec<Expense>,
    }
}

pub mod error {
    use super::*;

    /// Machine-readable error codes carried in every error response.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ErrorCode {
        ValidationError,
        StorageError,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ErrorResponse {
        pub error: String,
        pub code: ErrorCode,
    }
}

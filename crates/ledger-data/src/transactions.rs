use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::categories::timestamp;

/// Direction of a transaction. Tokens other than `income`
/// and `outcome` are kept as they are.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    #[default]
    Income,
    Outcome,
    Other(String),
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Outcome => "outcome",
            TransactionType::Other(kind) => kind,
        }
    }

    /// True for `income` and `outcome`
    pub fn is_known(&self) -> bool {
        !matches!(self, TransactionType::Other(_))
    }
}

impl From<&str> for TransactionType {
    fn from(kind: &str) -> Self {
        match kind {
            "income" => TransactionType::Income,
            "outcome" => TransactionType::Outcome,
            other => TransactionType::Other(other.to_string()),
        }
    }
}

impl From<String> for TransactionType {
    fn from(kind: String) -> Self {
        kind.as_str().into()
    }
}

impl From<TransactionType> for String {
    fn from(kind: TransactionType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub id: Option<String>,
    pub category_id: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub title: String,
    pub value: f64,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    /// Create a new, not yet persisted transaction
    pub fn new(
        title: &str,
        value: f64,
        kind: TransactionType,
        category_id: Option<String>,
    ) -> Self {
        let now = timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            value,
            kind,
            category_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_from_str() {
        assert_eq!(TransactionType::from("income"), TransactionType::Income);
        assert_eq!(TransactionType::from("outcome"), TransactionType::Outcome);
        assert_eq!(
            TransactionType::from("transfer"),
            TransactionType::Other("transfer".to_string())
        );
        assert!(!TransactionType::from("Income").is_known());
    }

    #[test]
    fn test_transaction_type_passthrough() {
        let kind = TransactionType::from("refund");
        assert_eq!(kind.to_string(), "refund");
        assert_eq!(String::from(kind), "refund");
    }

    #[test]
    fn test_transaction_serializes_type() {
        let tx = Transaction::new("Lunch", -20.0, TransactionType::Outcome, None);
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "outcome");
        assert_eq!(json["value"], -20.0);
        assert!(json["category_id"].is_null());
    }
}

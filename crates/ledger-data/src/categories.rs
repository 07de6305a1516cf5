use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::{Query, Transaction, TransactionFilter};

/// Current time as stored in the database (UTC, no offset).
pub(crate) fn timestamp() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub id: Option<String>,
    pub title: Option<String>,
    /// Match categories whose title is one of these
    pub titles: Option<Vec<String>>,
}

impl CategoryFilter {
    /// Filter for all categories with a title in `titles`
    pub fn titles(titles: &[String]) -> Self {
        Self {
            titles: Some(titles.to_vec()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Category {
    /// Create a new, not yet persisted category with
    /// a fresh id.
    pub fn new(title: &str) -> Self {
        let now = timestamp();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Get all transactions referencing this category
    pub async fn transactions<DB>(&self, db: &DB) -> Result<Vec<Transaction>>
    where
        DB: Query<Transaction, Filter = TransactionFilter> + Sync,
    {
        db.query(&TransactionFilter {
            category_id: Some(self.id.clone()),
            ..Default::default()
        })
        .await
    }
}

use std::collections::BTreeSet;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteConnection, Connection as SqlConnection, QueryBuilder, Sqlite};

use ledger_data::{Category, CategoryFilter, Delete, Insert, InsertAll, Query, Retrieve};

use crate::{Connection, QueryError};

/// Write a single category row
async fn insert_category(conn: &mut SqliteConnection, category: &Category) -> Result<()> {
    let mut qry = QueryBuilder::<Sqlite>::new(
        r#"INSERT INTO categories (
            id,
            title,
            created_at,
            updated_at
        ) VALUES (
        "#,
    );
    qry.separated(", ")
        .push_bind(&category.id)
        .push_bind(&category.title)
        .push_bind(category.created_at)
        .push_bind(category.updated_at);
    qry.push(")").build().execute(conn).await?;
    Ok(())
}

/// Titles bound per lookup query, well below the SQLite
/// limit of host parameters in one statement.
const TITLES_PER_QUERY: usize = 500;

/// Build a category query, restricted to `titles` if given
fn category_query<'q>(filter: &CategoryFilter, titles: Option<&[String]>) -> QueryBuilder<'q, Sqlite> {
    let mut qry = QueryBuilder::<Sqlite>::new(
        r#"
        SELECT
            id,
            title,
            created_at,
            updated_at
        FROM categories
        WHERE 1
        "#,
    );
    if let Some(id) = filter.id.clone() {
        qry.push(" AND id = ").push_bind(id);
    }
    if let Some(title) = filter.title.clone() {
        qry.push(" AND title = ").push_bind(title);
    }
    if let Some(titles) = titles {
        qry.push(" AND title IN (");
        let mut values = qry.separated(", ");
        for title in titles {
            values.push_bind(title.clone());
        }
        values.push_unseparated(")");
    }
    qry.push(" ORDER BY title, rowid");
    qry
}

#[async_trait]
impl Query<Category> for Connection {
    type Filter = CategoryFilter;

    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Category>> {
        // Title lists are deduplicated, sorted and looked up in
        // chunks; the chunk results are then already in title order.
        let titles: Option<Vec<String>> = filter.titles.as_ref().map(|titles| {
            let unique: BTreeSet<&String> = titles.iter().collect();
            unique.into_iter().cloned().collect()
        });
        let chunks: Vec<Option<&[String]>> = match &titles {
            Some(titles) if titles.is_empty() => return Ok(vec![]),
            Some(titles) => titles.chunks(TITLES_PER_QUERY).map(Some).collect(),
            None => vec![None],
        };

        let mut conn = self.lock().await;
        let mut categories: Vec<Category> = vec![];
        for chunk in chunks {
            let found: Vec<Category> = category_query(filter, chunk)
                .build_query_as()
                .fetch_all(&mut *conn)
                .await?;
            categories.extend(found);
        }
        Ok(categories)
    }
}

#[async_trait]
impl Retrieve<Category> for Connection {
    type Key = String;

    async fn retrieve(&self, id: Self::Key) -> Result<Category> {
        let filter = CategoryFilter {
            id: Some(id),
            ..Default::default()
        };
        let mut categories: Vec<Category> = self.query(&filter).await?;
        if categories.len() > 1 {
            return Err(QueryError::Ambiguous(categories.len()).into());
        }
        let category = categories.pop().ok_or(QueryError::NotFound)?;
        Ok(category)
    }
}

#[async_trait]
impl Insert<Category> for Connection {
    async fn insert(&self, category: Category) -> Result<Category> {
        {
            let mut conn = self.lock().await;
            insert_category(&mut conn, &category).await?;
        }
        self.retrieve(category.id).await
    }
}

#[async_trait]
impl InsertAll<Category> for Connection {
    async fn insert_all(&self, categories: Vec<Category>) -> Result<Vec<Category>> {
        if categories.is_empty() {
            return Ok(categories);
        }
        let mut conn = self.lock().await;
        let mut tx = conn.begin().await?;
        for category in &categories {
            insert_category(&mut tx, category).await?;
        }
        tx.commit().await?;
        Ok(categories)
    }
}

#[async_trait]
impl Delete<Category> for Connection {
    /// Delete category. Referencing transactions lose
    /// their category.
    async fn delete(&self, category: Category) -> Result<()> {
        let mut conn = self.lock().await;
        QueryBuilder::<Sqlite>::new("DELETE FROM categories WHERE id = ")
            .push_bind(category.id)
            .build()
            .execute(&mut *conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_category_insert() {
        let db = Connection::open_test().await;
        let category = Category::new("Groceries");
        let stored = db.insert(category.clone()).await.unwrap();

        assert_eq!(stored.id, category.id);
        assert_eq!(stored.title, "Groceries");
        assert_eq!(stored.created_at, category.created_at);
    }

    #[tokio::test]
    async fn test_category_retrieve_missing() {
        let db = Connection::open_test().await;
        let result: Result<Category> = db.retrieve("nope".to_string()).await;
        let err = result.unwrap_err();
        assert_eq!(err.downcast_ref::<QueryError>(), Some(&QueryError::NotFound));
    }

    #[tokio::test]
    async fn test_category_query_titles() {
        let db = Connection::open_test().await;
        db.insert_all(vec![
            Category::new("Work"),
            Category::new("Food"),
            Category::new("Rent"),
        ])
        .await
        .unwrap();

        let titles = vec!["Food".to_string(), "Work".to_string(), "Food".to_string()];
        let found: Vec<Category> = db.query(&CategoryFilter::titles(&titles)).await.unwrap();
        let found: Vec<&str> = found.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(found, vec!["Food", "Work"]);

        // Title matching is exact
        let titles = vec!["food".to_string()];
        let found: Vec<Category> = db.query(&CategoryFilter::titles(&titles)).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_category_query_empty_titles() {
        let db = Connection::open_test().await;
        db.insert(Category::new("Work")).await.unwrap();

        let found: Vec<Category> = db.query(&CategoryFilter::titles(&[])).await.unwrap();
        assert!(found.is_empty());

        let all: Vec<Category> = db.query(&CategoryFilter::default()).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_category_query_many_titles() {
        let db = Connection::open_test().await;
        db.insert_all(vec![Category::new("Food"), Category::new("Work")])
            .await
            .unwrap();

        // More titles than SQLite accepts parameters in one statement,
        // with duplicates spread over several chunks
        let mut titles: Vec<String> = (0..40_000).map(|i| format!("Title {}", i)).collect();
        titles.push("Work".to_string());
        titles.extend(std::iter::repeat("Food".to_string()).take(40_000));
        titles.push("Work".to_string());

        let found: Vec<Category> = db.query(&CategoryFilter::titles(&titles)).await.unwrap();
        let found: Vec<&str> = found.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(found, vec!["Food", "Work"]);
    }

    #[tokio::test]
    async fn test_category_insert_all_rolls_back() {
        let db = Connection::open_test().await;
        let existing = db.insert(Category::new("Work")).await.unwrap();

        // The second row collides with the primary key of an
        // existing one, so nothing of the batch may be stored.
        let result = db
            .insert_all(vec![Category::new("Food"), existing.clone()])
            .await;
        assert!(result.is_err());

        let all: Vec<Category> = db.query(&CategoryFilter::default()).await.unwrap();
        assert_eq!(all, vec![existing]);
    }

    #[tokio::test]
    async fn test_category_delete() {
        let db = Connection::open_test().await;
        let category = db.insert(Category::new("Travel")).await.unwrap();
        db.delete(category.clone()).await.unwrap();

        let result: Result<Category> = db.retrieve(category.id).await;
        assert!(result.is_err());
    }
}

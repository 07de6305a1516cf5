use anyhow::Result;
use tracing::info;

use ledger_data::{Category, CategoryFilter, Insert, Query};

/// Titles of referenced categories which do not exist yet,
/// in order of first appearance and without duplicates.
/// Empty titles never become categories.
pub fn missing_category_titles(referenced: &[String], existing: &[Category]) -> Vec<String> {
    let mut titles: Vec<String> = vec![];
    for title in referenced {
        if title.is_empty()
            || existing.iter().any(|category| &category.title == title)
            || titles.contains(title)
        {
            continue;
        }
        titles.push(title.clone());
    }
    titles
}

/// Lookup a category by its exact title and create
/// it if there is none.
pub async fn find_or_create_category<DB>(db: &DB, title: &str) -> Result<Category>
where
    DB: Query<Category, Filter = CategoryFilter> + Insert<Category> + Send + Sync,
{
    let categories: Vec<Category> = db
        .query(&CategoryFilter {
            title: Some(title.to_string()),
            ..Default::default()
        })
        .await?;
    if let Some(category) = categories.into_iter().next() {
        return Ok(category);
    }

    let category = db.insert(Category::new(title)).await?;
    info!(id = %category.id, title, "created category");
    Ok(category)
}

use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Query<T> {
    type Filter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<T>>;
}

#[async_trait]
pub trait Insert<T> {
    async fn insert(&self, item: T) -> Result<T>;
}

/// Persist a batch in a single write. Either every item
/// is stored or none is.
#[async_trait]
pub trait InsertAll<T> {
    async fn insert_all(&self, items: Vec<T>) -> Result<Vec<T>>;
}

#[async_trait]
pub trait Retrieve<T> {
    type Key;
    async fn retrieve(&self, key: Self::Key) -> Result<T>;
}

#[async_trait]
pub trait Delete<T> {
    async fn delete(&self, item: T) -> Result<()>;
}

use crate::domain::model::Row;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Anything that can hand back the full partner sheet as rows.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<Row>>;
}

/// Per-business record of the signage items a visitor picked.
#[async_trait]
pub trait SelectionStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<Vec<String>>>;
    async fn save(&self, key: &str, selected: &[String]) -> Result<()>;
}

#[async_trait]
impl<T: RowSource + ?Sized> RowSource for std::sync::Arc<T> {
    async fn fetch_rows(&self) -> Result<Vec<Row>> {
        (**self).fetch_rows().await
    }
}

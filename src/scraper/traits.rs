use crate::model::FetchError;

#[async_trait::async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Returns the body of the page at `address`.
    async fn fetch(&self, address: &str) -> Result<String, FetchError>;
}

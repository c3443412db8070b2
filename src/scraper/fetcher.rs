use crate::model::FetchError;
use crate::scraper::traits::DocumentFetcher;

use reqwest::Client;
use std::time::Duration;

pub struct HttpFetcher {
    pub client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) LunchHunt/0.1")
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, address: &str) -> Result<String, FetchError> {
        let http_error = |source| FetchError::Http {
            url: address.to_string(),
            source,
        };

        let response = self.client.get(address).send().await.map_err(http_error)?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: address.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(http_error)
    }
}

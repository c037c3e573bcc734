use crate::domain::model::TransportResponse;
use crate::domain::ports::HttpTransport;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("cute-pets/", env!("CARGO_PKG_VERSION"));

/// `HttpTransport` backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::with_client(Client::new())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<TransportResponse> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status().as_u16();
        tracing::debug!("Response status: {}", status);

        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

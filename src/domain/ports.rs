use crate::domain::model::{PetRecord, TransportResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Minimal HTTP capability the adapters depend on.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<TransportResponse>;
}

/// A single upstream pet source.
#[async_trait]
pub trait PetSource: Send + Sync {
    /// Human-readable name used in logs and errors.
    fn name(&self) -> &'static str;

    async fn fetch_one(&self) -> Result<PetRecord>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[async_trait]
impl<S: PetSource + ?Sized> PetSource for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_one(&self) -> Result<PetRecord> {
        (**self).fetch_one().await
    }
}

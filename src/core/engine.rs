use crate::core::{PetRecord, PetSource, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

pub const RECORD_FILENAME: &str = "pet.json";

/// Runs one fetch against a source and checks the record before handing it on.
pub struct PetEngine<S: PetSource> {
    source: S,
}

impl<S: PetSource> PetEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn run(&self) -> Result<PetRecord> {
        tracing::info!("Fetching one pet from {}", self.source.name());

        let record = self.source.fetch_one().await?;
        record.validate()?;

        tracing::debug!(?record, "Fetched pet record");
        Ok(record)
    }

    /// Fetch, then write the record as pretty JSON to `RECORD_FILENAME` in storage.
    pub async fn run_and_store<St: Storage>(&self, storage: &St) -> Result<PetRecord> {
        let record = self.run().await?;

        let json = serde_json::to_string_pretty(&record)?;
        storage.write_file(RECORD_FILENAME, json.as_bytes()).await?;
        tracing::info!("Pet record saved to {}", RECORD_FILENAME);

        Ok(record)
    }
}

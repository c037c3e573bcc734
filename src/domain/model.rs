use crate::utils::error::{PetError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One adoptable pet, normalized from whichever source produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetRecord {
    pub picture_url: Option<String>,
    pub detail_link: String,
    pub name: String,
    pub description: String,
}

impl Validate for PetRecord {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PetError::parse("record", "pet name is empty"));
        }
        if self.detail_link.trim().is_empty() {
            return Err(PetError::parse("record", "detail link is empty"));
        }
        Ok(())
    }
}

impl fmt::Display for PetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        if let Some(picture) = &self.picture_url {
            writeln!(f, "picture: {}", picture)?;
        }
        write!(f, "{}", self.detail_link)
    }
}

/// Status and body as handed back by the transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

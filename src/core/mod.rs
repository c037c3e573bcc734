pub mod engine;

pub use crate::domain::model::{PetRecord, TransportResponse};
pub use crate::domain::ports::{HttpTransport, PetSource, Storage};
pub use crate::utils::error::Result;

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{LocalStorage, PetFinderSource, PetHarborSource, ReqwestTransport};
pub use config::PetsConfig;
pub use core::engine::PetEngine;
pub use domain::model::PetRecord;
pub use domain::ports::{HttpTransport, PetSource};
pub use utils::error::{PetError, Result};

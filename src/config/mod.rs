#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, OutputFormat, SourceKind};
pub use toml_config::{HttpConfig, PetFinderConfig, PetHarborConfig, PetsConfig};

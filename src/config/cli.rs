use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
    Petfinder,
    Petharbor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "cute-pets")]
#[command(about = "Fetch one adoptable pet from PetFinder or PetHarbor")]
pub struct CliConfig {
    /// Path to TOML configuration file; environment variables are used when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, value_enum, default_value = "petfinder")]
    pub source: SourceKind,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Also write the record as pet.json under this directory
    #[arg(long)]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

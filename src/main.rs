use clap::Parser;
use cute_pets::config::{OutputFormat, SourceKind};
use cute_pets::utils::error::ErrorSeverity;
use cute_pets::utils::logger;
use cute_pets::utils::validation::{validate_path, Validate};
use cute_pets::{
    CliConfig, LocalStorage, PetEngine, PetError, PetRecord, PetSource, PetsConfig,
    ReqwestTransport,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 與原本的部署方式相容：先讀 .env
    dotenvy::dotenv().ok();

    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting cute-pets");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };

    let storage = match cli.output_path.as_deref().map(output_storage).transpose() {
        Ok(storage) => storage,
        Err(e) => exit_with(e),
    };

    let transport = match ReqwestTransport::new(config.http.timeout(), &config.http.user_agent) {
        Ok(transport) => transport,
        Err(e) => exit_with(e),
    };

    let source: Box<dyn PetSource> = match build_source(&config, cli.source, transport) {
        Ok(source) => source,
        Err(e) => exit_with(e),
    };

    let engine = PetEngine::new(source);
    let result = match &storage {
        Some(storage) => engine.run_and_store(storage).await,
        None => engine.run().await,
    };

    match result {
        Ok(record) => {
            print_record(&record, cli.format)?;
            Ok(())
        }
        Err(e) => exit_with(e),
    }
}

fn load_config(cli: &CliConfig) -> cute_pets::Result<PetsConfig> {
    match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            PetsConfig::from_file(path)
        }
        None => Ok(PetsConfig::from_env()),
    }
}

fn output_storage(path: &str) -> cute_pets::Result<LocalStorage> {
    validate_path("output_path", path)?;
    Ok(LocalStorage::new(path.to_string()))
}

fn build_source(
    config: &PetsConfig,
    kind: SourceKind,
    transport: ReqwestTransport,
) -> cute_pets::Result<Box<dyn PetSource>> {
    config.http.validate()?;
    let source: Box<dyn PetSource> = match kind {
        SourceKind::Petfinder => Box::new(config.petfinder_source(transport)?),
        SourceKind::Petharbor => Box::new(config.petharbor_source(transport)?),
    };
    Ok(source)
}

fn print_record(record: &PetRecord, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", record),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(record)?),
    }
    Ok(())
}

fn exit_with(e: PetError) -> ! {
    tracing::error!(
        "❌ Fetch failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(exit_code(&e))
}

// 依錯誤嚴重程度決定退出碼
fn exit_code(e: &PetError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bad_config_file_exits_as_critical() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[petfinder\napi_key = ").unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from(["cute-pets", "--config", path.as_str()]);
        let err = load_config(&cli).unwrap_err();

        assert!(matches!(err, PetError::ConfigError { .. }));
        assert_eq!(exit_code(&err), 3);
    }

    #[test]
    fn test_exit_codes_follow_severity() {
        assert_eq!(exit_code(&PetError::upstream("PetFinder", 500)), 2);
        assert_eq!(exit_code(&PetError::parse("PetHarbor", "no anchor")), 1);
    }

    #[test]
    fn test_output_path_is_validated() {
        assert!(matches!(
            output_storage(""),
            Err(PetError::InvalidConfigValueError { .. })
        ));
        assert!(output_storage("./out").is_ok());
    }
}

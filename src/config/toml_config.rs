use crate::adapters::{petfinder, petharbor, PetFinderSource, PetHarborSource};
use crate::domain::ports::HttpTransport;
use crate::utils::error::{PetError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_required_field, validate_url,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetsConfig {
    pub petfinder: Option<PetFinderConfig>,
    pub petharbor: Option<PetHarborConfig>,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetFinderConfig {
    #[serde(default = "default_petfinder_endpoint")]
    pub endpoint: String,
    pub api_key: String,
    pub shelter_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetHarborConfig {
    #[serde(default = "default_petharbor_endpoint")]
    pub endpoint: String,
    pub shelter_id: String,
    /// 以空白分隔的寵物種類代碼，例如 "dog cat"
    pub pet_types: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn default_petfinder_endpoint() -> String {
    petfinder::DEFAULT_ENDPOINT.to_string()
}

fn default_petharbor_endpoint() -> String {
    petharbor::DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    crate::adapters::http::DEFAULT_USER_AGENT.to_string()
}

impl PetsConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PetError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PetError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PETFINDER_KEY})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// 從環境變數建立配置 (petfinder_key, petfinder_shelter_id, ...)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| {
            std::env::var(name)
                .or_else(|_| std::env::var(name.to_uppercase()))
                .ok()
        })
    }

    /// 缺少任一必要變數的來源整段視為未設定
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let petfinder = match (lookup("petfinder_key"), lookup("petfinder_shelter_id")) {
            (Some(api_key), Some(shelter_id)) => Some(PetFinderConfig {
                endpoint: lookup("petfinder_endpoint").unwrap_or_else(default_petfinder_endpoint),
                api_key,
                shelter_id,
            }),
            _ => None,
        };

        let petharbor = match (
            lookup("petharbor_shelter_id"),
            lookup("petharbor_pet_types"),
        ) {
            (Some(shelter_id), Some(pet_types)) => Some(PetHarborConfig {
                endpoint: lookup("petharbor_endpoint").unwrap_or_else(default_petharbor_endpoint),
                shelter_id,
                pet_types,
            }),
            _ => None,
        };

        Self {
            petfinder,
            petharbor,
            http: HttpConfig::default(),
        }
    }

    pub fn petfinder_source<T: HttpTransport>(&self, transport: T) -> Result<PetFinderSource<T>> {
        let config = validate_required_field("petfinder", &self.petfinder)?;
        config.validate()?;
        Ok(
            PetFinderSource::new(transport, config.shelter_id.clone(), config.api_key.clone())
                .with_endpoint(config.endpoint.clone()),
        )
    }

    pub fn petharbor_source<T: HttpTransport>(&self, transport: T) -> Result<PetHarborSource<T>> {
        let config = validate_required_field("petharbor", &self.petharbor)?;
        config.validate()?;
        Ok(
            PetHarborSource::new(transport, config.shelter_id.clone(), &config.pet_types)
                .with_endpoint(config.endpoint.clone()),
        )
    }
}

impl Validate for PetFinderConfig {
    fn validate(&self) -> Result<()> {
        validate_url("petfinder.endpoint", &self.endpoint)?;
        validate_non_empty_string("petfinder.api_key", &self.api_key)?;
        validate_non_empty_string("petfinder.shelter_id", &self.shelter_id)?;
        Ok(())
    }
}

impl Validate for PetHarborConfig {
    fn validate(&self) -> Result<()> {
        validate_url("petharbor.endpoint", &self.endpoint)?;
        validate_non_empty_string("petharbor.shelter_id", &self.shelter_id)?;
        validate_non_empty_string("petharbor.pet_types", &self.pet_types)?;
        Ok(())
    }
}

impl Validate for HttpConfig {
    fn validate(&self) -> Result<()> {
        validate_positive_number("http.timeout_seconds", self.timeout_seconds, 1)
    }
}

/// 只驗證有設定的來源；使用未設定的來源時才報錯
impl Validate for PetsConfig {
    fn validate(&self) -> Result<()> {
        if self.petfinder.is_none() && self.petharbor.is_none() {
            return Err(PetError::ConfigError {
                message: "neither [petfinder] nor [petharbor] is configured".to_string(),
            });
        }
        if let Some(petfinder) = &self.petfinder {
            petfinder.validate()?;
        }
        if let Some(petharbor) = &self.petharbor {
            petharbor.validate()?;
        }
        self.http.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ReqwestTransport;
    use crate::domain::ports::PetSource;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[petfinder]
api_key = "abc123"
shelter_id = "CA123"

[petharbor]
endpoint = "https://petharbor.example.com/petoftheday.asp"
shelter_id = "SHLT"
pet_types = "dog cat"

[http]
timeout_seconds = 10
"#;

        let config = PetsConfig::from_toml_str(toml_content).unwrap();

        let finder = config.petfinder.as_ref().unwrap();
        assert_eq!(finder.endpoint, petfinder::DEFAULT_ENDPOINT);
        assert_eq!(finder.api_key, "abc123");
        let harbor = config.petharbor.as_ref().unwrap();
        assert_eq!(harbor.endpoint, "https://petharbor.example.com/petoftheday.asp");
        assert_eq!(config.http.timeout(), Duration::from_secs(10));
        assert_eq!(config.http.user_agent, crate::adapters::http::DEFAULT_USER_AGENT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CUTE_PETS_TEST_KEY", "from-env");

        let toml_content = r#"
[petfinder]
api_key = "${CUTE_PETS_TEST_KEY}"
shelter_id = "${CUTE_PETS_TEST_UNSET_SHELTER}"
"#;

        let config = PetsConfig::from_toml_str(toml_content).unwrap();
        let finder = config.petfinder.as_ref().unwrap();
        assert_eq!(finder.api_key, "from-env");
        assert_eq!(finder.shelter_id, "${CUTE_PETS_TEST_UNSET_SHELTER}");
        assert!(config.validate().is_err());

        std::env::remove_var("CUTE_PETS_TEST_KEY");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[petharbor]
endpoint = "invalid-url"
shelter_id = "SHLT"
pet_types = "dog"
"#;

        let config = PetsConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let empty = PetsConfig::from_toml_str("").unwrap();
        assert!(matches!(
            empty.validate(),
            Err(PetError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            PetsConfig::from_toml_str("[petfinder\napi_key = 1"),
            Err(PetError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[petharbor]
shelter_id = "SHLT"
pet_types = "dog"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = PetsConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.petharbor.unwrap().shelter_id, "SHLT");
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("petfinder_key", "k"),
            ("petfinder_shelter_id", "CA1"),
            ("petharbor_shelter_id", "SHLT"),
        ]
        .into_iter()
        .collect();

        let config = PetsConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        let finder = config.petfinder.unwrap();
        assert_eq!(finder.api_key, "k");
        assert_eq!(finder.endpoint, petfinder::DEFAULT_ENDPOINT);
        // petharbor_pet_types 未設定
        assert!(config.petharbor.is_none());
    }

    #[test]
    fn test_source_for_missing_section_is_missing_config() {
        let config = PetsConfig::from_toml_str(
            r#"
[petfinder]
api_key = "k"
shelter_id = "CA1"
"#,
        )
        .unwrap();

        assert!(matches!(
            config.petharbor_source(ReqwestTransport::default()),
            Err(PetError::MissingConfigError { .. })
        ));

        let source = config.petfinder_source(ReqwestTransport::default()).unwrap();
        assert_eq!(source.name(), "PetFinder");
    }
}

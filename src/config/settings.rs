use std::sync::Arc;

use jsonwebtoken::Algorithm;
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static SETTINGS: OnceCell<Arc<Settings>> = OnceCell::new();
static LOAD_WARNINGS: OnceCell<Vec<String>> = OnceCell::new();

/// Application settings
///
/// Field names match the environment variables they are read from
/// (`SECRET_KEY`, `ACCESS_TOKEN_EXPIRE_MINUTES`, `PORT`, ...).
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub secret_key: String,
    pub algorithm: TokenAlgorithm,
    pub access_token_expire_minutes: i64,
    pub host: String,
    pub port: u16,
    pub test_user: String,
    pub test_password: String,
    pub app_title: String,
    pub app_version: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

/// HMAC algorithms accepted for signing tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum TokenAlgorithm {
    #[default]
    #[serde(rename = "HS256")]
    Hs256,
    #[serde(rename = "HS384")]
    Hs384,
    #[serde(rename = "HS512")]
    Hs512,
}

impl TokenAlgorithm {
    pub fn as_jwt(self) -> Algorithm {
        match self {
            Self::Hs256 => Algorithm::HS256,
            Self::Hs384 => Algorithm::HS384,
            Self::Hs512 => Algorithm::HS512,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hs256 => "HS256",
            Self::Hs384 => "HS384",
            Self::Hs512 => "HS512",
        }
    }
}

impl std::fmt::Display for TokenAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("secret_key", &"[hidden]")
            .field("algorithm", &self.algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("test_user", &self.test_user)
            .field("test_password", &"[hidden]")
            .field("app_title", &self.app_title)
            .field("app_version", &self.app_version)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            secret_key: "change-me-in-production".to_string(),
            algorithm: TokenAlgorithm::default(),
            access_token_expire_minutes: 30,
            host: "0.0.0.0".to_string(),
            port: 3000,
            test_user: "root".to_string(),
            test_password: "1234".to_string(),
            app_title: "Authentication API".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from `config/default`, `config/local` and the environment,
    /// later sources overriding earlier ones
    ///
    /// Each field falls back to its default on its own: a value that fails to
    /// parse or validate reverts only that field. The returned warnings describe
    /// every value that was dropped.
    pub fn load() -> (Self, Vec<String>) {
        let built = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(config::Environment::default())
            .build();

        match built {
            Ok(config) => Self::from_config(&config),
            Err(e) => {
                let (settings, mut warnings) = config::Config::builder()
                    .add_source(config::Environment::default())
                    .build()
                    .map(|config| Self::from_config(&config))
                    .unwrap_or_else(|_| (Self::default(), Vec::new()));
                warnings.insert(0, format!("configuration files ignored: {}", e));
                (settings, warnings)
            }
        }
    }

    /// Build settings from an already assembled configuration, field by field
    pub fn from_config(config: &config::Config) -> (Self, Vec<String>) {
        let mut reader = FieldReader {
            config,
            warnings: Vec::new(),
        };
        let mut settings = Self::default();

        reader.read("secret_key", &mut settings.secret_key);
        reader.read("algorithm", &mut settings.algorithm);
        reader.read(
            "access_token_expire_minutes",
            &mut settings.access_token_expire_minutes,
        );
        reader.read("host", &mut settings.host);
        reader.read("port", &mut settings.port);
        reader.read("test_user", &mut settings.test_user);
        reader.read("test_password", &mut settings.test_password);
        reader.read("app_title", &mut settings.app_title);
        reader.read("app_version", &mut settings.app_version);
        reader.read("log_level", &mut settings.log_level);
        reader.read("log_format", &mut settings.log_format);

        let defaults = Self::default();
        let mut warnings = reader.warnings;

        if let Err(e) = settings.validate_ttl() {
            warnings.push(format!("{}, keeping default", e));
            settings.access_token_expire_minutes = defaults.access_token_expire_minutes;
        }
        if let Err(e) = settings.validate_secret() {
            warnings.push(format!("{}, keeping default", e));
            settings.secret_key = defaults.secret_key;
        }

        (settings, warnings)
    }

    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.validate_ttl()?;
        self.validate_secret()
    }

    fn validate_ttl(&self) -> Result<(), config::ConfigError> {
        if self.access_token_expire_minutes <= 0 {
            return Err(config::ConfigError::Message(format!(
                "access_token_expire_minutes must be positive, got {}",
                self.access_token_expire_minutes
            )));
        }

        if ttl_from_minutes(self.access_token_expire_minutes).is_none() {
            return Err(config::ConfigError::Message(format!(
                "access_token_expire_minutes is too large, got {}",
                self.access_token_expire_minutes
            )));
        }

        Ok(())
    }

    fn validate_secret(&self) -> Result<(), config::ConfigError> {
        if self.secret_key.is_empty() {
            return Err(config::ConfigError::Message(
                "secret_key cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Default lifetime of issued tokens
    ///
    /// An out-of-range `access_token_expire_minutes` yields the default lifetime.
    pub fn token_ttl(&self) -> chrono::Duration {
        ttl_from_minutes(self.access_token_expire_minutes)
            .or_else(|| ttl_from_minutes(Self::default().access_token_expire_minutes))
            .unwrap_or_else(chrono::Duration::zero)
    }
}

/// A lifetime that can still be added to the current time
fn ttl_from_minutes(minutes: i64) -> Option<chrono::Duration> {
    let ttl = chrono::Duration::try_minutes(minutes)?;
    chrono::Utc::now().checked_add_signed(ttl)?;
    Some(ttl)
}

struct FieldReader<'a> {
    config: &'a config::Config,
    warnings: Vec<String>,
}

impl FieldReader<'_> {
    /// Overwrite `target` with the configured value; absent keys keep the default
    fn read<T: DeserializeOwned>(&mut self, key: &str, target: &mut T) {
        match self.config.get::<T>(key) {
            Ok(value) => *target = value,
            Err(config::ConfigError::NotFound(_)) => {}
            Err(e) => self
                .warnings
                .push(format!("invalid value for {}: {}, keeping default", key, e)),
        }
    }
}

/// Process-wide settings, built on first call and shared afterwards
///
/// Loading never fails. Values that cannot be used are replaced by their
/// defaults and reported through [`load_warnings`].
pub fn get_settings() -> Arc<Settings> {
    SETTINGS
        .get_or_init(|| {
            let (settings, warnings) = Settings::load();
            let _ = LOAD_WARNINGS.set(warnings);
            Arc::new(settings)
        })
        .clone()
}

/// Problems found while loading the process-wide settings
///
/// Empty until [`get_settings`] has run; callers log these once a subscriber
/// is installed.
pub fn load_warnings() -> &'static [String] {
    LOAD_WARNINGS.get().map(Vec::as_slice).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.algorithm, TokenAlgorithm::Hs256);
        assert_eq!(settings.access_token_expire_minutes, 30);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 3000);
        assert_eq!(settings.test_user, "root");
        assert_eq!(settings.test_password, "1234");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_singleton() {
        let first = get_settings();
        let second = get_settings();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_validate_rejects_non_positive_ttl() {
        let mut settings = Settings::default();

        settings.access_token_expire_minutes = 0;
        assert!(settings.validate().is_err());

        settings.access_token_expire_minutes = -5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let settings = Settings {
            secret_key: String::new(),
            ..Settings::default()
        };

        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let debug = format!("{:?}", Settings::default());

        assert!(!debug.contains("change-me-in-production"));
        assert!(!debug.contains("1234"));
        assert!(debug.contains("root"));
    }

    #[test]
    fn test_token_ttl() {
        let settings = Settings::default();
        assert_eq!(settings.token_ttl(), chrono::Duration::minutes(30));
    }

    #[test]
    fn test_validate_rejects_ttl_that_overflows() {
        let mut settings = Settings::default();

        settings.access_token_expire_minutes = i64::MAX;
        assert!(settings.validate().is_err());
        assert_eq!(settings.token_ttl(), chrono::Duration::minutes(30));

        settings.access_token_expire_minutes = 10_000_000_000_000;
        assert!(settings.validate().is_err());
        assert_eq!(settings.token_ttl(), chrono::Duration::minutes(30));
    }

    fn config_with(values: &[(&str, &str)]) -> config::Config {
        values
            .iter()
            .fold(config::Config::builder(), |builder, (key, value)| {
                builder.set_override(*key, *value).unwrap()
            })
            .build()
            .unwrap()
    }

    #[test]
    fn test_from_config_reads_values() {
        let (settings, warnings) = Settings::from_config(&config_with(&[
            ("secret_key", "operator-secret"),
            ("algorithm", "HS384"),
            ("access_token_expire_minutes", "45"),
            ("port", "8080"),
            ("log_format", "json"),
        ]));

        assert!(warnings.is_empty(), "{:?}", warnings);
        assert_eq!(settings.secret_key, "operator-secret");
        assert_eq!(settings.algorithm, TokenAlgorithm::Hs384);
        assert_eq!(settings.access_token_expire_minutes, 45);
        assert_eq!(settings.port, 8080);
        assert!(matches!(settings.log_format, LogFormat::Json));
        assert_eq!(settings.test_user, "root");
    }

    #[test]
    fn test_bad_port_keeps_custom_secret() {
        let (settings, warnings) = Settings::from_config(&config_with(&[
            ("secret_key", "operator-secret"),
            ("port", "not-a-port"),
        ]));

        assert_eq!(settings.secret_key, "operator-secret");
        assert_eq!(settings.port, 3000);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("port"));
    }

    #[test]
    fn test_invalid_values_revert_individually() {
        let (settings, warnings) = Settings::from_config(&config_with(&[
            ("secret_key", "operator-secret"),
            ("algorithm", "RS256"),
            ("access_token_expire_minutes", "9223372036854775807"),
            ("host", "127.0.0.1"),
        ]));

        assert_eq!(warnings.len(), 2, "{:?}", warnings);
        assert_eq!(settings.secret_key, "operator-secret");
        assert_eq!(settings.algorithm, TokenAlgorithm::Hs256);
        assert_eq!(settings.access_token_expire_minutes, 30);
        assert_eq!(settings.host, "127.0.0.1");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_reverts_to_default() {
        let (settings, warnings) = Settings::from_config(&config_with(&[("secret_key", "")]));

        assert_eq!(settings.secret_key, Settings::default().secret_key);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_loaded_settings_always_validate() {
        let settings = get_settings();

        assert!(settings.validate().is_ok());
        assert!(LOAD_WARNINGS.get().is_some());
    }

    #[test]
    fn test_algorithm_deserialization() {
        let alg: TokenAlgorithm = serde_json::from_str("\"HS512\"").unwrap();
        assert_eq!(alg, TokenAlgorithm::Hs512);
        assert_eq!(alg.as_jwt(), Algorithm::HS512);
        assert_eq!(alg.to_string(), "HS512");

        assert!(serde_json::from_str::<TokenAlgorithm>("\"RS256\"").is_err());
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"secret_key": "s3cret", "port": 8080}"#).unwrap();

        assert_eq!(settings.secret_key, "s3cret");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.test_user, "root");
        assert_eq!(settings.access_token_expire_minutes, 30);
    }
}

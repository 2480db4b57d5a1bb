use lettre::message::Mailbox;
use serde::Deserialize;
use std::fs;
use thiserror::Error;

use crate::mail::Envelope;

/// Environment variable carrying the SMTP relay API key.
pub const ENV_API_KEY: &str = "SENDGRID_API_KEY";
pub const ENV_FROM: &str = "ORDER_FROM_EMAIL";
pub const ENV_TO: &str = "ORDER_TO_EMAIL";
pub const ENV_PORT: &str = "PORT";
/// `production` turns the keep-alive prober on, any other value turns it off.
pub const ENV_APP_ENV: &str = "APP_ENV";
pub const ENV_EXTERNAL_URL: &str = "RENDER_EXTERNAL_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("missing required setting: {0}")]
    Missing(&'static str),

    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    pub mail: MailConfig,
    #[serde(default)]
    pub shop: ShopConfig,
    #[serde(default)]
    pub keep_alive: KeepAliveConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// SMTP relay settings. Secrets and addresses normally arrive through the
/// environment and are absent from the YAML files.
#[derive(Deserialize, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    #[serde(default = "default_smtp_username")]
    pub smtp_username: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_username() -> String {
    "apikey".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("timeout_secs", &self.timeout_secs)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("from", &self.from)
            .field("to", &self.to)
            .finish()
    }
}

impl MailConfig {
    /// The relay password. Blank values count as missing.
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        non_blank(self.api_key.as_deref()).ok_or(ConfigError::Missing(ENV_API_KEY))
    }

    /// Resolve sender and recipient mailboxes, checking the credential too so
    /// that a passing check means the relay can actually be used.
    pub fn envelope(&self) -> Result<Envelope, ConfigError> {
        self.api_key()?;
        let from = parse_mailbox(ENV_FROM, self.from.as_deref())?;
        let to = parse_mailbox(ENV_TO, self.to.as_deref())?;
        Ok(Envelope { from, to })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_mailbox(field: &'static str, value: Option<&str>) -> Result<Mailbox, ConfigError> {
    let raw = non_blank(value).ok_or(ConfigError::Missing(field))?;
    raw.parse::<Mailbox>().map_err(|e| ConfigError::Invalid {
        field,
        reason: e.to_string(),
    })
}

/// Storefront branding used in the rendered notification.
#[derive(Debug, Deserialize, Clone)]
pub struct ShopConfig {
    pub name: String,
    pub currency: String,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            name: "CedraShoes".to_string(),
            currency: "دج".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct KeepAliveConfig {
    pub enabled: bool,
    pub url: String,
    pub interval_secs: u64,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: "https://cedrashoes.onrender.com".to_string(),
            interval_secs: 14 * 60,
        }
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml` and apply process environment overrides.
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let mut config = Self::from_file(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Overlay environment settings on top of the file values.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.mail.api_key = Some(key);
        }
        if let Some(from) = lookup(ENV_FROM) {
            self.mail.from = Some(from);
        }
        if let Some(to) = lookup(ENV_TO) {
            self.mail.to = Some(to);
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.gateway.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                field: ENV_PORT,
                reason: format!("not a port number: {:?}", port),
            })?;
        }
        if let Some(mode) = lookup(ENV_APP_ENV) {
            self.keep_alive.enabled = mode.trim().eq_ignore_ascii_case("production");
        }
        if let Some(url) = lookup(ENV_EXTERNAL_URL).filter(|u| !u.trim().is_empty()) {
            self.keep_alive.url = url;
        }
        Ok(())
    }

    /// Startup check. Everything a request would need is verified here so the
    /// process refuses to start rather than failing orders one by one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mail.envelope()?;
        if self.mail.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "mail.timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.keep_alive.enabled {
            self.keep_alive_url()?;
            if self.keep_alive.interval_secs == 0 {
                return Err(ConfigError::Invalid {
                    field: "keep_alive.interval_secs",
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn keep_alive_url(&self) -> Result<reqwest::Url, ConfigError> {
        reqwest::Url::parse(&self.keep_alive.url).map_err(|e| ConfigError::Invalid {
            field: ENV_EXTERNAL_URL,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const YAML: &str = r#"
log_level: "info"
log_dir: "./logs"
log_file: "order_relay.log"
use_json: false
rotation: "daily"
gateway:
  host: "0.0.0.0"
  port: 3000
mail:
  smtp_host: "smtp.sendgrid.net"
"#;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn complete_env() -> Vec<(&'static str, &'static str)> {
        vec![
            (ENV_API_KEY, "SG.secret"),
            (ENV_FROM, "orders@cedrashoes.example"),
            (ENV_TO, "owner@cedrashoes.example"),
        ]
    }

    #[test]
    fn test_config_deserialize_with_defaults() {
        let config = AppConfig::from_yaml(YAML).unwrap();

        assert_eq!(config.gateway.port, 3000);
        assert_eq!(config.mail.smtp_port, 587);
        assert_eq!(config.mail.smtp_username, "apikey");
        assert_eq!(config.mail.timeout_secs, 30);
        assert!(config.mail.api_key.is_none());
        assert_eq!(config.shop.name, "CedraShoes");
        assert!(!config.keep_alive.enabled);
        assert_eq!(config.keep_alive.interval_secs, 840);
    }

    #[test]
    fn test_env_overrides_apply() {
        let mut config = AppConfig::from_yaml(YAML).unwrap();
        let mut pairs = complete_env();
        pairs.push((ENV_PORT, "8080"));
        pairs.push((ENV_APP_ENV, "production"));
        pairs.push((ENV_EXTERNAL_URL, "https://relay.example.com"));

        config.apply_overrides(env(&pairs)).unwrap();

        assert_eq!(config.gateway.port, 8080);
        assert!(config.keep_alive.enabled);
        assert_eq!(config.keep_alive.url, "https://relay.example.com");
        assert_eq!(config.mail.api_key.as_deref(), Some("SG.secret"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_non_production_mode_disables_keep_alive() {
        let mut config = AppConfig::from_yaml(YAML).unwrap();
        config.keep_alive.enabled = true;

        config
            .apply_overrides(env(&[(ENV_APP_ENV, "development")]))
            .unwrap();

        assert!(!config.keep_alive.enabled);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let mut config = AppConfig::from_yaml(YAML).unwrap();
        let err = config
            .apply_overrides(env(&[(ENV_PORT, "eighty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: ENV_PORT, .. }));
    }

    #[test]
    fn test_validate_requires_credential_and_addresses() {
        let config = AppConfig::from_yaml(YAML).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing(ENV_API_KEY))
        ));

        let mut config = AppConfig::from_yaml(YAML).unwrap();
        config
            .apply_overrides(env(&[(ENV_API_KEY, "SG.secret"), (ENV_FROM, "a@b.example")]))
            .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Missing(ENV_TO))));
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let mut config = AppConfig::from_yaml(YAML).unwrap();
        let mut pairs = complete_env();
        pairs[0] = (ENV_API_KEY, "   ");
        config.apply_overrides(env(&pairs)).unwrap();

        assert!(matches!(
            config.mail.envelope(),
            Err(ConfigError::Missing(ENV_API_KEY))
        ));
    }

    #[test]
    fn test_malformed_address_rejected() {
        let mut config = AppConfig::from_yaml(YAML).unwrap();
        let mut pairs = complete_env();
        pairs[1] = (ENV_FROM, "not-an-address");
        config.apply_overrides(env(&pairs)).unwrap();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: ENV_FROM, .. })
        ));
    }

    #[test]
    fn test_keep_alive_url_checked_only_when_enabled() {
        let mut config = AppConfig::from_yaml(YAML).unwrap();
        config.apply_overrides(env(&complete_env())).unwrap();
        config.keep_alive.url = "not a url".to_string();
        assert!(config.validate().is_ok());

        config.keep_alive.enabled = true;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: ENV_EXTERNAL_URL,
                ..
            })
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = AppConfig::from_yaml(YAML).unwrap();
        config.apply_overrides(env(&complete_env())).unwrap();
        let rendered = format!("{:?}", config.mail);
        assert!(!rendered.contains("SG.secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

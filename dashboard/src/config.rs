use axum_extra::extract::cookie::Key;
use serde::Deserialize;

/// Shortest secret accepted for deriving the cookie signing key.
pub const MIN_SECRET_KEY_LEN: usize = 32;

#[derive(Deserialize)]
pub struct Config {
    pub secret_key: String,
    pub database_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Errors raised while loading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("DATABASE_URL must not be empty")]
    EmptyDatabaseUrl,
    #[error("SECRET_KEY must be at least {min} bytes long, got {len}")]
    SecretKeyTooShort { len: usize, min: usize },
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(config::Environment::default())
    }

    /// Loads configuration from the given environment source and validates it.
    pub fn from_environment(environment: config::Environment) -> Result<Self, ConfigError> {
        let settings = config::Config::builder().add_source(environment).build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::EmptyDatabaseUrl);
        }
        check_secret_len(&self.secret_key)
    }

    /// Derives the key used to sign flash cookies from the secret key.
    ///
    /// The secret length was checked when the config was loaded.
    pub fn cookie_key(&self) -> Key {
        Key::derive_from(self.secret_key.as_bytes())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &"<redacted>")
            .field("database_url", &self.database_url)
            .field("port", &self.port)
            .finish()
    }
}

fn check_secret_len(secret_key: &str) -> Result<(), ConfigError> {
    if secret_key.len() < MIN_SECRET_KEY_LEN {
        return Err(ConfigError::SecretKeyTooShort {
            len: secret_key.len(),
            min: MIN_SECRET_KEY_LEN,
        });
    }
    Ok(())
}

fn default_port() -> u16 {
    8080
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        config::Environment::default().source(Some(source))
    }

    #[test]
    fn can_load_config_with_default_port() {
        let config = Config::from_environment(environment(&[
            ("SECRET_KEY", SECRET),
            ("DATABASE_URL", "postgres://localhost/dashboard"),
        ]))
        .expect("config should load");

        assert_eq!(config.secret_key, SECRET);
        assert_eq!(config.database_url, "postgres://localhost/dashboard");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn can_override_port() {
        let config = Config::from_environment(environment(&[
            ("SECRET_KEY", SECRET),
            ("DATABASE_URL", "postgres://localhost/dashboard"),
            ("PORT", "3000"),
        ]))
        .expect("config should load");

        assert_eq!(config.port, 3000);
    }

    #[test]
    fn rejects_missing_secret_key() {
        let result = Config::from_environment(environment(&[(
            "DATABASE_URL",
            "postgres://localhost/dashboard",
        )]));

        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn rejects_missing_database_url() {
        let result = Config::from_environment(environment(&[("SECRET_KEY", SECRET)]));

        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn rejects_blank_database_url() {
        let result = Config::from_environment(environment(&[
            ("SECRET_KEY", SECRET),
            ("DATABASE_URL", "  "),
        ]));

        assert!(matches!(result, Err(ConfigError::EmptyDatabaseUrl)));
    }

    #[test]
    fn rejects_short_secret_key() {
        let result = Config::from_environment(environment(&[
            ("SECRET_KEY", "too-short"),
            ("DATABASE_URL", "postgres://localhost/dashboard"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::SecretKeyTooShort { len: 9, min: 32 })
        ));
    }

    #[test]
    fn can_derive_cookie_key_from_loaded_config() {
        let config = Config::from_environment(environment(&[
            ("SECRET_KEY", SECRET),
            ("DATABASE_URL", "postgres://localhost/dashboard"),
        ]))
        .expect("config should load");

        let key = config.cookie_key();

        assert_eq!(key.master(), Key::derive_from(SECRET.as_bytes()).master());
    }

    #[test]
    fn debug_output_hides_secret_key() {
        let config = Config {
            secret_key: SECRET.to_string(),
            database_url: "postgres://localhost/dashboard".to_string(),
            port: 8080,
        };

        let debug = format!("{:?}", config);

        assert!(!debug.contains(SECRET));
        assert!(debug.contains("<redacted>"));
    }
}

use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{ApiConfig, Config, LoggingConfig, ServerConfig};

/// The file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
/// Prefix of environment overrides, e.g. `SOCIALS__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "SOCIALS";
/// Bearer token variable honoured when the configuration leaves the token empty.
pub const LEGACY_TOKEN_VAR: &str = "TWITTER_API_BEARER_TOKEN";

/// Loads the application configuration from `config.toml` in the working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Loads the application configuration from `path`.
///
/// The file is optional; every setting has a default. Environment variables with the
/// `SOCIALS__` prefix override the file. The result is validated before it is returned.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let mut config = builder.try_deserialize::<Config>()?;

    if config.api.bearer_token.is_empty() {
        if let Ok(token) = std::env::var(LEGACY_TOKEN_VAR) {
            config.api.bearer_token = token;
        }
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.api.base_url, "https://api.twitter.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.directory.is_none());
    }

    #[test]
    fn file_values_override_defaults() {
        let file = write_config(
            r#"
            [api]
            base_url = "http://localhost:9999"
            bearer_token = "abc"

            [server]
            host = "0.0.0.0"
            port = 3000

            [logging]
            level = "debug"
            "#,
        );
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9999");
        assert_eq!(config.api.bearer_token, "abc");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.server.socket_addr().unwrap().to_string(), "0.0.0.0:3000");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let file = write_config("[api]\ntimeout_secs = 0\n");
        assert!(matches!(load_config_from(file.path()), Err(ConfigError::ValidationError(_))));

        let file = write_config("[server]\nhost = \"not-an-ip\"\n");
        assert!(matches!(load_config_from(file.path()), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn debug_output_redacts_the_token() {
        let api = ApiConfig {
            bearer_token: "secret-token".to_string(),
            ..Default::default()
        };
        let printed = format!("{:?}", api);
        assert!(!printed.contains("secret-token"));
        assert!(printed.contains("<redacted>"));
    }
}

use crate::cli::ConnectionArgs;
use crate::prelude::Result;
use secrecy::SecretString;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1";
pub const DEFAULT_API_PORT: u16 = 8697;
pub const DEFAULT_TIMEOUT_SEC: u32 = 30;
/// Applies to every request that does not set its own timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SEC: u64 = 10;

/// Represents the configuration of a single command invocation.
///
/// Values are layered, later sources winning: built-in defaults, an optional
/// settings file, `VMREST__*` environment variables, command-line flags.
///
#[derive(Debug, Deserialize)]
pub struct Config {
    pub api: ApiEnv,
    pub credentials: Credentials,
}

impl Config {
    /// Loads the configuration.
    ///
    /// # Arguments
    ///
    /// * `file`: Optional settings file, format is taken from its extension.
    /// * `overrides`: Connection flags given on the command line.
    ///
    pub fn load(file: Option<&Path>, overrides: &ConnectionArgs) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("api.url", DEFAULT_API_URL)?
            .set_default("api.port", i64::from(DEFAULT_API_PORT))?
            .set_default("api.validate_certs", false)?
            .set_default("api.timeout_sec", i64::from(DEFAULT_TIMEOUT_SEC))?;

        if let Some(file) = file {
            builder = builder.add_source(config::File::from(file));
        }

        let config = builder
            .add_source(config::Environment::with_prefix("VMREST").separator("__"))
            .set_override_option("api.url", overrides.api_url.clone())?
            .set_override_option("api.port", overrides.api_port.map(i64::from))?
            .set_override_option("api.validate_certs", overrides.validate_certs)?
            .set_override_option("api.timeout_sec", overrides.timeout.map(i64::from))?
            .set_override_option("credentials.username", overrides.username.clone())?
            .set_override_option("credentials.password", overrides.password.clone())?
            .build()?
            .try_deserialize::<Config>()?;

        tracing::debug!(target: "config", ?config, "Configuration loaded.");

        Ok(config)
    }
}

/// Loads a `.env` file from the working directory or its parents, if any.
///
pub fn load_dotenv() -> Result<()> {
    match dotenv::dotenv() {
        Ok(path) => tracing::debug!(target: "config", path = %path.display(), ".env loaded."),
        Err(error) if error.not_found() => tracing::debug!(target: "config", "No .env file."),
        Err(error) => return Err(error.into()),
    }
    Ok(())
}

// -----------------------------------------------------------------------------

/// Settings required to reach the vmrest service.
///
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnv {
    url: String,
    port: u16,
    pub validate_certs: bool,
    timeout_sec: u64,
}

impl ApiEnv {
    /// Returns the service root as `scheme://host:port`.
    ///
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.url.trim_end_matches('/'), self.port)
    }

    /// Timeout applied to power requests.
    ///
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_sec)
    }
}

/// vmrest account used for Basic authentication.
///
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

//! Client configuration

use std::path::PathBuf;
use std::str::FromStr;

use crate::facade::ProcedureTable;
use crate::rpc::{InputEncoding, NetworkRpcClient};
use crate::settings::Settings;
use crate::{ClientError, ClientResult};

/// Backend origin used when neither the environment nor the settings name one
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Directory holding `session.json` and `settings.json` by default
pub const DEFAULT_DATA_DIR: &str = ".capistars";

/// Which family of procedure names the backend exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcedurePreset {
    /// `salesReps.*` / `establishments.*` routers
    #[default]
    Default,
    /// `admin.*` router for establishments, `salesReps.getAll` listing
    Admin,
}

impl ProcedurePreset {
    pub fn table(self) -> ProcedureTable {
        match self {
            Self::Default => ProcedureTable::default(),
            Self::Admin => ProcedureTable::admin(),
        }
    }
}

impl FromStr for ProcedurePreset {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(Self::Default),
            "admin" => Ok(Self::Admin),
            other => Err(ClientError::Config(format!("unknown procedure preset: {other}"))),
        }
    }
}

/// Client configuration for connecting to the CAPISTARS backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin (e.g., "https://api.capistars.fr")
    pub base_url: String,

    /// Operator session token sent as a bearer credential
    pub token: Option<String>,

    /// Request timeout in seconds; `None` keeps the HTTP client default
    pub timeout: Option<u64>,

    /// How mutation and query inputs are framed on the wire
    pub input_encoding: InputEncoding,

    /// Procedure name family
    pub procedures: ProcedurePreset,

    /// Directory for persisted session and settings files
    pub data_dir: PathBuf,

    /// Deployment environment: development | staging | production
    pub environment: String,

    /// Operator login email
    pub admin_email: Option<String>,

    /// Argon2 PHC hash of the operator password
    pub admin_password_hash: Option<String>,

    /// HMAC secret signing operator session tokens
    pub session_secret: String,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: None,
            input_encoding: InputEncoding::Plain,
            procedures: ProcedurePreset::Default,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            environment: "development".to_string(),
            admin_email: None,
            admin_password_hash: None,
            session_secret: dev_secret("CAPISTARS_SESSION_SECRET"),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> ClientResult<Self> {
        let environment =
            std::env::var("CAPISTARS_ENV").unwrap_or_else(|_| "development".into());

        Ok(Self {
            base_url: std::env::var("CAPISTARS_API_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.into()),
            token: None,
            timeout: std::env::var("CAPISTARS_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok()),
            input_encoding: std::env::var("CAPISTARS_INPUT_ENCODING")
                .map(|v| v.parse())
                .unwrap_or(Ok(InputEncoding::Plain))?,
            procedures: std::env::var("CAPISTARS_PROCEDURES")
                .map(|v| v.parse())
                .unwrap_or(Ok(ProcedurePreset::Default))?,
            data_dir: std::env::var("CAPISTARS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR)),
            admin_email: std::env::var("CAPISTARS_ADMIN_EMAIL")
                .ok()
                .filter(|s| !s.is_empty()),
            admin_password_hash: std::env::var("CAPISTARS_ADMIN_PASSWORD_HASH")
                .ok()
                .filter(|s| !s.is_empty()),
            session_secret: require_secret("CAPISTARS_SESSION_SECRET", &environment)?,
            environment,
        })
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Set the input framing
    pub fn with_input_encoding(mut self, encoding: InputEncoding) -> Self {
        self.input_encoding = encoding;
        self
    }

    /// Set the procedure name family
    pub fn with_procedures(mut self, preset: ProcedurePreset) -> Self {
        self.procedures = preset;
        self
    }

    /// Set the data directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the operator credentials
    pub fn with_operator(
        mut self,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        self.admin_email = Some(email.into());
        self.admin_password_hash = Some(password_hash.into());
        self
    }

    /// Set the session signing secret
    pub fn with_session_secret(mut self, secret: impl Into<String>) -> Self {
        self.session_secret = secret.into();
        self
    }

    /// Apply persisted operator settings; a saved API URL wins over the environment
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        if let Some(url) = settings.api_url.as_deref().filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        self
    }

    /// Create an RPC client from this configuration
    pub fn build_rpc_client(&self) -> ClientResult<NetworkRpcClient> {
        NetworkRpcClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn dev_secret(name: &str) -> String {
    format!("dev-{name}-not-for-production")
}

/// Require a secret env var: must be set and non-empty outside development.
fn require_secret(name: &str, environment: &str) -> ClientResult<String> {
    let val = match std::env::var(name) {
        Ok(v) => v,
        Err(_) => {
            if environment != "development" {
                return Err(ClientError::Config(format!(
                    "{name} must be set in {environment} environment"
                )));
            }
            dev_secret(name)
        }
    };
    if val.is_empty() && environment != "development" {
        return Err(ClientError::Config(format!(
            "{name} must not be empty in {environment} environment"
        )));
    }
    Ok(val)
}

use std::env;

pub const DEFAULT_SERVER_NAME: &str = "awsgi";
pub const DEFAULT_SERVER_PORT: &str = "80";
pub const DEFAULT_URL_SCHEME: &str = "http";
pub const DEFAULT_REMOTE_ADDR: &str = "127.0.0.1";

/// Fallback values for request facts the gateway event may not carry.
///
/// Every field is overridden per request when the matching header
/// (`Host`, `X-Forwarded-Port`, `X-Forwarded-Proto`, `X-Forwarded-For`)
/// is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    pub server_name: String,
    pub server_port: String,
    pub url_scheme: String,
    pub remote_addr: String,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
            server_port: DEFAULT_SERVER_PORT.to_string(),
            url_scheme: DEFAULT_URL_SCHEME.to_string(),
            remote_addr: DEFAULT_REMOTE_ADDR.to_string(),
        }
    }
}

impl AdapterConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        Ok(Self {
            server_name: override_var("GATEWIRE_SERVER_NAME", defaults.server_name)?,
            server_port: override_var("GATEWIRE_SERVER_PORT", defaults.server_port)?,
            url_scheme: override_var("GATEWIRE_URL_SCHEME", defaults.url_scheme)?,
            remote_addr: override_var("GATEWIRE_REMOTE_ADDR", defaults.remote_addr)?,
        })
    }
}

fn override_var(name: &str, default: String) -> Result<String, String> {
    match env::var(name) {
        Ok(value) if value.is_empty() => Err(format!("{}: set but empty", name)),
        Ok(value) => Ok(value),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(format!("{}: {}", name, e)),
    }
}

//! Server configuration
//!
//! Read from Shuttle secrets at startup. Every key is optional.

use shuttle_runtime::SecretStore;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Runtime settings for the HTTP layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Single origin allowed by CORS; permissive CORS when unset
    pub cors_allowed_origin: Option<String>,
    /// Page size used when a request does not ask for one
    pub default_page_size: u32,
    /// Upper bound on any requested page size
    pub max_page_size: u32,
}

impl ServerConfig {
    pub fn from_secrets(secrets: &SecretStore) -> Self {
        Self::from_lookup(|key| secrets.get(key))
    }

    /// Build from any key lookup. Unparsable numbers fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_page_size = parse_size(&lookup, "MAX_PAGE_SIZE", MAX_PAGE_SIZE);
        let default_page_size =
            parse_size(&lookup, "DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE).min(max_page_size);

        Self {
            cors_allowed_origin: lookup("CORS_ALLOWED_ORIGIN").filter(|s| !s.trim().is_empty()),
            default_page_size,
            max_page_size,
        }
    }

    /// Resolve a requested page size against the configured bounds
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origin: None,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

fn parse_size<F>(lookup: &F, key: &str, default: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<u32>() {
            Ok(value) if value > 0 => value,
            _ => {
                tracing::warn!("⚠️  Ignoring invalid {}={:?}, using {}", key, raw, default);
                default
            }
        },
    }
}

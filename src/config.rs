use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// Default authentication realm.
pub const DEFAULT_REALM: &str = "pam";
/// Server-side ticket validity window, seconds.
pub const DEFAULT_TICKET_LIFETIME_SECS: u64 = 7200;
/// How early before expiry the client renews, seconds.
pub const DEFAULT_RENEWAL_BUFFER_SECS: u64 = 300;

/// Connection settings for one Proxmox node.
///
/// Credentials are retained for silent re-login and are never logged; the
/// `Debug` impl redacts the password.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_realm")]
    pub realm: String,
    #[serde(default = "default_true")]
    pub verify_tls: bool,
    #[serde(default = "default_ticket_lifetime")]
    pub ticket_lifetime_secs: u64,
    #[serde(default = "default_renewal_buffer")]
    pub renewal_buffer_secs: u64,
}

fn default_realm() -> String {
    DEFAULT_REALM.to_string()
}

fn default_true() -> bool {
    true
}

fn default_ticket_lifetime() -> u64 {
    DEFAULT_TICKET_LIFETIME_SECS
}

fn default_renewal_buffer() -> u64 {
    DEFAULT_RENEWAL_BUFFER_SECS
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            realm: default_realm(),
            verify_tls: true,
            ticket_lifetime_secs: DEFAULT_TICKET_LIFETIME_SECS,
            renewal_buffer_secs: DEFAULT_RENEWAL_BUFFER_SECS,
        }
    }

    /// Override the authentication realm (default `"pam"`).
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    /// Disable or re-enable TLS certificate verification (default: verify).
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Override the server-side ticket validity window.
    pub fn with_ticket_lifetime_secs(mut self, secs: u64) -> Self {
        self.ticket_lifetime_secs = secs;
        self
    }

    /// Override how early before expiry the client renews.
    pub fn with_renewal_buffer_secs(mut self, secs: u64) -> Self {
        self.renewal_buffer_secs = secs;
        self
    }

    /// Load connection settings from a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let mut config: ClientConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// `user@realm`, as the ticket endpoint expects it.
    pub fn qualified_username(&self) -> String {
        format!("{}@{}", self.username, self.realm)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("realm", &self.realm)
            .field("verify_tls", &self.verify_tls)
            .field("ticket_lifetime_secs", &self.ticket_lifetime_secs)
            .field("renewal_buffer_secs", &self.renewal_buffer_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://pve.example:8006/", "root", "secret");
        assert_eq!(config.base_url, "https://pve.example:8006");
        assert_eq!(config.realm, "pam");
        assert!(config.verify_tls);
        assert_eq!(config.ticket_lifetime_secs, 7200);
        assert_eq!(config.renewal_buffer_secs, 300);
        assert_eq!(config.qualified_username(), "root@pam");
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("https://pve.example:8006", "admin", "secret")
            .with_realm("pve")
            .with_verify_tls(false)
            .with_ticket_lifetime_secs(3600)
            .with_renewal_buffer_secs(60);
        assert_eq!(config.qualified_username(), "admin@pve");
        assert!(!config.verify_tls);
        assert_eq!(config.ticket_lifetime_secs, 3600);
        assert_eq!(config.renewal_buffer_secs, 60);
    }

    #[test]
    fn test_load_from_toml_applies_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "base_url = \"https://pve.example:8006/\"\nusername = \"root\"\npassword = \"secret\""
        )
        .unwrap();

        let config = ClientConfig::load_from(file.path()).unwrap();
        assert_eq!(config.base_url, "https://pve.example:8006");
        assert_eq!(config.realm, "pam");
        assert!(config.verify_tls);
        assert_eq!(config.ticket_lifetime_secs, 7200);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = ClientConfig::load_from(Path::new("/nonexistent/pve.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ClientConfig::new("https://pve.example:8006", "root", "hunter2");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}

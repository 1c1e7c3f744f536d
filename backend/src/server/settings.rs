//! Server settings loaded via OrthoConfig.
//!
//! Values come from `COMPLAINTS_*` environment variables, an optional
//! configuration file or command-line flags.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use complaint_backend::outbound::persistence::DEFAULT_POOL_MAX_SIZE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings controlling the HTTP listener and persistence backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "COMPLAINTS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server runs on in-memory stores.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

/// Settings that failed validation after loading.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

impl ServerSettings {
    /// Parsed listener address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| SettingsError::BindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    /// Configured database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool size, defaulting to [`DEFAULT_POOL_MAX_SIZE`].
    #[must_use]
    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "COMPLAINTS_BIND_ADDR",
        "COMPLAINTS_DATABASE_URL",
        "COMPLAINTS_POOL_MAX_SIZE",
        "COMPLAINTS_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("complaint-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default parses"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.database_url().is_none());
        assert_eq!(settings.pool_max_size(), DEFAULT_POOL_MAX_SIZE);
        assert!(settings.run_migrations);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("COMPLAINTS_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "COMPLAINTS_DATABASE_URL",
                Some("postgres://complaints@localhost/complaints".to_owned()),
            ),
            ("COMPLAINTS_POOL_MAX_SIZE", Some("4".to_owned())),
            ("COMPLAINTS_RUN_MIGRATIONS", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("override parses").port(),
            9000
        );
        assert_eq!(
            settings.database_url(),
            Some("postgres://complaints@localhost/complaints")
        );
        assert_eq!(settings.pool_max_size(), 4);
        assert!(!settings.run_migrations);
    }

    #[rstest]
    fn blank_database_url_means_in_memory() {
        let _guard = lock_env([
            ("COMPLAINTS_BIND_ADDR", None),
            ("COMPLAINTS_DATABASE_URL", Some("   ".to_owned())),
            ("COMPLAINTS_POOL_MAX_SIZE", None),
            ("COMPLAINTS_RUN_MIGRATIONS", None),
        ]);

        assert!(load_from_empty_args().database_url().is_none());
    }

    #[rstest]
    fn malformed_bind_address_is_reported() {
        let settings = ServerSettings {
            bind_addr: Some("localhost".to_owned()),
            database_url: None,
            pool_max_size: None,
            run_migrations: true,
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
    }
}

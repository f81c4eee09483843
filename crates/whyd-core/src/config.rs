//! Configuration: listening port, consent document paths, asset locations.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CONSENT_EN: &str = "config/gdpr-consent-en.md";
pub const DEFAULT_CONSENT_FR: &str = "config/gdpr-consent-fr.md";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_SESSION_COOKIE: &str = "whydSid";
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Markdown source of the consent text, one file per supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentSources {
    /// English document (`config/gdpr-consent-en.md`).
    pub en: PathBuf,
    /// French document (`config/gdpr-consent-fr.md`).
    pub fr: PathBuf,
}

impl ConsentSources {
    /// Both documents under a common directory, using the default file names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            en: dir.join("gdpr-consent-en.md"),
            fr: dir.join("gdpr-consent-fr.md"),
        }
    }
}

impl Default for ConsentSources {
    fn default() -> Self {
        Self {
            en: PathBuf::from(DEFAULT_CONSENT_EN),
            fr: PathBuf::from(DEFAULT_CONSENT_FR),
        }
    }
}

/// Top-level server configuration.
#[derive(Debug, Clone)]
pub struct WhydConfig {
    /// HTTP server port.
    pub port: u16,
    /// Consent documents, read once at startup.
    pub consent_sources: ConsentSources,
    /// Directory holding `css/` and `images/`.
    pub public_dir: PathBuf,
    /// Name of the cookie carrying the session id.
    pub session_cookie: String,
    /// Where unauthenticated visitors are sent.
    pub login_path: String,
    /// Session id registered for a demo user at startup, if any.
    pub dev_session: Option<String>,
}

impl Default for WhydConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            consent_sources: ConsentSources::default(),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
            session_cookie: DEFAULT_SESSION_COOKIE.into(),
            login_path: DEFAULT_LOGIN_PATH.into(),
            dev_session: None,
        }
    }
}

impl WhydConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`WhydConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {raw:?}")))?,
            None => defaults.port,
        };

        let consent_sources = ConsentSources {
            en: lookup("WHYD_CONSENT_EN")
                .map(PathBuf::from)
                .unwrap_or(defaults.consent_sources.en),
            fr: lookup("WHYD_CONSENT_FR")
                .map(PathBuf::from)
                .unwrap_or(defaults.consent_sources.fr),
        };

        let dev_session = lookup("WHYD_DEV_SESSION").filter(|sid| !sid.trim().is_empty());

        Ok(Self {
            port,
            consent_sources,
            public_dir: lookup("WHYD_PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.public_dir),
            session_cookie: lookup("WHYD_SESSION_COOKIE").unwrap_or(defaults.session_cookie),
            login_path: lookup("WHYD_LOGIN_PATH").unwrap_or(defaults.login_path),
            dev_session,
        })
    }
}

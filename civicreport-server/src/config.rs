//! Service configuration

use crate::notify::SmtpConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// Shared token presented at the solver elevation endpoint
    pub solver_token: String,

    /// Shared secret presented at the admin elevation endpoint
    pub admin_secret: String,

    /// Directory uploaded images are written to (served under /uploads)
    pub upload_dir: String,

    /// Fixed session lifetime; sessions are trusted until they expire
    pub session_ttl_minutes: i64,

    /// SQLite database path; None runs fully in memory
    pub database: Option<String>,

    /// SMTP configuration for the notifier; None logs to console
    pub smtp: Option<SmtpConfig>,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// development defaults.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Self {
            port: env_var("CIVICREPORT_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            solver_token: env_var("CIVICREPORT_SOLVER_TOKEN").unwrap_or(defaults.solver_token),
            admin_secret: env_var("CIVICREPORT_ADMIN_SECRET").unwrap_or(defaults.admin_secret),
            upload_dir: env_var("CIVICREPORT_UPLOAD_DIR").unwrap_or(defaults.upload_dir),
            session_ttl_minutes: env_var("CIVICREPORT_SESSION_TTL_MINUTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.session_ttl_minutes),
            database: env_var("CIVICREPORT_DATABASE"),
            smtp: SmtpConfig::from_env(),
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            solver_token: "solver-token-dev".to_string(),
            admin_secret: "admin-secret-dev".to_string(),
            upload_dir: "uploads".to_string(),
            session_ttl_minutes: 24 * 60,
            database: None,
            smtp: None,
        }
    }
}

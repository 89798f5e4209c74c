use std::env;
use std::path::PathBuf;

use crate::app::analytics_config::DEFAULT_MIN_COOCCURRENCE;

/// Default location of the snapshot when `DB_PATH` is not set
const DEFAULT_DB_PATH: &str = "data/toys_and_models.sqlite";

#[derive(Clone)]
pub struct Config {
    /// Path to the read-only SQLite snapshot
    pub db_path: PathBuf,
    /// Directory holding versioned SQL reports (falls back to built-in copies)
    pub queries_dir: PathBuf,
    pub port: u16,
    /// Log level used when RUST_LOG is not set
    pub log_level: Option<String>,
    pub dashboard_title: String,
    /// Minimum co-occurrence for a product pair to appear in cross-sell
    pub cross_sell_min_cooccurrence: u32,
    /// Bearer token for POST /admin/reload (reload disabled when unset)
    pub admin_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            db_path: env::var("DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH)),
            queries_dir: env::var("QUERIES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("queries")),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8050),
            log_level: env::var("LOG_LEVEL").ok().map(|l| l.to_lowercase()),
            dashboard_title: env::var("DASHBOARD_TITLE")
                .unwrap_or_else(|_| "Classic Models Sales Analytics Dashboard".to_string()),
            cross_sell_min_cooccurrence: env::var("CROSS_SELL_MIN_COOCCURRENCE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MIN_COOCCURRENCE),
            admin_token: env::var("ADMIN_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }

    /// SQLite connection URL for the snapshot, opened read-only
    pub fn database_url(&self) -> String {
        format!("sqlite://{}?mode=ro", self.db_path.display())
    }

    /// Check if the reload endpoint is enabled
    pub fn reload_enabled(&self) -> bool {
        self.admin_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_path(path: &str) -> Config {
        Config {
            db_path: PathBuf::from(path),
            queries_dir: PathBuf::from("queries"),
            port: 8050,
            log_level: None,
            dashboard_title: "Test".to_string(),
            cross_sell_min_cooccurrence: DEFAULT_MIN_COOCCURRENCE,
            admin_token: None,
        }
    }

    #[test]
    fn cross_sell_minimum_defaults_to_threshold() {
        std::env::remove_var("CROSS_SELL_MIN_COOCCURRENCE");
        let config = Config::from_env();
        assert_eq!(config.cross_sell_min_cooccurrence, DEFAULT_MIN_COOCCURRENCE);
    }

    #[test]
    fn database_url_is_read_only() {
        let config = config_with_path("/data/toys_and_models.sqlite");
        assert_eq!(
            config.database_url(),
            "sqlite:///data/toys_and_models.sqlite?mode=ro"
        );
    }

    #[test]
    fn reload_disabled_without_token() {
        let mut config = config_with_path("x.sqlite");
        assert!(!config.reload_enabled());

        config.admin_token = Some("secret".to_string());
        assert!(config.reload_enabled());
    }
}

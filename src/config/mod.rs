use std::env;

/// Config holds all application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub db_max_connections: u32,
    pub listen_addr: String,
    pub app_base_path: String,
    pub frontend_dir: String,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        Self {
            db_path: get_env("DB_PATH", "/data/port_details.db"),
            db_max_connections: get_env("DB_MAX_CONNECTIONS", "5")
                .parse()
                .unwrap_or(5),
            listen_addr: get_env("LISTEN_ADDR", "0.0.0.0:8080"),
            app_base_path: normalize_base_path(&get_env("APP_CONTEXT", "/openkilda")),
            frontend_dir: get_env("FRONTEND_DIR", "/app/frontend"),
        }
    }

    /// Route the page is sent to when it has no valid state
    pub fn switch_listing_path(&self) -> String {
        crate::hydrator::switch_listing_path(&self.app_base_path)
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Leading slash, no trailing slash. An empty or "/" context maps to "".
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

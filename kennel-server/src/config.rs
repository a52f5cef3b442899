use std::env;

use kennel_core::{KennelConfig, DEFAULT_PAGE_SIZE};

/// Prefix for `KENNEL__A__B=value` overrides.
pub const ENV_PREFIX: &str = "KENNEL";

/// `database.url` value that selects the process-local store.
pub const MEMORY_STORE: &str = "memory";

/// Build the application configuration from the process environment.
///
/// Plain variables (`HTTP_PORT`, `DATABASE_URL`, ...) are read first, then
/// `KENNEL__*` overrides are layered on top.
pub fn config() -> KennelConfig {
    let mut config = KennelConfig::new();

    configure_http(&mut config);
    configure_database(&mut config);
    configure_pagination(&mut config);

    config.load_env(ENV_PREFIX);
    config
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn configure_http(config: &mut KennelConfig) {
    config.set("http.host", var_or("HTTP_HOST", "127.0.0.1"));
    config.set("http.port", var_or("HTTP_PORT", "8080"));
}

fn configure_database(config: &mut KennelConfig) {
    config.set("database.url", var_or("DATABASE_URL", "sqlite://kennel.db?mode=rwc"));
    config.set("database.maxConnections", var_or("DATABASE_MAX_CONNECTIONS", "5"));
}

fn configure_pagination(config: &mut KennelConfig) {
    config.set(
        "paginate.pageSize",
        var_or("PAGINATE_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string()),
    );
}

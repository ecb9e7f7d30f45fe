use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_access_token_expiry_secs: i64,
    pub jwt_refresh_token_expiry_secs: i64,
    pub frontend_url: String,
    pub app_env: String,
    /// Sales tax applied at order placement, in basis points (825 = 8.25%).
    pub tax_rate_bps: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10),
            host: env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or("BACKEND_PORT", 3000),
            jwt_secret: env::var("JWT_SECRET")?,
            jwt_access_token_expiry_secs: parse_or("JWT_ACCESS_TOKEN_EXPIRY_SECS", 900),
            jwt_refresh_token_expiry_secs: parse_or("JWT_REFRESH_TOKEN_EXPIRY_SECS", 604800),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            tax_rate_bps: parse_or("TAX_RATE_BPS", 0),
        })
    }

    /// Production builds never echo internal error detail to clients.
    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_env(app_env: &str) -> AppConfig {
        AppConfig {
            database_url: "postgres://localhost/test".to_string(),
            database_max_connections: 1,
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "secret".to_string(),
            jwt_access_token_expiry_secs: 900,
            jwt_refresh_token_expiry_secs: 604800,
            frontend_url: "http://localhost:3001".to_string(),
            app_env: app_env.to_string(),
            tax_rate_bps: 0,
        }
    }

    #[test]
    fn production_detection_is_case_insensitive() {
        assert!(config_with_env("production").is_production());
        assert!(config_with_env("Production").is_production());
        assert!(!config_with_env("development").is_production());
        assert!(!config_with_env("staging").is_production());
    }

    #[test]
    fn parse_or_falls_back_on_missing_or_malformed() {
        assert_eq!(parse_or::<u16>("ISP_PORTAL_TEST_UNSET_VAR", 42), 42);
        std::env::set_var("ISP_PORTAL_TEST_BAD_NUMBER", "not-a-number");
        assert_eq!(parse_or::<i64>("ISP_PORTAL_TEST_BAD_NUMBER", 7), 7);
    }
}

//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{bail, Context, Result};
use std::env;
use std::str::FromStr;

/// Secreto por defecto, sólo aceptado fuera de producción
const DEV_JWT_SECRET: &str = "dev-only-change-me";

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window: u64,
    /// Sólo detrás de un proxy propio se acepta X-Forwarded-For
    pub trust_proxy: bool,
    // Monitor del pool de conexiones
    pub monitor_interval_secs: u64,
    pub pool_usage_warn_percent: u32,
    pub slow_ping_ms: u64,
    // Admin inicial
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_expiration: 12 * 3600,
            cors_origins: vec!["*".to_string()],
            rate_limit_requests: 10,
            rate_limit_window: 60,
            trust_proxy: false,
            monitor_interval_secs: 60,
            pool_usage_warn_percent: 80,
            slow_ping_ms: 500,
            admin_email: None,
            admin_password: None,
        }
    }
}

/// Leer una variable opcional y parsearla, con valor por defecto
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} debe ser un valor válido (recibido '{}')", name, raw)),
        _ => Ok(default),
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl EnvironmentConfig {
    /// Construir la configuración desde las variables de entorno
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let environment = non_empty_var("ENVIRONMENT").unwrap_or(defaults.environment);

        let jwt_secret = match non_empty_var("JWT_SECRET") {
            Some(secret) => secret,
            None if environment == "production" => {
                bail!("JWT_SECRET must be set in production")
            }
            None => defaults.jwt_secret,
        };

        let cors_origins = non_empty_var("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.cors_origins);

        let config = Self {
            port: parse_var("PORT", defaults.port)?,
            host: non_empty_var("HOST").unwrap_or(defaults.host),
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", defaults.jwt_expiration)?,
            cors_origins,
            rate_limit_requests: parse_var("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)?,
            rate_limit_window: parse_var("RATE_LIMIT_WINDOW", defaults.rate_limit_window)?,
            trust_proxy: parse_var("TRUST_PROXY", defaults.trust_proxy)?,
            monitor_interval_secs: parse_var("MONITOR_INTERVAL_SECS", defaults.monitor_interval_secs)?,
            pool_usage_warn_percent: parse_var("POOL_USAGE_WARN_PERCENT", defaults.pool_usage_warn_percent)?,
            slow_ping_ms: parse_var("SLOW_PING_MS", defaults.slow_ping_ms)?,
            admin_email: non_empty_var("ADMIN_EMAIL"),
            admin_password: non_empty_var("ADMIN_PASSWORD"),
            environment,
        };

        if config.rate_limit_requests == 0 {
            bail!("RATE_LIMIT_REQUESTS must be greater than 0");
        }

        Ok(config)
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// CORS abierto cuando se configura "*"
    pub fn cors_is_permissive(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_development_friendly() {
        let config = EnvironmentConfig::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert!(config.cors_is_permissive());
        assert!(!config.trust_proxy);
        assert_eq!(config.server_url(), "0.0.0.0:3000");
    }

    #[test]
    fn parse_var_falls_back_and_rejects_garbage() {
        assert_eq!(parse_var::<u16>("TAXI_FLEET_TEST_UNSET_VAR", 42).unwrap(), 42);

        env::set_var("TAXI_FLEET_TEST_BAD_PORT", "not-a-port");
        assert!(parse_var::<u16>("TAXI_FLEET_TEST_BAD_PORT", 3000).is_err());
        env::remove_var("TAXI_FLEET_TEST_BAD_PORT");

        env::set_var("TAXI_FLEET_TEST_GOOD_PORT", " 8080 ");
        assert_eq!(parse_var::<u16>("TAXI_FLEET_TEST_GOOD_PORT", 3000).unwrap(), 8080);
        env::remove_var("TAXI_FLEET_TEST_GOOD_PORT");
    }
}

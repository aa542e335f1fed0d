//! Middleware de Rate Limiting
//!
//! Limita los intentos de login por IP en una ventana fija.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::warn;

use crate::{config::EnvironmentConfig, state::AppState, utils::errors::AppError};

/// Estructura para almacenar información de rate limiting por IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
    trust_proxy: bool,
}

impl RateLimitState {
    pub fn new(config: &EnvironmentConfig) -> Self {
        let mut state =
            Self::with_limits(config.rate_limit_requests, Duration::from_secs(config.rate_limit_window));
        state.trust_proxy = config.trust_proxy;
        state
    }

    pub fn with_limits(max_requests: u32, window_duration: Duration) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration,
            trust_proxy: false,
        }
    }

    /// Registrar una request y devolver si la IP sigue dentro del límite
    pub async fn check_rate_limit(&self, ip: &str) -> bool {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if info.requests >= self.max_requests {
            return false;
        }

        info.requests += 1;
        true
    }
}

/// IP del cliente: la del socket, o el primer valor de x-forwarded-for
/// cuando el servidor corre detrás de un proxy de confianza
pub fn client_ip(request: &Request, trust_proxy: bool) -> String {
    if trust_proxy {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());
        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware de rate limiting para el login
pub async fn login_rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request, state.login_limiter.trust_proxy);

    if !state.login_limiter.check_rate_limit(&ip).await {
        warn!("🚫 Demasiados intentos de login desde {}", ip);
        return Err(AppError::RateLimitExceeded);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;

    #[tokio::test]
    async fn blocks_after_max_requests_in_window() {
        let limiter = RateLimitState::with_limits(2, Duration::from_secs(60));

        assert!(limiter.check_rate_limit("10.0.0.1").await);
        assert!(limiter.check_rate_limit("10.0.0.1").await);
        assert!(!limiter.check_rate_limit("10.0.0.1").await);

        // otra IP tiene su propio contador
        assert!(limiter.check_rate_limit("10.0.0.2").await);
    }

    #[tokio::test]
    async fn window_expiry_resets_counter() {
        let limiter = RateLimitState::with_limits(1, Duration::from_millis(20));

        assert!(limiter.check_rate_limit("10.0.0.1").await);
        assert!(!limiter.check_rate_limit("10.0.0.1").await);

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(limiter.check_rate_limit("10.0.0.1").await);
    }

    fn from_peer(peer: &str, forwarded: Option<&str>) -> Request {
        let mut builder = http::Request::builder();
        if let Some(value) = forwarded {
            builder = builder.header("x-forwarded-for", value);
        }
        let mut request = builder.body(Body::empty()).unwrap();
        let addr: SocketAddr = peer.parse().unwrap();
        request.extensions_mut().insert(ConnectInfo(addr));
        request
    }

    #[test]
    fn forwarded_header_is_ignored_without_trusted_proxy() {
        let request = from_peer("198.51.100.4:51234", Some("203.0.113.7"));
        assert_eq!(client_ip(&request, false), "198.51.100.4");
    }

    #[test]
    fn trusted_proxy_uses_first_forwarded_ip() {
        let request = from_peer("10.0.0.1:443", Some("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_ip(&request, true), "203.0.113.7");

        // cabecera vacía: se vuelve al socket
        let empty = from_peer("10.0.0.1:443", Some(" "));
        assert_eq!(client_ip(&empty, true), "10.0.0.1");
    }

    #[test]
    fn missing_connect_info_falls_back_to_unknown() {
        let bare = http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&bare, false), "unknown");
    }

    #[test]
    fn trust_proxy_comes_from_config() {
        let config = EnvironmentConfig {
            trust_proxy: true,
            ..EnvironmentConfig::default()
        };
        assert!(RateLimitState::new(&config).trust_proxy);
        assert!(!RateLimitState::with_limits(1, Duration::from_secs(1)).trust_proxy);
    }
}

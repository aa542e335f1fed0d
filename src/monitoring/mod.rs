//! Monitor periódico del pool de conexiones
//!
//! Tarea en background que registra el uso del pool y avisa cuando se
//! superan los umbrales configurados. Sólo escribe logs.

use sqlx::PgPool;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::environment::EnvironmentConfig;
use crate::database::health::{check_database, DatabaseHealth, PoolStats};

/// Umbrales del monitor
#[derive(Debug, Clone, Copy)]
pub struct MonitorThresholds {
    pub pool_usage_warn_percent: u32,
    pub slow_ping_ms: u64,
}

impl From<&EnvironmentConfig> for MonitorThresholds {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            pool_usage_warn_percent: config.pool_usage_warn_percent,
            slow_ping_ms: config.slow_ping_ms,
        }
    }
}

/// Clasificación de una muestra
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorLevel {
    Ok,
    Warning(Vec<String>),
    Down(String),
}

/// Clasificar una muestra de health contra los umbrales
pub fn evaluate(sample: &DatabaseHealth, thresholds: &MonitorThresholds) -> MonitorLevel {
    if !sample.is_healthy() {
        return MonitorLevel::Down(
            sample
                .error
                .clone()
                .unwrap_or_else(|| "base de datos inaccesible".to_string()),
        );
    }

    let mut warnings = Vec::new();
    let usage = sample.pool.usage_percent();
    if usage >= thresholds.pool_usage_warn_percent {
        warnings.push(format!(
            "uso del pool {}% ({} / {})",
            usage,
            sample.pool.in_use(),
            sample.pool.max_connections
        ));
    }
    if sample.latency_ms >= thresholds.slow_ping_ms {
        warnings.push(format!("ping lento {} ms", sample.latency_ms));
    }

    if warnings.is_empty() {
        MonitorLevel::Ok
    } else {
        MonitorLevel::Warning(warnings)
    }
}

/// Monitor del pool PostgreSQL
#[derive(Clone)]
pub struct PoolMonitor {
    pool: PgPool,
    interval: Duration,
    thresholds: MonitorThresholds,
}

impl PoolMonitor {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            pool,
            interval: Duration::from_secs(config.monitor_interval_secs.max(1)),
            thresholds: MonitorThresholds::from(config),
        }
    }

    /// Tomar una muestra y registrarla
    pub async fn sample(&self) -> MonitorLevel {
        let health = check_database(&self.pool).await;
        let level = evaluate(&health, &self.thresholds);
        log_sample(&health.pool, health.latency_ms, &level);
        level
    }

    /// Lanzar el loop en background
    pub fn spawn(self) -> JoinHandle<()> {
        info!(
            "📈 Monitor del pool activo (cada {}s, aviso a {}% / {} ms)",
            self.interval.as_secs(),
            self.thresholds.pool_usage_warn_percent,
            self.thresholds.slow_ping_ms
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            loop {
                interval.tick().await;
                self.sample().await;
            }
        })
    }
}

fn log_sample(stats: &PoolStats, latency_ms: u64, level: &MonitorLevel) {
    match level {
        MonitorLevel::Ok => debug!(
            "📊 Pool: {} conexiones ({} libres), ping {} ms",
            stats.size, stats.idle, latency_ms
        ),
        MonitorLevel::Warning(reasons) => warn!("⚠️ Pool bajo presión: {}", reasons.join(", ")),
        MonitorLevel::Down(reason) => error!("❌ Base de datos inaccesible: {}", reason),
    }
}

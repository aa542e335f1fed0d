//! Health check de PostgreSQL
//!
//! Ping con latencia, estadísticas del pool y versión del servidor.

use serde::Serialize;
use sqlx::PgPool;
use std::time::Instant;

/// Estadísticas instantáneas del pool
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PoolStats {
    pub size: u32,
    pub idle: u32,
    pub max_connections: u32,
}

impl PoolStats {
    pub fn from_pool(pool: &PgPool) -> Self {
        Self {
            size: pool.size(),
            idle: pool.num_idle() as u32,
            max_connections: pool.options().get_max_connections(),
        }
    }

    /// Conexiones en uso
    pub fn in_use(&self) -> u32 {
        self.size.saturating_sub(self.idle)
    }

    /// Porcentaje de uso respecto al máximo configurado
    pub fn usage_percent(&self) -> u32 {
        if self.max_connections == 0 {
            return 0;
        }
        self.in_use() * 100 / self.max_connections
    }
}

/// Resultado del health check de la base de datos
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseHealth {
    pub status: &'static str,
    pub latency_ms: u64,
    pub server_version: Option<String>,
    pub pool: PoolStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatabaseHealth {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Ejecutar `SELECT version()` midiendo la latencia
pub async fn check_database(pool: &PgPool) -> DatabaseHealth {
    let start = Instant::now();
    let result: Result<(String,), sqlx::Error> =
        sqlx::query_as("SELECT version()").fetch_one(pool).await;
    let latency_ms = start.elapsed().as_millis() as u64;
    let pool_stats = PoolStats::from_pool(pool);

    match result {
        Ok((version,)) => DatabaseHealth {
            status: "healthy",
            latency_ms,
            server_version: Some(version),
            pool: pool_stats,
            error: None,
        },
        Err(e) => {
            tracing::error!("❌ Health check de base de datos falló: {}", e);
            DatabaseHealth {
                status: "unhealthy",
                latency_ms,
                server_version: None,
                pool: pool_stats,
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_percent_counts_busy_connections() {
        let stats = PoolStats {
            size: 10,
            idle: 2,
            max_connections: 20,
        };
        assert_eq!(stats.in_use(), 8);
        assert_eq!(stats.usage_percent(), 40);
    }

    #[test]
    fn usage_percent_handles_degenerate_pools() {
        let empty = PoolStats {
            size: 0,
            idle: 0,
            max_connections: 0,
        };
        assert_eq!(empty.usage_percent(), 0);

        let odd = PoolStats {
            size: 1,
            idle: 3,
            max_connections: 5,
        };
        assert_eq!(odd.in_use(), 0);
    }
}

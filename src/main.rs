use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use taxi_fleet::config::EnvironmentConfig;
use taxi_fleet::controllers::auth_controller::AuthController;
use taxi_fleet::database::DatabaseConnection;
use taxi_fleet::monitoring::PoolMonitor;
use taxi_fleet::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚕 Taxi Fleet - API de gestión de flota");
    info!("=======================================");

    let config = EnvironmentConfig::from_env()?;
    info!("⚙️ Entorno: {}", config.environment);

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    db_connection.run_migrations().await?;
    let pool = db_connection.pool().clone();

    let app_state = AppState::new(pool.clone(), config.clone());

    // Administrador inicial
    match (&config.admin_email, &config.admin_password) {
        (Some(email), Some(password)) => {
            let auth = AuthController::new(pool.clone(), app_state.jwt.clone());
            if !auth.ensure_admin(email, password).await? {
                info!("👤 Ya existe un administrador, ADMIN_EMAIL ignorado");
            }
        }
        _ => warn!("⚠️ ADMIN_EMAIL / ADMIN_PASSWORD no definidos: no se crea administrador inicial"),
    }

    // Monitor del pool en background
    let monitor = PoolMonitor::new(pool, &config).spawn();

    let app = taxi_fleet::create_app(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health, /health/db - Estado del servicio");
    info!("🔐 Auth:");
    info!("   POST /api/auth/login - Login (rate limited)");
    info!("   GET  /api/auth/me - Cuenta actual");
    info!("   POST /api/auth/change-password - Cambiar contraseña");
    info!("🧑‍✈️ Tablero chauffeur (/api/driver):");
    info!("   GET|POST /shifts - Feuilles de route");
    info!("   GET|PUT|DELETE /shifts/:id - Detalle / autoguardado / borrar");
    info!("   POST /shifts/:id/close - Cerrar feuille de route");
    info!("   GET  /shifts/:id/report[?format=text] - Reporte imprimible");
    info!("   POST /shifts/:id/trips, PUT|DELETE /trips/:id - Courses");
    info!("   POST /shifts/:id/expenses, PUT|DELETE /expenses/:id - Charges");
    info!("   GET  /summary?year=&month= - Resumen mensual");
    info!("🏢 Back-office (/api/admin):");
    info!("   CRUD /drivers /vehicles /clients /partners /interventions");
    info!("   CRUD /salary-rules /billing-rules");
    info!("   GET  /shifts, /invoices, POST /invoices/generate");
    info!("   GET|PUT /company, GET /dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
    }

    monitor.abort();
    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tractor_agency::{
    config::EnvironmentConfig, create_app_router, database::DatabaseConnection, AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging: RUST_LOG tiene prioridad sobre LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🚜 Tractor Agency - API de gestión");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);
    if !config.is_production() && std::env::var("JWT_SECRET").is_err() {
        warn!("⚠️ JWT_SECRET no definido, usando secreto de desarrollo");
    }

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new(&config).await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    db_connection.run_migrations().await?;
    if config.seed_default_users {
        db_connection.seed_default_users().await?;
    }

    let addr = config.server_url();
    let app = create_app_router(AppState::new(db_connection.pool().clone(), config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /api/health - Health check");
    info!("   POST /api/login - Login");
    info!("   GET  /api/me - Usuario actual");
    info!("   GET|POST /api/users - Usuarios (admin)");
    info!("🚜 Tractores:");
    info!("   GET|POST /api/tractors, GET|PUT|DELETE /api/tractors/:id");
    info!("   POST /api/tractors/:id/sell - Venta con o sin permuta");
    info!("   /api/tractors/brands, /api/tractors/models - Catálogo");
    info!("🔩 Repuestos:");
    info!("   GET|POST /api/parts, GET|PUT|DELETE /api/parts/:id");
    info!("   POST /api/parts/:id/sell - Venta de repuestos");
    info!("   /api/parts/categories, /api/parts/names - Catálogo");
    info!("🔧 Servicios: GET|POST /api/services, GET|PUT|DELETE /api/services/:id");
    info!("💸 Gastos: GET|POST /api/expenses, GET|PUT|DELETE /api/expenses/:id, GET /api/expenses/summary");
    info!("📊 Reportes:");
    info!("   GET  /api/dashboard");
    info!("   GET  /api/reports/profit-loss (admin)");
    info!("   GET  /api/reports/transactions");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
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

use anyhow::Result;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use car_rental::config::environment::EnvironmentConfig;
use car_rental::database::DatabaseConnection;
use car_rental::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use car_rental::routes::create_app_router;
use car_rental::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenvy::dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("🚗 Car Rental API");
    info!("=================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    if let Err(e) = db_connection.run_migrations().await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(e);
    }

    let pool = db_connection.pool().clone();
    let app_state = AppState::new(pool, config.clone());

    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app = create_app_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   POST /api/auth/register - Registro de usuario");
    info!("   POST /api/auth/login - Login");
    info!("   GET  /api/autos - Listar vehículos");
    info!("   GET  /api/autos/search - Búsqueda filtrada");
    info!("   GET  /api/autos/:id - Obtener vehículo");
    info!("   POST /api/autos - Crear vehículo (admin)");
    info!("   PUT  /api/autos/:id - Actualizar vehículo (admin)");
    info!("   DELETE /api/autos/:id - Eliminar vehículo (admin)");
    info!("   GET  /api/catalogo - Catálogo (espejo de solo lectura)");
    info!("   GET  /api/usuarios - Listar usuarios (admin)");
    info!("   GET  /api/usuarios/:id - Perfil (propio o admin)");
    info!("   POST /api/reservas - Crear reserva");
    info!("   GET  /api/reservas - Listar reservas");
    info!("   PUT  /api/reservas/:id/cancelar - Cancelar reserva");
    info!("   GET  /api/reservas/:id/factura - Factura de reserva");
    info!("   POST /api/reservas/calcular-precio - Cotización");
    info!("   GET  /api/reservas/disponibilidad - Disponibilidad por rango");
    info!("   GET  /api/checklist/:vehiculo_id - Checklist del vehículo");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            anyhow::anyhow!(e)
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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

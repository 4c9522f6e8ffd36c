use planeacion_core::{ServerConfig, logging};
use planeacion_server::{AppState, create_router};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    let _log_guard = logging::init_logging(&config)?;

    let addr = config.listen_addr();
    info!("INICIANDO SERVIDOR PLANTCHER WORD");
    info!("Servidor ejecutándose en puerto: {}", addr.port());
    info!("Rutas disponibles:");
    info!("   POST /generar-word - Generar documento Word");
    info!("   GET  /test        - Prueba de conectividad");
    info!("   POST /test-post   - Prueba de solicitudes POST");
    info!("   GET  /modalidades - Lista de modalidades");

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

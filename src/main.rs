use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bombona_tracking::build_app;
use bombona_tracking::config::environment::EnvironmentConfig;
use bombona_tracking::database::FileBackend;
use bombona_tracking::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bombona_tracking=debug,tower_http=info")),
        )
        .init();

    info!("🛢️ Bombona Tracking - Registro de recogidas");
    info!("==========================================");

    let config = EnvironmentConfig::default();
    if config.is_production() && config.jwt_secret == "dev-secret" {
        warn!("⚠️ JWT_SECRET no configurado en producción");
    }

    // Inicializar almacén
    let backend = match FileBackend::new(config.data_dir.clone()).await {
        Ok(backend) => {
            info!("✅ Almacén JSON en {}", backend.data_dir().display());
            backend
        }
        Err(e) => {
            error!("❌ Error preparando el directorio de datos: {}", e);
            return Err(anyhow::anyhow!("Error de almacenamiento: {}", e));
        }
    };

    let state = AppState::new(config.clone(), Arc::new(backend));
    if state.bootstrap_admin().await? {
        info!("👤 Administrador inicial: {}", config.admin_email);
    }

    let app = build_app(state);
    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET   /health");
    info!("   POST  /api/login | /api/logout");
    info!("   GET   /api/me");
    info!("   GET   /api/users | POST /api/users (admin)");
    info!("   GET   /api/fichas | POST /api/fichas");
    info!("   GET   /api/fichas/:id");
    info!("   PATCH /api/fichas/:id/status");
    info!("   POST  /api/fichas/:id/signature");
    info!("   GET   /api/tracking?ficha_id= | POST /api/tracking");
    info!("   GET   /api/tracking/summary");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
    }

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
            Ok(mut stream) => {
                stream.recv().await;
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

use std::{net::SocketAddr, sync::Arc};

use tokio::signal;
use tracing::{error, info};

use stockroom_api as api;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = api::config::load_config()?;
    api::config::init_tracing(cfg.log_level(), cfg.log_json);

    // Init DB
    let db_pool = api::db::establish_connection_from_app_config(&cfg).await?;
    if cfg.auto_migrate {
        api::db::run_migrations(&db_pool).await.map_err(|e| {
            error!("Failed running migrations: {}", e);
            e
        })?;
    }

    let db_arc = Arc::new(db_pool);
    let app_state = api::AppState::new(db_arc.clone(), cfg.clone());
    let access_logger = api::logging::setup_logger(api::logging::LoggerConfig::default());
    let app = api::build_app(app_state, access_logger);

    let ip: std::net::IpAddr = cfg.host.parse()?;
    let addr = SocketAddr::new(ip, cfg.port);
    info!("stockroom-api listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped; closing database pool");
    if let Ok(pool) = Arc::try_unwrap(db_arc) {
        api::db::close_pool(pool).await?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/*****************************************************************************************
 *
 *  users-api – In-memory users resource service
 *  --------------------------------------------
 *
 *  GET/POST /users, GET/PUT/DELETE /users/:id, /system/alive, /system/version
 *
 *****************************************************************************************/

use std::net::SocketAddr;
use std::process::ExitCode;

use tokio::net::TcpListener;
use users_api::config::{AppConfig, CONFIG_ENV};
use users_api::errors::ServerError;
use users_api::logging::init_logging;
use users_api::{build_app, new_store};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    //
    // ────────────────────────────────────────────────────────
    //  Load configuration (env override, EXE folder, parent)
    // ────────────────────────────────────────────────────────
    //
    let config_path = AppConfig::locate();
    let loaded = config_path.as_deref().map(AppConfig::load_from_file);

    let cfg = match &loaded {
        Some(Ok(cfg)) => cfg.clone(),
        _ => AppConfig::default(),
    };

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging (RUST_LOG wins over config)
    // ────────────────────────────────────────────────────────
    //
    init_logging(&cfg.log_level);

    match (loaded, &config_path) {
        (Some(Err(e)), _) => return Err(e.into()),
        (Some(Ok(_)), Some(path)) => tracing::info!("Loaded config from {}", path.display()),
        _ => tracing::warn!(
            "No config.json found (set {CONFIG_ENV} to point at one), using defaults"
        ),
    }

    tracing::info!("Starting users-api…");
    tracing::debug!("Configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Create the store from the seed records
    // ────────────────────────────────────────────────────────
    //
    let store = new_store(cfg.id_policy, cfg.seed_users.clone());
    {
        let users = users_api::state::users::read(&store);
        tracing::info!(
            seeded = users.len(),
            policy = ?users.policy(),
            "User store ready"
        );
    }

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let app = build_app(store, cfg.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Goodbye.");
    Ok(())
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Cannot listen for CTRL+C ({e}), running until killed");
        std::future::pending::<()>().await;
    }

    tracing::warn!("CTRL+C received, shutting down…");
}

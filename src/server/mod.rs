//! Web server module for the expense API

pub mod http;

use anyhow::{Context, Result};
use axum::{
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::expense::store::{ExpenseStore, InMemoryStore};

/// Shared server state
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Arc<dyn ExpenseStore>,
}

impl ServerState {
    /// Build state with the store seeded from the config
    pub fn from_config(config: Config) -> Result<Self> {
        let seed = config.seed_entries()?;
        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(InMemoryStore::with_seed(seed)),
        })
    }
}

/// Build the application router
pub fn router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/expense",
            get(http::list_expenses_handler).post(http::create_expense_handler),
        )
        .route(
            "/expense/{id}",
            get(http::get_expense_handler)
                .put(http::update_expense_handler)
                .delete(http::delete_expense_handler),
        )
        .route("/status", get(http::status_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the web server
pub async fn start(
    host: &str,
    port: u16,
    https: bool,
    cert: Option<String>,
    key: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let state = ServerState::from_config(config)?;
    let seeded = state.store.list().len();

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let app = router(state);

    // Print startup message
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("     Budgeteer Server Starting");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();
    println!("✓ Server binding to: {}", addr);

    if https {
        println!("✓ HTTPS enabled");
    } else {
        println!("⚠ HTTPS disabled");
    }

    if seeded > 0 {
        println!("✓ Seeded {} expense(s) from config", seeded);
    }

    println!();
    println!("🚀 Listening on http{}://{}", if https { "s" } else { "" }, addr);
    println!();

    info!("expense API listening on {}", addr);

    // HTTPS mode
    if https {
        if let (Some(cert_path), Some(key_path)) = (cert, key) {
            let cert_data = tokio::fs::read(&cert_path).await
                .context("Failed to read certificate file")?;
            let key_data = tokio::fs::read(&key_path).await
                .context("Failed to read key file")?;

            let config = axum_server::tls_rustls::RustlsConfig::from_pem(cert_data, key_data).await?;
            axum_server::bind_rustls(addr, config).serve(app.into_make_service()).await?;
            return Ok(());
        }
    }

    // HTTP mode
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}

//! Partner Directory Service — standalone binary for tracking business and
//! community partners of a career and technical education program.
//!
//! Hosts the RPC API. Default: http://127.0.0.1:9104/

mod backup;
mod db;
mod error;
mod responder;
mod routes;
mod validator;

use routes::AppState;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let port: u16 = std::env::var("PARTNER_DIRECTORY_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9104);

    let db_path = std::env::var("PARTNER_DIRECTORY_DB_PATH")
        .unwrap_or_else(|_| "./partners.db".to_string());

    let backup_dir = std::env::var("PARTNER_DIRECTORY_BACKUP_DIR")
        .unwrap_or_else(|_| "./backups".to_string());

    log::info!("Opening database at: {}", db_path);
    let database = Arc::new(db::Db::open(&db_path).expect("Failed to open database"));

    let backups = backup::BackupManager::new(&backup_dir);
    backups.init().expect("Failed to create backup directory");
    log::info!(
        "Snapshots will be written to: {}",
        backups.backup_dir().display()
    );

    let state = Arc::new(AppState {
        db: database,
        backups,
        start_time: Instant::now(),
        last_backup_at: Arc::new(Mutex::new(None)),
    });

    let cors = tower_http::cors::CorsLayer::permissive();

    let app = axum::Router::new()
        // Partner management
        .route(
            "/rpc/partners/search",
            axum::routing::get(routes::partners_search),
        )
        .route(
            "/rpc/partners/add",
            axum::routing::post(routes::partners_add),
        )
        .route(
            "/rpc/partners/:id",
            axum::routing::delete(routes::partners_delete),
        )
        // Q&A
        .route("/rpc/qa", axum::routing::get(routes::qa))
        // Service
        .route("/rpc/backup", axum::routing::post(routes::backup_now))
        .route("/rpc/stats", axum::routing::get(routes::stats))
        .route("/rpc/status", axum::routing::get(routes::status))
        .with_state(state)
        .layer(cors);

    let addr = format!("127.0.0.1:{}", port);
    log::info!("Partner Directory Service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app).await.expect("Server error");
}

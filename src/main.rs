use migration::{Migrator, MigratorTrait};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_service::{
    config::Config, db, repository::SeaOrmUserRepository, routers, state::AppState,
};

#[tokio::main]
async fn main() {
    // Initialize config
    let config = Config::init();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to database
    let db_conn = db::connect(&config)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Synchronize schema before accepting traffic
    Migrator::up(&db_conn, None)
        .await
        .expect("Failed to run migrations");

    tracing::info!("Database schema is up to date");

    // Initialize router with the repository wired into app state
    let state = AppState {
        user_repo: Arc::new(SeaOrmUserRepository::new(Arc::new(db_conn))),
    };
    let app = routers::init_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server_host, config.server_port)
        .parse()
        .expect("SERVER_HOST and SERVER_PORT must form a valid address");
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

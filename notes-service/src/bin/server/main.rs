use std::sync::Arc;

use auth::Authenticator;
use auth::TokenService;
use notes_service::config::Config;
use notes_service::domain::note::service::NoteService;
use notes_service::domain::user::service::UserService;
use notes_service::inbound::http::router::create_router;
use notes_service::outbound::database;
use notes_service::outbound::repositories::SqliteNoteRepository;
use notes_service::outbound::repositories::SqliteUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "notes-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        max_connections = config.database.max_connections,
        http_port = config.server.http_port,
        jwt_algorithm = %config.jwt.algorithm,
        jwt_ttl_seconds = config.jwt.ttl_seconds,
        "Configuration loaded"
    );

    // Refuse to start with a weak or unsupported signing configuration.
    let tokens = TokenService::new(config.jwt.token_settings()?)?;
    let authenticator = Arc::new(Authenticator::new(tokens));

    let pool = database::connect(&config.database).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "sqlite",
        "Database connection pool created"
    );

    database::migrate(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let note_repository = Arc::new(SqliteNoteRepository::new(pool));

    let user_service = Arc::new(UserService::new(
        user_repository,
        Arc::clone(&authenticator),
        config.password.hash_timeout(),
    ));
    let note_service = Arc::new(NoteService::new(note_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, note_service, authenticator);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

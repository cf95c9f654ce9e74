use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use insight_api::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use insight_api::config::ServerConfig;
use insight_api::export::{BrowserPdfClient, ExportConfig};
use insight_api::notifications::email::{EmailConfig, FeedbackMailer};
use insight_api::router::build_app_router;
use insight_api::state::AppState;
use insight_core::roles::ROLE_ADMIN;
use insight_db::models::user::CreateUser;
use insight_db::repositories::UserRepo;
use insight_db::DbPool;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "insight_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = insight_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    insight_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    insight_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    bootstrap_admin(&pool).await;

    // --- PDF export ---
    let export_config = ExportConfig::from_env();
    tracing::info!(service = %export_config.service_url, "PDF export service configured");
    let exporter = BrowserPdfClient::new(&export_config).expect("Failed to build PDF client");

    // --- Email ---
    let mailer = match EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(smtp_host = %email_config.smtp_host, "Feedback emails enabled");
            Some(Arc::new(FeedbackMailer::new(email_config)))
        }
        None => {
            tracing::info!("SMTP_HOST not set, feedback emails disabled");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        exporter: Arc::new(exporter),
        mailer,
    };

    let app = build_app_router(state, &config);

    // --- Serve ---
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST:PORT");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Create the first admin account from `BOOTSTRAP_ADMIN_EMAIL` /
/// `BOOTSTRAP_ADMIN_PASSWORD` when no active admin exists yet.
async fn bootstrap_admin(pool: &DbPool) {
    let (Ok(email), Ok(password)) = (
        std::env::var("BOOTSTRAP_ADMIN_EMAIL"),
        std::env::var("BOOTSTRAP_ADMIN_PASSWORD"),
    ) else {
        return;
    };

    let admins = UserRepo::count_active_admins(pool)
        .await
        .expect("Failed to count admin accounts");
    if admins > 0 {
        return;
    }

    validate_password_strength(&password, MIN_PASSWORD_LENGTH)
        .unwrap_or_else(|e| panic!("BOOTSTRAP_ADMIN_PASSWORD rejected: {e}"));
    let password_hash = hash_password(&password).expect("Failed to hash bootstrap password");

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: email.trim().to_lowercase(),
            name: Some("Administrator".into()),
            password_hash,
            role: ROLE_ADMIN.to_string(),
        },
    )
    .await
    .expect("Failed to create bootstrap admin");

    tracing::info!(user_id = user.id, email = %user.email, "Bootstrap admin created");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

mod config;
mod domain;
mod infrastructure;
mod presentation;
mod telemetry;
#[cfg(test)]
mod test_support;
mod usecase;

use sea_orm::{ConnectOptions, Database};
use tokio::{net::TcpListener, signal};

use crate::{
    config::AppConfig,
    domain::{error::DomainError, services::password_service::PasswordHasher},
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher, schema::ensure_schema,
        user_repository::PostgresUserRepository,
    },
    presentation::router::build_app,
    telemetry::init_tracing,
    usecase::register_user_usecase::RegisterUserUsecase,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    if config.auto_migrate {
        ensure_schema(&db).await?;
    }

    let user_repository = PostgresUserRepository::new(db);
    let password_hasher = Argon2PasswordHasher::with_cost(config.hash_cost)?;
    check_password_hasher(&password_hasher)?;
    let register_user_usecase = RegisterUserUsecase::new(user_repository, password_hasher);

    let app = build_app(register_user_usecase, config.cors_allowed_origin.clone());

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "registration service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("registration service stopped");
    Ok(())
}

/// Hash and verify a throwaway value so a broken hashing setup fails at
/// startup instead of on the first registration.
fn check_password_hasher<P: PasswordHasher>(hasher: &P) -> Result<(), DomainError> {
    const SAMPLE: &str = "startup-check";

    let hash = hasher.hash(SAMPLE)?;
    if hasher.verify(SAMPLE, &hash)? {
        Ok(())
    } else {
        Err(DomainError::PasswordHashing(
            "fresh hash did not verify".to_string(),
        ))
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}

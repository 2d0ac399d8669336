//! Backend entry-point: runs migrations, wires adapters, and serves HTTP.

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use diesel::prelude::*;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::domain::{RecommendationService, SkillService};
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::{configure_api, configure_health, HealthState, HttpState};
use backend::outbound::persistence::{
    DbPool, DieselRecommendationRepository, DieselSkillRepository, DieselTrailRepository,
    DieselUserRepository, PoolConfig,
};
use backend::server::AppConfig;
use backend::Trace;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| std::io::Error::other(format!("failed to connect for migrations: {err}")))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| std::io::Error::other(format!("failed to run migrations: {err}")))?;
    info!(count = applied.len(), "migrations applied");
    Ok(())
}

fn build_state(pool: DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let skills = Arc::new(DieselSkillRepository::new(pool.clone()));
    let trails = Arc::new(DieselTrailRepository::new(pool.clone()));
    let recommendations = Arc::new(DieselRecommendationRepository::new(pool));

    let generator = Arc::new(RecommendationService::new(
        users.clone(),
        trails.clone(),
        recommendations.clone(),
    ));
    let skill_commands = Arc::new(SkillService::new(skills.clone(), generator));

    HttpState {
        users,
        skills,
        skill_commands,
        trails,
        recommendations,
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }

    let config = AppConfig::from_env().map_err(|err| std::io::Error::other(err.to_string()))?;

    run_migrations(&config.database_url)?;

    let pool = DbPool::new(
        PoolConfig::new(&config.database_url).with_max_size(config.pool_size),
    )
    .await
    .map_err(|err| std::io::Error::other(err.to_string()))?;

    let state = web::Data::new(build_state(pool));
    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .configure(configure_api)
            .configure(configure_health);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr, "server listening");

    // Fail liveness as soon as shutdown starts so orchestrators drain the
    // instance while in-flight requests finish.
    let drain_state = health_state.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            drain_state.mark_unhealthy();
        }
    });

    server.run().await
}

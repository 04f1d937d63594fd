use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use storage::{
    MemoryStore, SheetsStore, Spreadsheet, repository::participant::ParticipantRepository,
    store::RowStore,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod routes;
mod session;
mod state;

use config::{Config, StoreBackend};
use middleware::auth::AccessGate;
use state::{AppState, DrawSettings};

#[derive(OpenApi)]
#[openapi(
    paths(
        features::registration::handlers::register_participant,
        features::admin::handlers::login,
        features::admin::handlers::list_participants,
        features::draw::handlers::draw_winners,
    ),
    components(
        schemas(
            storage::dto::participant::RegisterRequest,
            storage::dto::participant::ParticipantResponse,
            storage::dto::participant::ParticipantListResponse,
            storage::dto::session::LoginRequest,
            storage::dto::session::LoginResponse,
            storage::dto::draw::DrawRequest,
            storage::dto::draw::DrawResponse,
            storage::dto::draw::WinnerResponse,
            storage::dto::draw::PartialUpdateWarning,
        )
    ),
    tags(
        (name = "participants", description = "Public registration endpoint"),
        (name = "admin", description = "Password-protected draw endpoints"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Admin session token")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting raffle API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    let store: Arc<dyn RowStore> = match &config.store {
        StoreBackend::Sheets(sheets) => {
            tracing::info!(
                "Using sheet '{}' of spreadsheet {}",
                sheets.sheet_name,
                sheets.spreadsheet_id
            );
            Arc::new(SheetsStore::new(sheets.clone()).context("Failed to create sheets client")?)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store, registrations are lost on restart");
            Arc::new(MemoryStore::new(config.columns.header()))
        }
    };
    let sheet = Spreadsheet::new(store, config.columns.clone());

    tracing::info!("Checking the participant sheet header");
    ParticipantRepository::new(&sheet)
        .layout()
        .await
        .context("Participant sheet does not match the configured columns")?;
    tracing::info!("Participant sheet is ready");

    let state = AppState {
        sheet,
        gate: AccessGate::new(config.admin_password.clone()),
        draw: DrawSettings {
            delay: config.draw_delay,
        },
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}

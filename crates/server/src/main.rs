mod auth;
mod config;
mod doc;
mod dtos;
mod error;
mod routes;
mod state;
mod utils;

use crate::{
    auth::DevIdentity,
    config::Config,
    doc::ApiDoc,
    routes::{assignment, course, health},
    state::AppState,
    utils::shutdown::shutdown_signal,
};
use axum::{Extension, Router, extract::DefaultBodyLimit, routing::get};
use database::db::create_connection;
use log::{info, warn};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

/// Routes that need an authenticated caller, with their OpenAPI description
fn api_router() -> (Router<AppState>, utoipa::openapi::OpenApi) {
    OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(course::list_courses, course::create_course))
        .routes(routes!(course::get_course, course::delete_course))
        .routes(routes!(course::upload_course))
        .routes(routes!(assignment::list_course_assignments))
        .routes(routes!(assignment::parse_assignments))
        .routes(routes!(assignment::delete_assignment))
        .split_for_parts()
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().expect("Invalid configuration");
    let db = create_connection(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let (api, openapi) = api_router();

    let api = match &config.oidc_issuer_url {
        Some(issuer_url) => {
            let oauth2_resource_server = <OAuth2ResourceServer>::builder()
                .issuer_url(issuer_url.as_str())
                .build()
                .await
                .expect("Failed to build OAuth2ResourceServer");

            api.layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()))
        }
        None => {
            warn!(
                "OIDC_ISSUER_URL is not set, every request is authenticated as {}",
                config.dev_user
            );
            api.layer(Extension(DevIdentity(config.dev_user.clone())))
        }
    };

    let bind_addr = config.bind_addr;
    let max_upload_bytes = config.max_upload_bytes;

    let app = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .merge(api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CompressionLayer::new())
        .with_state(AppState::new(db, config));

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .expect("Failed to bind listener");
    info!("Running axum on http://{bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

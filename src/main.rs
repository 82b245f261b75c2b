use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::Extension,
    http::{header, Method},
    routing::post,
    Router,
};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pulse_api::config::Config;
use pulse_api::graphql::{build_schema, loaders, PulseSchema};
use pulse_api::routes::{health_router, HealthState};

/// Build the CORS layer based on configuration.
///
/// With `CORS_ORIGINS` set, only those origins are allowed. Without it,
/// production rejects cross-origin requests while development uses
/// permissive CORS for convenience.
fn build_cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        }
        _ if config.is_production() => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode; \
                 cross-origin requests will be rejected"
            );
            CorsLayer::new()
        }
        _ => CorsLayer::permissive(),
    }
}

/// GraphQL handler that executes queries against the schema
///
/// Builds a fresh set of data loaders for every request and attaches them
/// to the request context, so all resolvers of one request share one
/// batching cache and nothing is reused across requests.
async fn graphql_handler(
    Extension(schema): Extension<PulseSchema>,
    Extension(pool): Extension<PgPool>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = loaders::register(req.into_inner(), &pool);
    schema.execute(request).await.into()
}

/// GraphQL Playground handler for development
async fn graphql_playground() -> impl axum::response::IntoResponse {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pulse_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing::info!("Starting Pulse API server on port {}", config.port);

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(std::time::Duration::from_secs(
            config.database_connect_timeout_secs,
        ))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Migrations completed successfully");

    let schema = build_schema(pool.clone());
    tracing::info!("GraphQL schema built");

    let cors_layer = build_cors_layer(&config);

    let app = Router::new()
        .route("/graphql", post(graphql_handler).get(graphql_playground))
        .nest("/health", health_router(HealthState::new(pool.clone())))
        .layer(Extension(schema))
        .layer(Extension(pool))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

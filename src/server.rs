//! HTTP gateway.
//!
//! - `POST /graphql` executes a GraphQL request
//! - `GET /graphql?query=...` executes the query from the URL
//! - `GET /graphql` without a `query` parameter serves the GraphiQL explorer
//!
//! A response whose errors include `STORE_UNAVAILABLE` is sent with status 503.
//! A body or query string that is not a GraphQL request gets a 400 whose
//! error carries `INVALID_ARGUMENT`.

use async_graphql::http::GraphiQLSource;
use async_graphql::{ErrorExtensions, Pos};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse, rejection::GraphQLRejection};
use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderValue, Method, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerSettings;
use crate::error::{HobbyistError, Result};
use crate::graphql::{self, HobbyistSchema};

pub const GRAPHQL_PATH: &str = "/graphql";

type ExtractedRequest = std::result::Result<GraphQLRequest, GraphQLRejection>;

async fn respond(schema: &HobbyistSchema, request: ExtractedRequest) -> Response {
    let request = match request {
        Ok(request) => request.into_inner(),
        Err(rejection) => return malformed_request(rejection),
    };

    let response = graphql::execute(schema, request).await;
    let status = if graphql::store_unavailable(&response) {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    (status, GraphQLResponse::from(response)).into_response()
}

fn malformed_request(rejection: GraphQLRejection) -> Response {
    let error = HobbyistError::InvalidArgument(format!("malformed request: {}", rejection.0))
        .extend()
        .into_server_error(Pos::default());
    let response = async_graphql::Response::from_errors(vec![error]);
    (StatusCode::BAD_REQUEST, GraphQLResponse::from(response)).into_response()
}

async fn graphql_handler(State(schema): State<HobbyistSchema>, req: ExtractedRequest) -> Response {
    respond(&schema, req).await
}

#[derive(Debug, Deserialize)]
struct GetParams {
    query: Option<String>,
}

async fn graphql_get(
    State(schema): State<HobbyistSchema>,
    Query(params): Query<GetParams>,
    req: ExtractedRequest,
) -> Response {
    if params.query.is_none() {
        return graphiql().into_response();
    }
    respond(&schema, req).await
}

fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// `"*"` anywhere in the list allows every origin.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o.trim() == "*") {
        tracing::info!("CORS: allowing all origins");
        return CorsLayer::permissive();
    }

    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|s| {
            let trimmed = s.trim();
            match trimmed.parse::<HeaderValue>() {
                Ok(hv) => {
                    tracing::info!("CORS: allowing origin {}", trimmed);
                    Some(hv)
                }
                Err(e) => {
                    tracing::warn!("CORS: invalid origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect();

    if allowed_origins.is_empty() {
        tracing::warn!("CORS: no valid origins configured, cross-origin requests will be rejected");
    }

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn create_router(schema: HobbyistSchema, settings: &ServerSettings) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, get(graphql_get).post(graphql_handler))
        .layer(build_cors_layer(&settings.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(schema)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Serves the schema on `settings.host:port` until Ctrl-C.
pub async fn run_server(schema: HobbyistSchema, settings: &ServerSettings, port: u16) -> Result<()> {
    let router = create_router(schema, settings);
    let addr = format!("{}:{}", settings.host, port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening GraphQL on http://{}{}", addr, GRAPHQL_PATH);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

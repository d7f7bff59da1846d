use std::net::SocketAddr;

use axum::{middleware, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    auth::{
        self,
        middleware::{require_admin, require_auth},
    },
    config::ServerConfig,
    contents, health,
    state::AppState,
};

pub fn build_app(state: AppState) -> Router {
    let public = Router::new()
        .merge(auth::public_router())
        .merge(health::router());

    let protected = Router::new()
        .merge(auth::protected_router())
        .merge(contents::read_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    // last layer runs first: authenticate, then check the role
    let admin = Router::new()
        .merge(auth::admin_router())
        .merge(contents::write_router())
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .nest(
            "/api",
            Router::new().merge(public).merge(protected).merge(admin),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!(
                        "http_request",
                        %method,
                        uri = %uri,
                        status = tracing::field::Empty
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, server: &ServerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", server.host, server.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

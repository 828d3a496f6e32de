use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_todo::create_todo;
use super::handlers::delete_todo::delete_todo;
use super::handlers::get_current_account::get_current_account;
use super::handlers::get_todo::get_todo;
use super::handlers::list_todos::list_todos;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_current_account::update_current_account;
use super::handlers::update_todo::update_todo;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::todo::ports::TodoServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub todo_service: Arc<dyn TodoServicePort>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    todo_service: Arc<dyn TodoServicePort>,
) -> Router {
    let state = AppState {
        account_service,
        todo_service,
    };

    let public_routes = Router::new()
        .route("/v1/auth/register", post(register))
        .route("/v1/auth/login", post(login));

    let protected_routes = Router::new()
        .route(
            "/v1/auth/me",
            get(get_current_account).patch(update_current_account),
        )
        .route("/v1/todos", get(list_todos).post(create_todo))
        .route(
            "/v1/todos/:todo_id",
            get(get_todo).patch(update_todo).delete(delete_todo),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::account::models::Account;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::INVALID_TOKEN_MESSAGE;
use crate::inbound::http::router::AppState;

/// Request extension holding the account a valid bearer token resolved to.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Account);

/// Middleware that resolves the bearer token to an account and adds it to
/// request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req).map_err(IntoResponse::into_response)?;

    let account = state
        .account_service
        .resolve(token)
        .await
        .map_err(|e| ApiError::from(e).into_response())?;

    req.extensions_mut().insert(CurrentAccount(account));

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let unauthorized = || ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string());

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            tracing::debug!("Missing Authorization header");
            unauthorized()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| unauthorized())?;

    match auth_str.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
            Ok(token.trim())
        }
        _ => {
            tracing::debug!("Authorization header is not a bearer token");
            Err(unauthorized())
        }
    }
}

use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::domain::services::auth_service::AuthService;
use crate::error::AppError;
use crate::server::AppState;

/// Routes that never require a token: registration, login, health, and
/// every read-only endpoint. The seed endpoint stays open as a bootstrap
/// utility.
pub fn is_public(method: &Method, path: &str) -> bool {
    if path == "/health" {
        return true;
    }
    if path == "/api/v1/auth/register" || path == "/api/v1/auth/login" {
        return true;
    }
    if method == Method::GET
        && (path.starts_with("/api/v1/products")
            || path.starts_with("/api/v1/files")
            || path == "/api/v1/seed")
    {
        return true;
    }
    false
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if is_public(request.method(), request.uri().path()) {
        return Ok(next.run(request).await);
    }

    // 从请求头获取令牌
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Auth("Invalid authorization header format".to_string()))?;

    // 验证令牌并加载用户
    let auth_service = AuthService::new(state.clone());
    let user = auth_service.authenticate(token).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_login_are_public() {
        assert!(is_public(&Method::POST, "/api/v1/auth/register"));
        assert!(is_public(&Method::POST, "/api/v1/auth/login"));
        assert!(!is_public(&Method::GET, "/api/v1/auth/check-status"));
    }

    #[test]
    fn product_reads_are_public_but_writes_are_not() {
        assert!(is_public(&Method::GET, "/api/v1/products"));
        assert!(is_public(&Method::GET, "/api/v1/products/t_shirt_teslo"));
        assert!(!is_public(&Method::POST, "/api/v1/products"));
        assert!(!is_public(&Method::PATCH, "/api/v1/products/abc"));
        assert!(!is_public(&Method::DELETE, "/api/v1/products/abc"));
    }

    #[test]
    fn file_reads_are_public_but_uploads_are_not() {
        assert!(is_public(&Method::GET, "/api/v1/files/product/a.jpg"));
        assert!(!is_public(&Method::POST, "/api/v1/files/product"));
    }

    #[test]
    fn health_and_seed_are_public() {
        assert!(is_public(&Method::GET, "/health"));
        assert!(is_public(&Method::GET, "/api/v1/seed"));
    }
}

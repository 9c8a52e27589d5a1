use axum::{middleware as axum_middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::{auth, files, products, seed};
use crate::config::Config;
use crate::error::AppError;
use crate::middleware::auth as auth_middleware;
use crate::notifications::ProductNotifier;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: sqlx::PgPool,
    pub notifier: ProductNotifier,
}

pub async fn create_app(state: AppState) -> Result<Router, AppError> {
    let app_state = Arc::new(state);

    // 健康检查路由
    let health_route = Router::new().route("/health", get(|| async { "OK" }));

    // API 路由
    let api_routes = Router::new()
        .nest("/auth", auth::routes())
        .nest("/products", products::routes())
        .nest("/files", files::routes())
        .nest("/seed", seed::routes())
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware::auth_middleware,
        ));

    // 组合所有路由
    let app = Router::new()
        .nest("/api/v1", api_routes)
        .merge(health_route)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(app_state);

    Ok(app)
}

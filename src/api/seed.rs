use axum::{extract::State, routing::get, Router};
use std::sync::Arc;

use crate::domain::services::product_service::ProductService;
use crate::domain::services::seed_service::SeedService;
use crate::error::AppError;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(execute_seed))
}

async fn execute_seed(State(state): State<Arc<AppState>>) -> Result<&'static str, AppError> {
    let products = ProductService::new(state.db.clone(), state.notifier.clone());
    let seed_service = SeedService::new(state.db.clone(), products);

    seed_service.run_seed().await
}

use axum::{
    extract::{Extension, Path, Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::domain::models::product::{NewProduct, ProductPatch, ProductPlain};
use crate::domain::models::user::User;
use crate::domain::services::product_service::{ProductService, RemovedProduct};
use crate::error::AppError;
use crate::server::AppState;
use crate::utils::pagination::PaginationParams;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{term}",
            get(get_product).patch(update_product).delete(delete_product),
        )
}

fn product_service(state: &Arc<AppState>) -> ProductService {
    ProductService::new(state.db.clone(), state.notifier.clone())
}

async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<Vec<ProductPlain>>, AppError> {
    pagination
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let products = product_service(&state).find_all(pagination).await?;
    Ok(Json(products))
}

/// Accepts an id, a title, or a slug.
async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(term): Path<String>,
) -> Result<Json<ProductPlain>, AppError> {
    let product = product_service(&state).find_one_plain(&term).await?;
    Ok(Json(product))
}

async fn create_product(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Json(payload): Json<NewProduct>,
) -> Result<Json<ProductPlain>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = product_service(&state).create(payload, &user).await?;
    Ok(Json(product))
}

async fn update_product(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPatch>,
) -> Result<Json<ProductPlain>, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let product = product_service(&state).update(id, payload, &user).await?;
    Ok(Json(product))
}

async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RemovedProduct>, AppError> {
    let removed = product_service(&state).remove(id).await?;
    Ok(Json(removed))
}

use futures::future;
use sqlx::PgPool;

use crate::domain::models::user::User;
use crate::domain::seed_data::seed_catalog;
use crate::domain::services::auth_service::hash_password;
use crate::domain::services::product_service::ProductService;
use crate::error::AppError;

const SEED_USER_EMAIL: &str = "seed@catalog.local";

/// Operational bootstrap: wipes the product set and repopulates it from
/// the fixed catalog. Not transactional across creations; it only ever
/// runs against the freshly emptied table.
pub struct SeedService {
    db: PgPool,
    products: ProductService,
}

impl SeedService {
    pub fn new(db: PgPool, products: ProductService) -> Self {
        Self { db, products }
    }

    pub async fn run_seed(&self) -> Result<&'static str, AppError> {
        self.insert_seed_products().await?;
        Ok("Seed executed")
    }

    async fn insert_seed_products(&self) -> Result<(), AppError> {
        self.products.delete_all_products().await?;

        let seed_user = self.ensure_seed_user().await?;

        // All creations fire concurrently; any failure propagates with the
        // product store's own error mapping.
        let creations = seed_catalog()
            .into_iter()
            .map(|entry| self.products.create(entry, &seed_user));
        future::try_join_all(creations).await?;

        Ok(())
    }

    /// Seeded products need an owner; upserts a dedicated seed user.
    async fn ensure_seed_user(&self) -> Result<User, AppError> {
        let user = User::new(SEED_USER_EMAIL, "Seed User", &hash_password("Seed12345")?);

        sqlx::query_as(
            r#"
            INSERT INTO users (id, email, password_hash, full_name, is_active, roles, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (email) DO UPDATE SET updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.full_name)
        .bind(user.is_active)
        .bind(&user.roles)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.db)
        .await
        .map_err(AppError::from_db)
    }
}

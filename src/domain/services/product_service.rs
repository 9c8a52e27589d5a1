use std::collections::HashMap;

use chrono::Utc;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::lookup::LookupTerm;
use crate::domain::models::product::{
    normalize_slug, NewProduct, Product, ProductImage, ProductPatch, ProductPlain,
    ProductWithImages, VALID_GENDERS,
};
use crate::domain::models::user::User;
use crate::error::AppError;
use crate::notifications::ProductNotifier;
use crate::utils::pagination::PaginationParams;

#[derive(Debug, Serialize)]
pub struct RemovedProduct {
    pub removed: ProductWithImages,
}

/// Product store: owns the product rows and their image rows. All storage
/// errors are mapped at this boundary, no raw sqlx error leaves it.
pub struct ProductService {
    db: PgPool,
    notifier: ProductNotifier,
}

impl ProductService {
    pub fn new(db: PgPool, notifier: ProductNotifier) -> Self {
        Self { db, notifier }
    }

    /// Inserts the product row and one image row per URL as a single
    /// transaction. The slug is derived from the title when absent and
    /// normalized either way.
    pub async fn create(
        &self,
        details: NewProduct,
        owner: &User,
    ) -> Result<ProductPlain, AppError> {
        if !VALID_GENDERS.contains(&details.gender.as_str()) {
            return Err(AppError::Validation(format!(
                "Gender must be one of: {}",
                VALID_GENDERS.join(", ")
            )));
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            slug: normalize_slug(details.slug.as_deref().unwrap_or(&details.title)),
            title: details.title,
            price: details.price.unwrap_or(0.0),
            description: details.description,
            stock: details.stock.unwrap_or(0),
            sizes: details.sizes,
            gender: details.gender,
            tags: details.tags,
            user_id: owner.id,
            created_at: now,
            updated_at: now,
        };

        let mut tx = self.db.begin().await.map_err(AppError::from_db)?;

        sqlx::query(
            r#"
            INSERT INTO products
                (id, title, slug, price, description, stock, sizes, gender, tags, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(product.id)
        .bind(&product.title)
        .bind(&product.slug)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.stock)
        .bind(&product.sizes)
        .bind(&product.gender)
        .bind(&product.tags)
        .bind(product.user_id)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from_db)?;

        for url in &details.images {
            sqlx::query("INSERT INTO product_images (url, product_id) VALUES ($1, $2)")
                .bind(url)
                .bind(product.id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::from_db)?;
        }

        tx.commit().await.map_err(AppError::from_db)?;

        let created = ProductPlain {
            product,
            images: details.images,
        };
        self.notifier.product_created(&created);

        Ok(created)
    }

    /// Paginated listing, images eagerly loaded with one extra query.
    pub async fn find_all(
        &self,
        pagination: PaginationParams,
    ) -> Result<Vec<ProductPlain>, AppError> {
        let limit = pagination.limit();
        let offset = pagination.offset();

        let products: Vec<Product> = sqlx::query_as(
            r#"
            SELECT * FROM products
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await
        .map_err(AppError::from_db)?;

        let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
        let images: Vec<ProductImage> = sqlx::query_as(
            "SELECT * FROM product_images WHERE product_id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.db)
        .await
        .map_err(AppError::from_db)?;

        let mut by_product: HashMap<Uuid, Vec<String>> = HashMap::new();
        for image in images {
            by_product.entry(image.product_id).or_default().push(image.url);
        }

        Ok(products
            .into_iter()
            .map(|product| {
                let images = by_product.remove(&product.id).unwrap_or_default();
                ProductPlain { product, images }
            })
            .collect())
    }

    /// Resolves a term as id, title, or slug and returns the product with
    /// its structured image rows.
    pub async fn find_one(&self, term: &str) -> Result<ProductWithImages, AppError> {
        let product: Option<Product> = match LookupTerm::parse(term) {
            LookupTerm::Id(id) => {
                sqlx::query_as("SELECT * FROM products WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.db)
                    .await
                    .map_err(AppError::from_db)?
            }
            LookupTerm::Text(text) => {
                sqlx::query_as(
                    "SELECT * FROM products WHERE UPPER(title) = UPPER($1) OR slug = LOWER($1)",
                )
                .bind(text)
                .fetch_optional(&self.db)
                .await
                .map_err(AppError::from_db)?
            }
        };

        let product = product
            .ok_or_else(|| AppError::NotFound(format!("Product with term {} not found", term)))?;

        let images: Vec<ProductImage> = sqlx::query_as(
            "SELECT * FROM product_images WHERE product_id = $1 ORDER BY id",
        )
        .bind(product.id)
        .fetch_all(&self.db)
        .await
        .map_err(AppError::from_db)?;

        Ok(ProductWithImages { product, images })
    }

    /// `find_one` with images flattened to URLs; every caller-facing
    /// single-item response goes through here.
    pub async fn find_one_plain(&self, term: &str) -> Result<ProductPlain, AppError> {
        Ok(self.find_one(term).await?.into_plain())
    }

    /// Transactional update: merge the non-image fields onto the stored
    /// row, then inside one transaction replace the full image set when a
    /// new list was supplied and persist the merged row. A failure at any
    /// point drops the transaction, which rolls it back and returns the
    /// connection to the pool. The response is re-read from storage so it
    /// reflects what was actually committed.
    pub async fn update(
        &self,
        id: Uuid,
        patch: ProductPatch,
        acting_user: &User,
    ) -> Result<ProductPlain, AppError> {
        if let Some(gender) = &patch.gender {
            if !VALID_GENDERS.contains(&gender.as_str()) {
                return Err(AppError::Validation(format!(
                    "Gender must be one of: {}",
                    VALID_GENDERS.join(", ")
                )));
            }
        }

        let mut product: Product = sqlx::query_as("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await
            .map_err(AppError::from_db)?
            .ok_or_else(|| AppError::NotFound(format!("Product with id: {} not found", id)))?;

        // Merge everything except the image relation; images are never
        // diffed, only replaced wholesale below.
        if let Some(title) = patch.title {
            product.title = title;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(description) = patch.description {
            product.description = Some(description);
        }
        if let Some(slug) = patch.slug {
            product.slug = slug;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(sizes) = patch.sizes {
            product.sizes = sizes;
        }
        if let Some(gender) = patch.gender {
            product.gender = gender;
        }
        if let Some(tags) = patch.tags {
            product.tags = tags;
        }
        product.slug = normalize_slug(&product.slug);
        // Ownership follows whoever performs the update
        product.user_id = acting_user.id;
        product.updated_at = Utc::now();

        let mut tx = self.db.begin().await.map_err(AppError::from_db)?;

        if let Some(images) = &patch.images {
            sqlx::query("DELETE FROM product_images WHERE product_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::from_db)?;

            for url in images {
                sqlx::query("INSERT INTO product_images (url, product_id) VALUES ($1, $2)")
                    .bind(url)
                    .bind(id)
                    .execute(&mut *tx)
                    .await
                    .map_err(AppError::from_db)?;
            }
        }

        sqlx::query(
            r#"
            UPDATE products
            SET title = $1, slug = $2, price = $3, description = $4, stock = $5,
                sizes = $6, gender = $7, tags = $8, user_id = $9, updated_at = $10
            WHERE id = $11
            "#,
        )
        .bind(&product.title)
        .bind(&product.slug)
        .bind(product.price)
        .bind(&product.description)
        .bind(product.stock)
        .bind(&product.sizes)
        .bind(&product.gender)
        .bind(&product.tags)
        .bind(product.user_id)
        .bind(product.updated_at)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from_db)?;

        tx.commit().await.map_err(AppError::from_db)?;

        let updated = self.find_one_plain(&id.to_string()).await?;
        self.notifier.product_updated(&updated);

        Ok(updated)
    }

    /// Deletes a product and, explicitly, its image rows in the same
    /// transaction. Returns the deleted snapshot.
    pub async fn remove(&self, id: Uuid) -> Result<RemovedProduct, AppError> {
        let product = self.find_one(&id.to_string()).await?;

        let mut tx = self.db.begin().await.map_err(AppError::from_db)?;

        sqlx::query("DELETE FROM product_images WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_db)?;

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_db)?;

        tx.commit().await.map_err(AppError::from_db)?;

        self.notifier.product_deleted(&product);

        Ok(RemovedProduct { removed: product })
    }

    /// Wipes every product (and image) row. Only the re-seed workflow
    /// calls this.
    pub async fn delete_all_products(&self) -> Result<u64, AppError> {
        let mut tx = self.db.begin().await.map_err(AppError::from_db)?;

        sqlx::query("DELETE FROM product_images")
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_db)?;

        let result = sqlx::query("DELETE FROM products")
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_db)?;

        tx.commit().await.map_err(AppError::from_db)?;

        Ok(result.rows_affected())
    }
}

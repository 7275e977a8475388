//! Product queries: CRUD over the `products` table and the aggregated
//! detail fetch that assembles one product with its four collections.

use plugstore_core::db::{DatabaseError, unix_timestamp};

use super::db::StoreDatabase;
use super::models::{
    FaqRow, FeatureRow, PricingPlan, PricingRow, Product, ProductDetail, ProductPayload,
    ProductSummary, TestimonialRow,
};

impl StoreDatabase {
    /// Insert the product row and return its generated id. The caller is
    /// responsible for having validated the required identity fields and for
    /// invoking the synchronizer afterwards.
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<i64, DatabaseError> {
        let now = unix_timestamp();

        let row: (i64,) = sqlx::query_as(
            "INSERT INTO products (slug, name, category_slug, description, compatibility, \
             plugin_updates, store_url, download_url, video_url, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10) RETURNING id",
        )
        .bind(payload.slug.as_deref())
        .bind(payload.name.as_deref())
        .bind(payload.category_slug.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.compatibility.as_deref())
        .bind(payload.plugin_updates.as_deref())
        .bind(payload.store_url.as_deref())
        .bind(payload.download_url.as_deref())
        .bind(payload.video_url.as_deref())
        .bind(now)
        .fetch_one(self.pool())
        .await?;

        Ok(row.0)
    }

    /// Get a product by id.
    pub async fn get_product(&self, id: i64) -> Result<Product, DatabaseError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Product {id}")))
    }

    /// Get a product by slug.
    pub async fn get_product_by_slug(&self, slug: &str) -> Result<Product, DatabaseError> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE slug = $1")
            .bind(slug)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Product {slug}")))
    }

    /// Overwrite every scalar column from the payload. Fields absent from the
    /// payload null out their column (full replacement, never a patch).
    pub async fn update_product(
        &self,
        id: i64,
        payload: &ProductPayload,
    ) -> Result<(), DatabaseError> {
        let now = unix_timestamp();

        sqlx::query(
            "UPDATE products SET slug = $1, name = $2, category_slug = $3, description = $4, \
             compatibility = $5, plugin_updates = $6, store_url = $7, download_url = $8, \
             video_url = $9, updated_at = $10 WHERE id = $11",
        )
        .bind(payload.slug.as_deref())
        .bind(payload.name.as_deref())
        .bind(payload.category_slug.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.compatibility.as_deref())
        .bind(payload.plugin_updates.as_deref())
        .bind(payload.store_url.as_deref())
        .bind(payload.download_url.as_deref())
        .bind(payload.video_url.as_deref())
        .bind(now)
        .bind(id)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Delete a product; dependent rows go with it via schema-level cascade.
    /// Returns `false` when the id does not exist.
    pub async fn delete_product(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List every product's summary fields, ordered by (category, name) for a
    /// stable, pagination-free listing.
    pub async fn list_products(&self) -> Result<Vec<ProductSummary>, DatabaseError> {
        let summaries = sqlx::query_as::<_, ProductSummary>(
            "SELECT id, slug, name, category_slug, description, download_url \
             FROM products ORDER BY category_slug, name",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(summaries)
    }

    /// All product slugs, for sitemap generation.
    pub async fn list_slugs(&self) -> Result<Vec<String>, DatabaseError> {
        let slugs =
            sqlx::query_scalar::<_, String>("SELECT slug FROM products ORDER BY category_slug, name")
                .fetch_all(self.pool())
                .await?;

        Ok(slugs)
    }

    /// Load a product by slug together with all four dependent collections.
    /// The collections load concurrently; pricing rows are re-keyed into a
    /// map by plan type with their feature lists decoded from JSON text.
    pub async fn get_product_detail(&self, slug: &str) -> Result<ProductDetail, DatabaseError> {
        let product = self.get_product_by_slug(slug).await?;

        let (pricing, features, testimonials, faqs) = tokio::try_join!(
            self.load_pricing(product.id),
            self.load_features(product.id),
            self.load_testimonials(product.id),
            self.load_faqs(product.id),
        )?;

        let pricing = pricing
            .into_iter()
            .map(|row| (row.plan_type.clone(), PricingPlan::from(row)))
            .collect();

        Ok(ProductDetail {
            product,
            pricing,
            features,
            testimonials,
            faqs,
        })
    }

    async fn load_pricing(&self, product_id: i64) -> Result<Vec<PricingRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PricingRow>(
            "SELECT plan_type, price, description, cta_text, features \
             FROM product_pricing WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    async fn load_features(&self, product_id: i64) -> Result<Vec<FeatureRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, FeatureRow>(
            "SELECT title, description, icon, display_order \
             FROM product_features WHERE product_id = $1 ORDER BY display_order",
        )
        .bind(product_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    async fn load_testimonials(
        &self,
        product_id: i64,
    ) -> Result<Vec<TestimonialRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, TestimonialRow>(
            "SELECT author, role, content, rating, display_order \
             FROM product_testimonials WHERE product_id = $1 ORDER BY display_order",
        )
        .bind(product_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    async fn load_faqs(&self, product_id: i64) -> Result<Vec<FaqRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, FaqRow>(
            "SELECT question, answer, display_order \
             FROM product_faqs WHERE product_id = $1 ORDER BY display_order",
        )
        .bind(product_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }
}

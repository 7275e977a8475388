//! Product relations synchronizer.
//!
//! Reconciles one product's dependent collections with a caller-supplied
//! bundle, in the fixed order pricing -> features -> testimonials -> faqs.
//! Per collection: delete every existing row for the product, then insert the
//! supplied entries in array order. The insertion index becomes
//! `display_order` for the ordered collections; the pricing map key becomes
//! `plan_type`.
//!
//! The delete and insert statements run as individual queries, NOT inside a
//! transaction. A failure mid-sequence therefore leaves the current table
//! partially reinserted, tables already processed fully replaced, and tables
//! not yet reached untouched. Callers see a plain query error with no
//! compensation and no retry.

use std::collections::BTreeMap;

use plugstore_core::db::DatabaseError;

use super::db::StoreDatabase;
use super::models::{FaqInput, FeatureInput, PricingPlanInput, ProductRelations, TestimonialInput};

impl StoreDatabase {
    /// Replace all four dependent collections of `product_id` with the
    /// supplied bundle. After a successful call the dependent tables contain
    /// exactly the rows implied by the input: no stale rows, no duplicate
    /// plan types.
    pub async fn sync_relations(
        &self,
        product_id: i64,
        relations: &ProductRelations,
    ) -> Result<(), DatabaseError> {
        self.replace_pricing(product_id, &relations.pricing).await?;
        self.replace_features(product_id, &relations.features)
            .await?;
        self.replace_testimonials(product_id, &relations.testimonials)
            .await?;
        self.replace_faqs(product_id, &relations.faqs).await?;
        Ok(())
    }

    async fn replace_pricing(
        &self,
        product_id: i64,
        pricing: &BTreeMap<String, PricingPlanInput>,
    ) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM product_pricing WHERE product_id = $1")
            .bind(product_id)
            .execute(self.pool())
            .await?;

        for (plan_type, plan) in pricing {
            let features = serde_json::to_string(plan.features.as_deref().unwrap_or(&[]))
                .map_err(|e| DatabaseError::Query(e.to_string()))?;

            sqlx::query(
                "INSERT INTO product_pricing (product_id, plan_type, price, description, cta_text, features) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(product_id)
            .bind(plan_type)
            .bind(plan.price.as_deref().unwrap_or(""))
            .bind(plan.description.as_deref().unwrap_or(""))
            .bind(plan.cta_text.as_deref().unwrap_or(""))
            .bind(features)
            .execute(self.pool())
            .await?;
        }

        Ok(())
    }

    async fn replace_features(
        &self,
        product_id: i64,
        features: &[FeatureInput],
    ) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM product_features WHERE product_id = $1")
            .bind(product_id)
            .execute(self.pool())
            .await?;

        for (index, feature) in features.iter().enumerate() {
            sqlx::query(
                "INSERT INTO product_features (product_id, title, description, icon, display_order) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(product_id)
            .bind(feature.title.as_deref().unwrap_or(""))
            .bind(feature.description.as_deref().unwrap_or(""))
            .bind(feature.icon.as_deref().unwrap_or(""))
            .bind(display_order(index))
            .execute(self.pool())
            .await?;
        }

        Ok(())
    }

    async fn replace_testimonials(
        &self,
        product_id: i64,
        testimonials: &[TestimonialInput],
    ) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM product_testimonials WHERE product_id = $1")
            .bind(product_id)
            .execute(self.pool())
            .await?;

        for (index, testimonial) in testimonials.iter().enumerate() {
            sqlx::query(
                "INSERT INTO product_testimonials (product_id, author, role, content, rating, display_order) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(product_id)
            .bind(testimonial.author.as_deref().unwrap_or(""))
            .bind(testimonial.role.as_deref().unwrap_or(""))
            .bind(testimonial.content.as_deref().unwrap_or(""))
            .bind(testimonial.rating.unwrap_or(5))
            .bind(display_order(index))
            .execute(self.pool())
            .await?;
        }

        Ok(())
    }

    async fn replace_faqs(&self, product_id: i64, faqs: &[FaqInput]) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM product_faqs WHERE product_id = $1")
            .bind(product_id)
            .execute(self.pool())
            .await?;

        for (index, faq) in faqs.iter().enumerate() {
            sqlx::query(
                "INSERT INTO product_faqs (product_id, question, answer, display_order) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(product_id)
            .bind(faq.question.as_deref().unwrap_or(""))
            .bind(faq.answer.as_deref().unwrap_or(""))
            .bind(display_order(index))
            .execute(self.pool())
            .await?;
        }

        Ok(())
    }
}

/// Zero-based display order derived from array position.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const fn display_order(index: usize) -> i32 {
    index as i32
}

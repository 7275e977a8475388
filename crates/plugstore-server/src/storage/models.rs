//! Data models for Plugstore storage: row types read back from PostgreSQL,
//! the write-side input bundle, and the aggregated detail response.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =========================================================================
// Row models
// =========================================================================

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub category_slug: String,
    pub description: Option<String>,
    pub compatibility: Option<String>,
    pub plugin_updates: Option<String>,
    pub store_url: Option<String>,
    pub download_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Listing shape for `GET /api/products`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductSummary {
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub category_slug: String,
    pub description: Option<String>,
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PricingRow {
    pub plan_type: String,
    pub price: String,
    pub description: String,
    pub cta_text: String,
    /// JSON-serialized array of bullet strings, decoded on read.
    pub features: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FeatureRow {
    pub title: String,
    pub description: String,
    pub icon: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct TestimonialRow {
    pub author: String,
    pub role: String,
    pub content: String,
    pub rating: i32,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct FaqRow {
    pub question: String,
    pub answer: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Admin {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmailLog {
    pub id: i64,
    pub recipient: String,
    pub subject: String,
    pub product_name: Option<String>,
    pub download_url: Option<String>,
    pub status: String,
    pub error: Option<String>,
    pub created_at: i64,
}

/// One email audit row to append; `status` is `"sent"` or `"failed"`.
#[derive(Debug, Clone)]
pub struct NewEmailLog {
    pub recipient: String,
    pub subject: String,
    pub product_name: Option<String>,
    pub download_url: Option<String>,
    pub status: String,
    pub error: Option<String>,
}

// =========================================================================
// Write-side inputs
// =========================================================================

/// Full create/update payload for a product: scalar fields plus the four
/// dependent collections. Every field is optional at the serde level; the
/// handler enforces which ones a given operation requires.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductPayload {
    pub name: Option<String>,
    pub slug: Option<String>,
    #[serde(alias = "categorySlug")]
    pub category_slug: Option<String>,
    pub description: Option<String>,
    pub compatibility: Option<String>,
    #[serde(alias = "pluginUpdates")]
    pub plugin_updates: Option<String>,
    #[serde(alias = "storeUrl")]
    pub store_url: Option<String>,
    #[serde(alias = "downloadUrl")]
    pub download_url: Option<String>,
    #[serde(alias = "videoUrl")]
    pub video_url: Option<String>,
    #[serde(flatten)]
    pub relations: ProductRelations,
}

impl ProductPayload {
    /// Create requires `name`, `slug`, and `categorySlug`; their absence is a
    /// client error, never a server failure.
    pub fn require_identity(&self) -> Result<(), String> {
        for (field, value) in [
            ("name", &self.name),
            ("slug", &self.slug),
            ("categorySlug", &self.category_slug),
        ] {
            if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                return Err(format!("missing required field: {field}"));
            }
        }
        Ok(())
    }
}

/// The bundle of dependent collections the synchronizer reconciles.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductRelations {
    /// Keyed by plan type; the key set is caller-controlled, not an enum.
    pub pricing: BTreeMap<String, PricingPlanInput>,
    pub features: Vec<FeatureInput>,
    pub testimonials: Vec<TestimonialInput>,
    pub faqs: Vec<FaqInput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PricingPlanInput {
    pub price: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "ctaText")]
    pub cta_text: Option<String>,
    pub features: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FeatureInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TestimonialInput {
    pub author: Option<String>,
    pub role: Option<String>,
    pub content: Option<String>,
    /// 1-5; defaults to 5 when omitted.
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FaqInput {
    pub question: Option<String>,
    pub answer: Option<String>,
}

// =========================================================================
// Read-side aggregation
// =========================================================================

/// Aggregated response for `GET /api/products/{slug}`: the product row plus
/// all four collections, with pricing re-keyed into a map by plan type.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub pricing: BTreeMap<String, PricingPlan>,
    pub features: Vec<FeatureRow>,
    pub testimonials: Vec<TestimonialRow>,
    pub faqs: Vec<FaqRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PricingPlan {
    pub price: String,
    pub description: String,
    pub cta_text: String,
    pub features: Vec<String>,
}

impl From<PricingRow> for PricingPlan {
    fn from(row: PricingRow) -> Self {
        Self {
            features: decode_feature_list(&row.features),
            price: row.price,
            description: row.description,
            cta_text: row.cta_text,
        }
    }
}

/// Decode a pricing plan's `features` column.
///
/// The column is JSON text, but stays defensive about what actually arrives
/// from the driver: a JSON array is used directly, a JSON string is treated
/// as a double-encoded array and parsed again, anything else yields an empty
/// list rather than an error.
pub(crate) fn decode_feature_list(raw: &str) -> Vec<String> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Ok(serde_json::Value::String(inner)) => serde_json::from_str(&inner).unwrap_or_default(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decode_plain_json_array() {
        assert_eq!(decode_feature_list(r#"["A","B"]"#), vec!["A", "B"]);
    }

    #[test]
    fn decode_double_encoded_array() {
        assert_eq!(
            decode_feature_list(r#""[\"A\",\"B\"]""#),
            vec!["A", "B"]
        );
    }

    #[test]
    fn decode_garbage_yields_empty_list() {
        assert!(decode_feature_list("not json").is_empty());
        assert!(decode_feature_list("42").is_empty());
        assert!(decode_feature_list(r#""not an array inside""#).is_empty());
    }

    #[test]
    fn non_string_array_items_are_stringified() {
        assert_eq!(decode_feature_list("[1, \"two\"]"), vec!["1", "two"]);
    }

    #[test]
    fn require_identity_rejects_missing_fields() {
        let payload = ProductPayload::default();
        let err = payload.require_identity().unwrap_err();
        assert!(err.contains("name"));

        let payload = ProductPayload {
            name: Some("OBJ Exporter".into()),
            slug: Some("obj-exporter".into()),
            category_slug: Some("   ".into()),
            ..ProductPayload::default()
        };
        let err = payload.require_identity().unwrap_err();
        assert!(err.contains("categorySlug"));
    }

    #[test]
    fn require_identity_accepts_complete_payload() {
        let payload = ProductPayload {
            name: Some("OBJ Exporter".into()),
            slug: Some("obj-exporter".into()),
            category_slug: Some("autocad".into()),
            ..ProductPayload::default()
        };
        assert!(payload.require_identity().is_ok());
    }

    #[test]
    fn payload_accepts_camel_case_aliases() {
        let payload: ProductPayload = serde_json::from_str(
            r#"{"name":"X","slug":"x","categorySlug":"revit","downloadUrl":"https://d/x.zip"}"#,
        )
        .unwrap();
        assert_eq!(payload.category_slug.as_deref(), Some("revit"));
        assert_eq!(payload.download_url.as_deref(), Some("https://d/x.zip"));
    }

    #[test]
    fn relations_default_to_empty() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"name":"X","slug":"x","category_slug":"revit"}"#).unwrap();
        assert!(payload.relations.pricing.is_empty());
        assert!(payload.relations.features.is_empty());
        assert!(payload.relations.testimonials.is_empty());
        assert!(payload.relations.faqs.is_empty());
    }

    #[test]
    fn unknown_plan_types_deserialize_verbatim() {
        let relations: ProductRelations = serde_json::from_str(
            r#"{"pricing":{"site_license":{"price":"$999"},"trial":{"price":"Free"}}}"#,
        )
        .unwrap();
        assert!(relations.pricing.contains_key("site_license"));
        assert_eq!(
            relations.pricing["trial"].price.as_deref(),
            Some("Free")
        );
    }
}

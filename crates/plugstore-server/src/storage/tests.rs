//! Storage layer tests for the storefront database.
//!
//! These run against a live PostgreSQL instance and are ignored by default:
//! point `DATABASE_URL` at a scratch database and run
//! `cargo test -- --ignored`.

#![allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]

use super::StoreDatabase;
use super::models::{
    FeatureInput, NewEmailLog, PricingPlanInput, ProductPayload, ProductRelations,
    TestimonialInput,
};

async fn test_db() -> StoreDatabase {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must point at a scratch PostgreSQL database");
    StoreDatabase::open(&url, false).await.unwrap()
}

/// Unique slug per test run so suites can share a scratch database.
fn unique_slug(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

fn payload(name: &str, slug: &str, category: &str) -> ProductPayload {
    ProductPayload {
        name: Some(name.into()),
        slug: Some(slug.into()),
        category_slug: Some(category.into()),
        ..ProductPayload::default()
    }
}

async fn dependent_row_count(db: &StoreDatabase, table: &str, product_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM {table} WHERE product_id = $1"
    ))
    .bind(product_id)
    .fetch_one(db.pool())
    .await
    .unwrap()
}

// === Product CRUD tests ===

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn create_and_fetch_detail_matches_input() {
    let db = test_db().await;
    let slug = unique_slug("obj-exporter");

    let mut payload = payload("OBJ Exporter", &slug, "autocad");
    payload.relations = ProductRelations {
        pricing: [(
            "trial".to_string(),
            PricingPlanInput {
                price: Some("Free".into()),
                features: Some(vec!["A".into()]),
                ..PricingPlanInput::default()
            },
        )]
        .into_iter()
        .collect(),
        features: vec![
            FeatureInput {
                title: Some("X".into()),
                ..FeatureInput::default()
            },
            FeatureInput {
                title: Some("Y".into()),
                ..FeatureInput::default()
            },
        ],
        ..ProductRelations::default()
    };

    let id = db.create_product(&payload).await.unwrap();
    db.sync_relations(id, &payload.relations).await.unwrap();

    let detail = db.get_product_detail(&slug).await.unwrap();
    assert_eq!(detail.product.id, id);
    assert_eq!(detail.product.name, "OBJ Exporter");

    assert_eq!(detail.features.len(), 2);
    assert_eq!(detail.features[0].title, "X");
    assert_eq!(detail.features[0].display_order, 0);
    assert_eq!(detail.features[1].title, "Y");
    assert_eq!(detail.features[1].display_order, 1);

    assert_eq!(detail.pricing["trial"].price, "Free");
    assert_eq!(detail.pricing["trial"].features, vec!["A"]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn resync_with_empty_features_removes_all() {
    let db = test_db().await;
    let slug = unique_slug("resync");

    let mut payload = payload("Resync", &slug, "revit");
    payload.relations.features = vec![
        FeatureInput {
            title: Some("X".into()),
            ..FeatureInput::default()
        },
        FeatureInput {
            title: Some("Y".into()),
            ..FeatureInput::default()
        },
    ];

    let id = db.create_product(&payload).await.unwrap();
    db.sync_relations(id, &payload.relations).await.unwrap();
    assert_eq!(dependent_row_count(&db, "product_features", id).await, 2);

    // Wholesale replacement, not merge: an empty array clears the table.
    db.sync_relations(id, &ProductRelations::default())
        .await
        .unwrap();
    assert_eq!(dependent_row_count(&db, "product_features", id).await, 0);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn unknown_plan_types_are_stored_verbatim() {
    let db = test_db().await;
    let slug = unique_slug("open-vocab");

    let mut payload = payload("Open Vocab", &slug, "autocad");
    payload.relations.pricing.insert(
        "site_license_2026".to_string(),
        PricingPlanInput {
            price: Some("$999".into()),
            ..PricingPlanInput::default()
        },
    );

    let id = db.create_product(&payload).await.unwrap();
    db.sync_relations(id, &payload.relations).await.unwrap();

    let detail = db.get_product_detail(&slug).await.unwrap();
    assert_eq!(detail.pricing["site_license_2026"].price, "$999");
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn testimonial_rating_defaults_to_five() {
    let db = test_db().await;
    let slug = unique_slug("rating");

    let mut payload = payload("Rating", &slug, "revit");
    payload.relations.testimonials = vec![
        TestimonialInput {
            author: Some("Ada".into()),
            ..TestimonialInput::default()
        },
        TestimonialInput {
            author: Some("Grace".into()),
            rating: Some(3),
            ..TestimonialInput::default()
        },
    ];

    let id = db.create_product(&payload).await.unwrap();
    db.sync_relations(id, &payload.relations).await.unwrap();

    let detail = db.get_product_detail(&slug).await.unwrap();
    assert_eq!(detail.testimonials[0].rating, 5);
    assert_eq!(detail.testimonials[1].rating, 3);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn delete_cascades_to_dependents() {
    let db = test_db().await;
    let slug = unique_slug("cascade");

    let mut payload = payload("Cascade", &slug, "sketchup");
    payload.relations.features = vec![FeatureInput {
        title: Some("X".into()),
        ..FeatureInput::default()
    }];
    payload.relations.pricing.insert(
        "trial".to_string(),
        PricingPlanInput::default(),
    );

    let id = db.create_product(&payload).await.unwrap();
    db.sync_relations(id, &payload.relations).await.unwrap();

    assert!(db.delete_product(id).await.unwrap());

    for table in [
        "product_pricing",
        "product_features",
        "product_testimonials",
        "product_faqs",
    ] {
        assert_eq!(dependent_row_count(&db, table, id).await, 0, "{table}");
    }
    assert!(db.get_product(id).await.is_err());

    // Deleting again reports not-found.
    assert!(!db.delete_product(id).await.unwrap());
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn update_overwrites_scalars_and_nulls_absent_fields() {
    let db = test_db().await;
    let slug = unique_slug("overwrite");

    let mut initial = payload("Before", &slug, "autocad");
    initial.description = Some("original description".into());
    let id = db.create_product(&initial).await.unwrap();

    // Same identity, no description: the column must null out.
    let updated = payload("After", &slug, "autocad");
    db.update_product(id, &updated).await.unwrap();

    let product = db.get_product(id).await.unwrap();
    assert_eq!(product.name, "After");
    assert!(product.description.is_none());
    assert!(product.updated_at >= product.created_at);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn listing_sorts_by_category_then_name() {
    let db = test_db().await;
    let marker = unique_slug("sort");

    // Same category, names in reverse insertion order.
    let id_b = db
        .create_product(&payload(
            &format!("B {marker}"),
            &format!("{marker}-b"),
            "zz-sort-test",
        ))
        .await
        .unwrap();
    let id_a = db
        .create_product(&payload(
            &format!("A {marker}"),
            &format!("{marker}-a"),
            "zz-sort-test",
        ))
        .await
        .unwrap();

    let summaries = db.list_products().await.unwrap();
    let ours: Vec<_> = summaries
        .iter()
        .filter(|s| s.id == id_a || s.id == id_b)
        .collect();
    assert_eq!(ours.len(), 2);
    assert_eq!(ours[0].id, id_a, "same-category products sort by name");
    assert_eq!(ours[1].id, id_b);
}

// === Admin tests ===

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn create_and_get_admin() {
    let db = test_db().await;
    let username = unique_slug("admin");

    let admin = db.create_admin(&username, "hash123").await.unwrap();
    assert_eq!(admin.username, username);
    assert_eq!(admin.password_hash, "hash123");

    assert!(db.get_admin_by_username("no-such-admin").await.is_err());
}

// === Email log tests ===

#[tokio::test]
#[ignore = "requires PostgreSQL at DATABASE_URL"]
async fn email_logs_list_newest_first() {
    let db = test_db().await;
    let recipient = format!("{}@example.com", unique_slug("user"));

    for (i, status) in ["sent", "failed"].iter().enumerate() {
        db.insert_email_log(&NewEmailLog {
            recipient: recipient.clone(),
            subject: format!("Trial download {i}"),
            product_name: Some("OBJ Exporter".into()),
            download_url: None,
            status: (*status).to_string(),
            error: (*status == "failed").then(|| "SMTP rejected".to_string()),
        })
        .await
        .unwrap();
    }

    let logs = db.list_email_logs(200).await.unwrap();
    let ours: Vec<_> = logs.iter().filter(|l| l.recipient == recipient).collect();
    assert_eq!(ours.len(), 2);
    // Newest first.
    assert_eq!(ours[0].status, "failed");
    assert_eq!(ours[0].error.as_deref(), Some("SMTP rejected"));
    assert_eq!(ours[1].status, "sent");
}

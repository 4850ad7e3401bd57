//! Repository tests against a migrated in-memory SQLite database.
//!
//! Row counts are read straight from the tables so the all-or-nothing
//! behaviour of the aggregate writes is checked independently of the
//! repository's own read path.

use axum_helpers::SortOrder;
use domain_products::entity::{product, variant};
use domain_products::*;
use sea_orm::EntityTrait;
use test_utils::{TestDataBuilder, TestDatabase};
use uuid::Uuid;

fn payload(builder: &TestDataBuilder, images: &[&str]) -> PayloadProductAndVariant {
    PayloadProductAndVariant {
        user_id: builder.user_id(),
        brand_id: builder.brand_id(),
        product_name: builder.name("product", "main"),
        variant: PayloadVariant {
            variant_name: "Red/42".to_string(),
            price: 99.99,
            status: None,
            quantity: 5,
            images: images.iter().map(|s| s.to_string()).collect(),
        },
    }
}

fn actor(builder: &TestDataBuilder) -> PayloadProduct {
    PayloadProduct {
        user_id: builder.user_id(),
        brand_id: builder.brand_id(),
        product_name: builder.name("product", "main"),
    }
}

async fn assert_counts(db: &TestDatabase, products: i64, variants: i64, images: i64) {
    assert_eq!(db.count("products").await, products, "products");
    assert_eq!(db.count("variants").await, variants, "variants");
    assert_eq!(db.count("images").await, images, "images");
}

#[tokio::test]
async fn test_create_with_variant_writes_all_rows() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let builder = TestDataBuilder::from_test_name("create_writes_all_rows");

    let aggregate = ProductAndVariant::from_payload(payload(
        &builder,
        &["http://x/1.png", "http://x/2.png", "http://x/3.png"],
    ));
    let created = repo.create_with_variant(aggregate.clone()).await.unwrap();

    assert_eq!(created, aggregate);
    assert_counts(&db, 1, 1, 3).await;
}

#[tokio::test]
async fn test_create_with_variant_rolls_back_when_product_insert_fails() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let builder = TestDataBuilder::from_test_name("rollback_product_step");

    db.fail_inserts_where("products", "product_name", "boom").await;

    let mut input = payload(&builder, &["http://x/1.png"]);
    input.product_name = "boom".to_string();

    let err = repo
        .create_with_variant(ProductAndVariant::from_payload(input))
        .await
        .unwrap_err();

    assert!(matches!(err, ProductError::Internal(_)), "got {err:?}");
    assert_counts(&db, 0, 0, 0).await;
}

#[tokio::test]
async fn test_create_with_variant_rolls_back_when_variant_insert_fails() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let builder = TestDataBuilder::from_test_name("rollback_variant_step");

    db.fail_inserts_where("variants", "variant_name", "boom").await;

    let mut input = payload(&builder, &["http://x/1.png"]);
    input.variant.variant_name = "boom".to_string();

    let err = repo
        .create_with_variant(ProductAndVariant::from_payload(input))
        .await
        .unwrap_err();

    assert!(matches!(err, ProductError::Internal(_)), "got {err:?}");
    assert_counts(&db, 0, 0, 0).await;
}

#[tokio::test]
async fn test_create_with_variant_rolls_back_when_an_image_insert_fails() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let builder = TestDataBuilder::from_test_name("rollback_image_step");

    // The first image lands before the second one fails.
    db.fail_inserts_where("images", "image_url", "http://x/boom.png")
        .await;

    let input = payload(&builder, &["http://x/1.png", "http://x/boom.png"]);
    let err = repo
        .create_with_variant(ProductAndVariant::from_payload(input))
        .await
        .unwrap_err();

    assert!(matches!(err, ProductError::Internal(_)), "got {err:?}");
    assert_counts(&db, 0, 0, 0).await;
}

#[tokio::test]
async fn test_create_with_existing_product_id_conflicts_and_leaves_store_unchanged() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let builder = TestDataBuilder::from_test_name("create_duplicate_id");

    let aggregate = ProductAndVariant::from_payload(payload(&builder, &["http://x/1.png"]));
    repo.create_with_variant(aggregate.clone()).await.unwrap();

    // Same product id, fresh variant id.
    let mut again = aggregate.clone();
    again.variant.variant_id = Uuid::new_v4();
    for image in &mut again.variant.images {
        image.image_id = Uuid::new_v4();
        image.variant_id = again.variant.variant_id;
    }

    let err = repo.create_with_variant(again).await.unwrap_err();
    assert!(matches!(err, ProductError::Conflict(_)), "got {err:?}");
    assert_counts(&db, 1, 1, 1).await;
}

#[tokio::test]
async fn test_find_with_variants_fans_out_to_every_row() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let service = ProductService::new(repo.clone());
    let builder = TestDataBuilder::from_test_name("find_with_variants_fan_out");

    let created = service
        .create_with_variant(payload(&builder, &["http://x/1.png"]))
        .await
        .unwrap();
    let product_id = created.product.product_id;

    let no_images = PayloadVariant {
        variant_name: "Blue/41".to_string(),
        price: 89.0,
        status: Some(VariantStatus::Limited),
        quantity: 1,
        images: vec![],
    };
    let three_images = PayloadVariant {
        variant_name: "Black/43".to_string(),
        price: 109.5,
        status: Some(VariantStatus::OutOfStock),
        quantity: 0,
        images: vec![
            "http://x/c.png".to_string(),
            "http://x/a.png".to_string(),
            "http://x/b.png".to_string(),
        ],
    };
    service.add_variant(product_id, no_images).await.unwrap();
    let third = service.add_variant(product_id, three_images).await.unwrap();

    let aggregate = repo.find_with_variants(product_id).await.unwrap();

    assert_eq!(aggregate.product.product_id, product_id);
    assert_eq!(aggregate.variants.len() as i64, db.count("variants").await);

    let image_total: usize = aggregate.variants.iter().map(|v| v.images.len()).sum();
    assert_eq!(image_total as i64, db.count("images").await);

    let loaded = aggregate
        .variants
        .iter()
        .find(|v| v.variant_id == third.variant_id)
        .unwrap();
    assert_eq!(loaded.status, VariantStatus::OutOfStock);
    let urls: Vec<&str> = loaded.images.iter().map(|i| i.image_url.as_str()).collect();
    assert_eq!(urls, vec!["http://x/c.png", "http://x/a.png", "http://x/b.png"]);
}

#[tokio::test]
async fn test_find_with_variants_without_variants() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let builder = TestDataBuilder::from_test_name("find_with_variants_empty");

    let created = repo
        .create_with_variant(ProductAndVariant::from_payload(payload(&builder, &[])))
        .await
        .unwrap();

    let aggregate = repo
        .find_with_variants(created.product.product_id)
        .await
        .unwrap();
    assert_eq!(aggregate.variants.len(), 1);
    assert!(aggregate.variants[0].images.is_empty());
}

/// A missing product is reported as NotFound (404), not as an internal error.
#[tokio::test]
async fn test_missing_product_is_not_found_rather_than_internal() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let missing = Uuid::new_v4();

    assert!(matches!(
        repo.find_by_id(missing).await,
        Err(ProductError::NotFound(id)) if id == missing
    ));
    assert!(matches!(
        repo.find_with_variants(missing).await,
        Err(ProductError::NotFound(_))
    ));
    assert!(!repo.exists(missing).await.unwrap());
}

/// Two creates that both pass the existence check still cannot both land:
/// the primary key rejects the second write inside the transaction.
#[tokio::test]
async fn test_create_with_variant_maps_store_key_violation_to_conflict() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let builder = TestDataBuilder::from_test_name("create_store_key_violation");

    let first = ProductAndVariant::from_payload(payload(&builder, &["http://x/1.png"]));
    repo.create_with_variant(first.clone()).await.unwrap();

    // Fresh product id, so the probe passes; the variant id is already taken.
    let mut second = ProductAndVariant::from_payload(payload(&builder, &[]));
    second.variant.variant_id = first.variant.variant_id;

    let err = repo.create_with_variant(second).await.unwrap_err();
    assert!(matches!(err, ProductError::Conflict(_)), "got {err:?}");
    assert_counts(&db, 1, 1, 1).await;
}

#[tokio::test]
async fn test_store_errors_convert_by_constraint_kind() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("store_error_kinds");
    let conn = db.connection();

    let aggregate = ProductAndVariant::from_payload(payload(&builder, &[]));
    product::Entity::insert(product::ActiveModel::from(&aggregate.product))
        .exec_without_returning(&conn)
        .await
        .unwrap();

    let duplicate = product::Entity::insert(product::ActiveModel::from(&aggregate.product))
        .exec_without_returning(&conn)
        .await
        .unwrap_err();
    let err = ProductError::from(duplicate);
    assert!(matches!(err, ProductError::Conflict(_)), "got {err:?}");

    // A variant pointing at no product breaks the foreign key, not a unique key.
    let mut orphan = aggregate.variant.clone();
    orphan.product_id = Uuid::new_v4();
    let dangling = variant::Entity::insert(variant::ActiveModel::from(&orphan))
        .exec_without_returning(&conn)
        .await
        .unwrap_err();
    let err = ProductError::from(dangling);
    assert!(matches!(err, ProductError::Internal(_)), "got {err:?}");
}

#[tokio::test]
async fn test_soft_delete_twice_conflicts_and_keeps_first_deletion() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.db()));
    let builder = TestDataBuilder::from_test_name("soft_delete_twice");

    let created = service
        .create_with_variant(payload(&builder, &["http://x/1.png"]))
        .await
        .unwrap();
    let id = created.product.product_id;

    let first = service.soft_delete(id, actor(&builder)).await.unwrap();
    assert!(first.is_deleted());

    let mut other = actor(&builder);
    other.user_id = Uuid::new_v4();
    let err = service.soft_delete(id, other).await.unwrap_err();
    assert!(matches!(err, ProductError::Conflict(_)), "got {err:?}");

    let stored = service.get_by_id(id).await.unwrap();
    assert_eq!(stored.deleted_by, first.deleted_by);
    assert_eq!(
        stored.deleted_at.map(|t| t.timestamp_micros()),
        first.deleted_at.map(|t| t.timestamp_micros())
    );
}

#[tokio::test]
async fn test_soft_delete_marks_variants() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.db()));
    let builder = TestDataBuilder::from_test_name("soft_delete_variants");

    let created = service
        .create_with_variant(payload(&builder, &[]))
        .await
        .unwrap();
    let id = created.product.product_id;

    service.soft_delete(id, actor(&builder)).await.unwrap();

    let aggregate = service.get_with_variants(id).await.unwrap();
    assert_eq!(aggregate.variants[0].deleted_by, Some(builder.user_id()));
    assert!(aggregate.variants[0].deleted_at.is_some());
}

#[tokio::test]
async fn test_update_with_stale_version_conflicts() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let builder = TestDataBuilder::from_test_name("update_stale_version");

    let created = repo
        .create_with_variant(ProductAndVariant::from_payload(payload(&builder, &[])))
        .await
        .unwrap();

    let mut first = created.product.clone();
    first.product_name = "first writer".to_string();
    let saved = repo.update(first).await.unwrap();
    assert_eq!(saved.version, created.product.version + 1);

    let mut stale = created.product.clone();
    stale.product_name = "second writer".to_string();
    let err = repo.update(stale).await.unwrap_err();
    assert!(matches!(err, ProductError::Conflict(_)), "got {err:?}");

    let stored = repo.find_by_id(created.product.product_id).await.unwrap();
    assert_eq!(stored.product_name, "first writer");
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let builder = TestDataBuilder::from_test_name("update_missing");

    let product = Product::from_payload(actor(&builder));
    let err = repo.update(product).await.unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));
}

#[tokio::test]
async fn test_update_changes_name_and_brand() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.db()));
    let builder = TestDataBuilder::from_test_name("update_name_brand");

    let created = service
        .create_with_variant(payload(&builder, &[]))
        .await
        .unwrap();

    let brand = Uuid::new_v4();
    let updated = service
        .update(
            created.product.product_id,
            PayloadProduct {
                user_id: builder.user_id(),
                brand_id: brand,
                product_name: "Boot".to_string(),
            },
        )
        .await
        .unwrap();

    let stored = service.get_by_id(updated.product_id).await.unwrap();
    assert_eq!(stored.product_name, "Boot");
    assert_eq!(stored.brand_id, brand);
    assert_eq!(stored.updated_by, Some(builder.user_id()));
    assert_eq!(stored.created_by, created.product.created_by);
}

#[tokio::test]
async fn test_hard_delete_cascades_to_variants_and_images() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let builder = TestDataBuilder::from_test_name("hard_delete_cascade");

    let created = repo
        .create_with_variant(ProductAndVariant::from_payload(payload(
            &builder,
            &["http://x/1.png", "http://x/2.png"],
        )))
        .await
        .unwrap();
    assert_counts(&db, 1, 1, 2).await;

    repo.hard_delete(created.product.product_id).await.unwrap();
    assert_counts(&db, 0, 0, 0).await;

    let err = repo
        .hard_delete(created.product.product_id)
        .await
        .unwrap_err();
    assert!(matches!(err, ProductError::NotFound(_)));
}

#[tokio::test]
async fn test_list_orders_and_pages() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.db());
    let builder = TestDataBuilder::from_test_name("list_orders_and_pages");

    for name in ["bravo", "alpha", "charlie"] {
        let mut input = payload(&builder, &[]);
        input.product_name = name.to_string();
        repo.create_with_variant(ProductAndVariant::from_payload(input))
            .await
            .unwrap();
    }

    let names = |products: Vec<Product>| -> Vec<String> {
        products.into_iter().map(|p| p.product_name).collect()
    };

    let first_page = repo
        .list(ProductListQuery {
            field: ProductSortField::ProductName,
            sort: SortOrder::Desc,
            limit: 2,
            offset: 0,
        })
        .await
        .unwrap();
    assert_eq!(names(first_page), vec!["charlie", "bravo"]);

    let second_page = repo
        .list(ProductListQuery {
            field: ProductSortField::ProductName,
            sort: SortOrder::Desc,
            limit: 2,
            offset: 2,
        })
        .await
        .unwrap();
    assert_eq!(names(second_page), vec!["alpha"]);
}

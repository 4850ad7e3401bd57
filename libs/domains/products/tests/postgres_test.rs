//! Tests against a real PostgreSQL server.
//!
//! They need Docker, so they are ignored by default:
//! `cargo test -p domain_products --test postgres_test -- --ignored`

use domain_products::*;
use test_utils::{TestDataBuilder, TestPostgres};

fn payload(builder: &TestDataBuilder) -> PayloadProductAndVariant {
    PayloadProductAndVariant {
        user_id: builder.user_id(),
        brand_id: builder.brand_id(),
        product_name: builder.name("product", "pg"),
        variant: PayloadVariant {
            variant_name: "Red/42".to_string(),
            price: 99.99,
            status: None,
            quantity: 5,
            images: vec!["http://x/1.png".to_string(), "http://x/2.png".to_string()],
        },
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_aggregate_round_trip_across_read_and_write_pools() {
    let pg = TestPostgres::start().await;
    let service = ProductService::new(PgProductRepository::new(pg.db()));
    let builder = TestDataBuilder::from_test_name("pg_round_trip");

    let created = service.create_with_variant(payload(&builder)).await.unwrap();
    let id = created.product.product_id;

    let aggregate = service.get_with_variants(id).await.unwrap();
    assert_eq!(aggregate.variants.len(), 1);
    assert_eq!(aggregate.variants[0].images.len(), 2);
    assert_eq!(aggregate.variants[0].images[0].image_url, "http://x/1.png");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_hard_delete_cascades_on_postgres() {
    let pg = TestPostgres::start().await;
    let repo = PgProductRepository::new(pg.db());
    let builder = TestDataBuilder::from_test_name("pg_cascade");

    let created = repo
        .create_with_variant(ProductAndVariant::from_payload(payload(&builder)))
        .await
        .unwrap();
    assert_eq!(pg.count("images").await, 2);

    repo.hard_delete(created.product.product_id).await.unwrap();

    assert_eq!(pg.count("products").await, 0);
    assert_eq!(pg.count("variants").await, 0);
    assert_eq!(pg.count("images").await, 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_soft_delete_conflicts_on_postgres() {
    let pg = TestPostgres::start().await;
    let service = ProductService::new(PgProductRepository::new(pg.db()));
    let builder = TestDataBuilder::from_test_name("pg_soft_delete");

    let created = service.create_with_variant(payload(&builder)).await.unwrap();
    let id = created.product.product_id;
    let actor = PayloadProduct {
        user_id: builder.user_id(),
        brand_id: builder.brand_id(),
        product_name: builder.name("product", "pg"),
    };

    service.soft_delete(id, actor.clone()).await.unwrap();
    let err = service.soft_delete(id, actor).await.unwrap_err();
    assert!(matches!(err, ProductError::Conflict(_)));
}

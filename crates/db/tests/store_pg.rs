//! `PgStore` against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL` set and `--ignored`; `sqlx::test` creates a
//! throwaway database per test and applies the migrations.

use std::str::FromStr;

use assert_matches::assert_matches;
use bazaar_core::cart::{Cart, CartStore};
use bazaar_core::pagination::Page;
use bazaar_core::types::SessionId;
use bazaar_db::models::category::{CreateCategory, UpdateCategory};
use bazaar_db::models::order::CreateOrder;
use bazaar_db::models::product::{CreateProduct, ProductFilter, UpdateProduct};
use bazaar_db::models::user::CreateUser;
use bazaar_db::store::{CatalogStore, CredentialStore, OrderStore, PgStore, StoreError};
use rust_decimal::Decimal;
use sqlx::PgPool;

fn category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
    }
}

fn product(category_id: i64, name: &str) -> CreateProduct {
    CreateProduct {
        name: name.to_string(),
        image: None,
        description: "desc".to_string(),
        price: Decimal::from_str("19.99").unwrap(),
        category_id,
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn category_delete_cascades_to_products(pool: PgPool) {
    let store = PgStore::new(pool);
    let shoes = store.create_category(&category("Shoes")).await.unwrap();
    let boot = store.create_product(&product(shoes.id, "Boot")).await.unwrap();

    assert!(store.delete_category(shoes.id).await.unwrap());

    assert!(store.find_product(boot.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn duplicate_category_name_is_unique_violation(pool: PgPool) {
    let store = PgStore::new(pool);
    store.create_category(&category("Shoes")).await.unwrap();

    let err = store.create_category(&category("Shoes")).await.unwrap_err();

    assert_matches!(err, StoreError::UniqueViolation { ref constraint } if constraint == "uq_categories_name");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn product_with_missing_category_is_fk_violation(pool: PgPool) {
    let store = PgStore::new(pool);

    let err = store.create_product(&product(999, "Ghost")).await.unwrap_err();

    assert_matches!(err, StoreError::ForeignKeyViolation { .. });
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn explicit_null_clears_product_image(pool: PgPool) {
    let store = PgStore::new(pool);
    let shoes = store.create_category(&category("Shoes")).await.unwrap();
    let boot = store
        .create_product(&CreateProduct {
            image: Some("https://cdn.example.com/boot.png".into()),
            ..product(shoes.id, "Boot")
        })
        .await
        .unwrap();

    let repriced = store
        .update_product(
            boot.id,
            &UpdateProduct {
                price: Some(Decimal::from_str("5.00").unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(repriced.image, boot.image);

    let cleared = store
        .update_product(
            boot.id,
            &UpdateProduct {
                image: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.image, None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn updates_keep_omitted_fields(pool: PgPool) {
    let store = PgStore::new(pool);
    let shoes = store.create_category(&category("Shoes")).await.unwrap();
    let boot = store.create_product(&product(shoes.id, "Boot")).await.unwrap();

    let updated = store
        .update_product(
            boot.id,
            &UpdateProduct {
                price: Some(Decimal::from_str("5.00").unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Boot");
    assert_eq!(updated.price, Decimal::from_str("5.00").unwrap());

    let renamed = store
        .update_category(
            shoes.id,
            &UpdateCategory {
                name: Some("  Footwear ".into()),
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "Footwear");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn product_listing_filters_by_category(pool: PgPool) {
    let store = PgStore::new(pool);
    let shoes = store.create_category(&category("Shoes")).await.unwrap();
    let hats = store.create_category(&category("Hats")).await.unwrap();
    store.create_product(&product(shoes.id, "Boot")).await.unwrap();
    store.create_product(&product(hats.id, "Cap")).await.unwrap();

    let filter = ProductFilter {
        category_id: Some(hats.id),
    };
    let products = store.list_products(&filter, Page::default()).await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Cap");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn orders_require_an_existing_user(pool: PgPool) {
    let store = PgStore::new(pool);
    let user = store
        .create_user(&CreateUser {
            username: "alice".into(),
            email: None,
            password_hash: "$argon2id$placeholder".into(),
        })
        .await
        .unwrap();

    let order = store
        .create_order(&CreateOrder {
            user_id: user.id,
            total_price: Decimal::from_str("10.00").unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(order.user_id, user.id);

    let err = store
        .create_order(&CreateOrder {
            user_id: user.id + 1000,
            total_price: Decimal::ONE,
        })
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::ForeignKeyViolation { .. });
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a running PostgreSQL instance"]
async fn cart_round_trips_and_expires(pool: PgPool) {
    let store = PgStore::new(pool);
    let session = SessionId::generate();
    let mut cart = Cart::new();
    cart.add(7, 5).unwrap();

    store.save(session, &cart).await.unwrap();
    assert_eq!(store.load(session).await.unwrap(), Some(cart));

    let expired = store.clone().with_cart_ttl(chrono::Duration::zero());
    assert_eq!(expired.load(session).await.unwrap(), None);
    assert_eq!(expired.sweep_idle_carts().await.unwrap(), 1);
}

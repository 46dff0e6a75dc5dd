// tests for query execution
// run with: cargo test --features test-db
// requires DATABASE_URL pointing at a store schema seeded with products

#![cfg(feature = "test-db")]

use shopchat::{Db, validate};

fn get_db_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for db tests")
}

#[tokio::test]
async fn test_connect() {
    let db = Db::connect(&get_db_url()).await;
    assert!(db.is_ok());
}

#[tokio::test]
async fn test_fetch_all_products() {
    let db = Db::connect(&get_db_url()).await.unwrap();
    let query = validate("SELECT * FROM product").unwrap();
    let products = db.fetch_products(&query).await.unwrap();

    assert!(!products.is_empty());
    for product in &products {
        assert!(!product.name.is_empty());
        assert!(product.price >= 0.0);
    }
}

#[tokio::test]
async fn test_fetch_with_category_filter() {
    let db = Db::connect(&get_db_url()).await.unwrap();
    let query =
        validate("SELECT * FROM product WHERE category = 'Electronics'").unwrap();
    let products = db.fetch_products(&query).await.unwrap();

    for product in &products {
        assert_eq!(product.category, "Electronics");
    }
}

#[tokio::test]
async fn test_empty_result_is_empty_vec() {
    let db = Db::connect(&get_db_url()).await.unwrap();
    let query = validate("SELECT * FROM product WHERE id = -999").unwrap();
    let products = db.fetch_products(&query).await.unwrap();

    assert!(products.is_empty());
}

#[tokio::test]
async fn test_projection_without_image_still_maps() {
    // image_url is the one optional column
    let db = Db::connect(&get_db_url()).await.unwrap();
    let query =
        validate("SELECT id, category, description, name, price FROM product").unwrap();
    let products = db.fetch_products(&query).await.unwrap();

    assert!(!products.is_empty());
    assert!(products.iter().all(|p| p.image_url.is_none()));
}

#[tokio::test]
async fn test_missing_required_column_is_fatal() {
    let db = Db::connect(&get_db_url()).await.unwrap();
    let query = validate("SELECT id, name FROM product").unwrap();

    // no category/description/price columns in the row
    assert!(db.fetch_products(&query).await.is_err());
}

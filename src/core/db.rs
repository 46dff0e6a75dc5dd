// database connection and read-only query execution
// supports postgres, sqlite, and mysql through the any driver

use super::guard::ValidatedQuery;
use crate::Error;
use serde::Serialize;
use sqlx::{AnyPool, Row, any::AnyPoolOptions};

/// One catalog row. The pipeline only ever reads these; writes go through
/// the surrounding application, never through here.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Product {
    pub id: i64,
    pub category: String,
    pub description: String,
    pub image_url: Option<String>,
    pub name: String,
    pub price: f64,
}

pub struct Db {
    pool: AnyPool,
    dialect: &'static str,
}

impl Db {
    pub async fn connect(url: &str) -> Result<Self, Error> {
        sqlx::any::install_default_drivers();

        let dialect = detect_dialect(url);

        let pool = AnyPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;

        Ok(Self { pool, dialect })
    }

    pub fn dialect_name(&self) -> &'static str {
        self.dialect
    }

    // run validated sql verbatim and map rows into products
    // a row missing a required column fails the whole request, no partials
    pub async fn fetch_products(&self, query: &ValidatedQuery) -> Result<Vec<Product>, Error> {
        let rows = sqlx::query(query.as_str()).fetch_all(&self.pool).await?;

        let mut products = Vec::with_capacity(rows.len());
        for row in &rows {
            products.push(Product {
                id: row.try_get("id")?,
                category: row.try_get("category")?,
                description: row.try_get("description")?,
                // not every projection carries the image column
                image_url: row.try_get("image_url").ok(),
                name: row.try_get("name")?,
                price: row.try_get("price")?,
            });
        }

        Ok(products)
    }
}

fn detect_dialect(url: &str) -> &'static str {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        "postgres"
    } else if url.starts_with("mysql://") || url.starts_with("mariadb://") {
        "mysql"
    } else {
        "sqlite"
    }
}

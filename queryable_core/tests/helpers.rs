//! Shared fixtures for queryable_core integration tests.

#![allow(dead_code)]

use std::str::FromStr;

use chrono::DateTime;
use iso_currency::Currency;
use rust_decimal::Decimal;

use queryable_core::ValueType;
use queryable_core::batch::ChunkOptions;
use queryable_core::category::Category;
use queryable_core::domain::catalog::{
    Catalog, CatalogSettings, Product, ProductAttribute, ProductAttributeValue, ProductPrice,
};
use queryable_core::domain::news::{Article, News};
use queryable_core::{QueryConfig, TypedValue};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn d(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn config() -> QueryConfig {
    QueryConfig::default()
}

fn price(currency: Currency, amount: &str, discounted: Option<&str>) -> ProductPrice {
    ProductPrice {
        currency,
        price: d(amount),
        price_discounted: discounted.map(d),
    }
}

fn product(
    slug: &str,
    title: &str,
    category: &str,
    prices: Vec<ProductPrice>,
    width: i64,
    color: &str,
) -> Product {
    Product {
        slug: slug.to_string(),
        title: title.to_string(),
        description: format!("{} for every home", title),
        categories: vec![category.to_string()],
        prices,
        attributes: vec![
            ProductAttributeValue {
                attribute: "width".to_string(),
                value: TypedValue::Integer(width),
            },
            ProductAttributeValue {
                attribute: "color".to_string(),
                value: TypedValue::String(color.to_string()),
            },
        ],
    }
}

/// Five products. Effective USD prices: 120, 60, 500, 10 and 30.
pub fn products() -> Vec<Product> {
    vec![
        product(
            "oak-chair",
            "Oak Chair",
            "chairs",
            vec![price(Currency::USD, "120", None), price(Currency::EUR, "110", None)],
            40,
            "brown",
        ),
        product(
            "steel-chair",
            "Steel Chair",
            "chairs",
            vec![price(Currency::USD, "80", Some("60"))],
            45,
            "grey",
        ),
        product(
            "dining-table",
            "Dining Table",
            "tables",
            vec![price(Currency::USD, "500", None)],
            160,
            "brown",
        ),
        product(
            "side-table",
            "Side Table",
            "tables",
            vec![price(Currency::USD, "10", None), price(Currency::EUR, "9", None)],
            20,
            "white",
        ),
        product(
            "desk-lamp",
            "Desk Lamp",
            "lighting",
            vec![price(Currency::USD, "30", None)],
            30,
            "white",
        ),
    ]
}

/// Furniture (chairs, tables) and lighting, all visible.
pub fn categories() -> Vec<Category> {
    vec![
        Category::new("furniture", "Furniture", None),
        Category::new("chairs", "Chairs", Some("furniture")),
        Category::new("tables", "Tables", Some("furniture")),
        Category::new("lighting", "Lighting", None),
    ]
}

pub fn catalog() -> Catalog {
    catalog_with(categories())
}

pub fn catalog_with(categories: Vec<Category>) -> Catalog {
    init_logging();

    let mut catalog = Catalog::new(
        CatalogSettings {
            available_currencies: vec![Currency::USD, Currency::EUR],
        },
        categories,
        vec![
            ProductAttribute::new("width", "Width", ValueType::Integer),
            ProductAttribute::new("color", "Color", ValueType::String),
        ],
    )
    .unwrap();

    catalog
        .import_products(products(), ChunkOptions::new(2, 1).unwrap())
        .unwrap();
    catalog
}

fn article(slug: &str, title: &str, published_at: &str) -> Article {
    Article {
        slug: slug.to_string(),
        title: title.to_string(),
        description: format!("All about {}", title.to_lowercase()),
        published_at: DateTime::parse_from_rfc3339(published_at).unwrap(),
    }
}

/// Three articles, inserted neither by date nor by title.
pub fn news() -> News {
    init_logging();

    News::new(vec![
        article("spring-sale", "Spring Sale", "2024-03-01T09:00:00+00:00"),
        article("new-chairs", "New Chairs Arrived", "2024-05-20T12:30:00+02:00"),
        article("autumn-lamps", "Autumn Lamps", "2023-10-15T08:00:00+00:00"),
    ])
}

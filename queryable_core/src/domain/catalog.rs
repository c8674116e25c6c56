//! Product catalog: priced, categorised products with typed attributes

use std::collections::HashSet;
use std::sync::Arc;

use iso_currency::Currency;
use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AttributeCatalog, BoundsSource};
use crate::QueryError;
use crate::batch::{ChunkOptions, ChunkWriteError, write_by_chunks};
use crate::category::{Category, CategoryTree};
use crate::config::QueryConfig;
use crate::envelope::ResponseEnvelope;
use crate::filter::{
    AllowedFilter, AttributeDescriptor, ExactFilter, FilterBuilder, FilterKind, FilterService,
    FilterSet, FilterValue, HierarchicalFilter, MultiselectFilter, NestedValues, RangeFilter,
};
use crate::listing::run_listing;
use crate::money::{Money, parse_currency};
use crate::params::{FILTER_KEY, FilterParam, QueryParams};
use crate::query::{Condition, FieldRef, FilterOperator, Operand, OrderKey, OrderSpec};
use crate::record::{FieldId, FieldValue, Record, RecordId};
use crate::sort::{AllowedSort, SortService, SortSet};
use crate::value::{TypedValue, ValueType};

pub const PRODUCTS_PATH: &str = "/products";

const TITLE_FIELD: &str = "title";
const DESCRIPTION_FIELD: &str = "description";
const CATEGORIES_FIELD: &str = "categories";

fn price_field(code: &str) -> String {
    format!("price.{}", code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductAllowedFilter {
    Title,
    Description,
    Category,
    Currency,
    PriceBetween,
    Attribute,
}

impl AllowedFilter for ProductAllowedFilter {
    fn key(&self) -> &'static str {
        match self {
            ProductAllowedFilter::Title => "TITLE",
            ProductAllowedFilter::Description => "DESCRIPTION",
            ProductAllowedFilter::Category => "CATEGORY",
            ProductAllowedFilter::Currency => "CURRENCY",
            ProductAllowedFilter::PriceBetween => "PRICE_BETWEEN",
            ProductAllowedFilter::Attribute => "ATTRIBUTE",
        }
    }

    fn kind(&self) -> FilterKind {
        match self {
            ProductAllowedFilter::Title
            | ProductAllowedFilter::Description
            | ProductAllowedFilter::Currency => FilterKind::Exact,
            ProductAllowedFilter::Category => FilterKind::Hierarchical,
            ProductAllowedFilter::PriceBetween => FilterKind::Range,
            ProductAllowedFilter::Attribute => FilterKind::Multiselect,
        }
    }

    fn title(&self) -> String {
        let title = match self {
            ProductAllowedFilter::Title => "Title",
            ProductAllowedFilter::Description => "Description",
            ProductAllowedFilter::Category => "Categories",
            ProductAllowedFilter::Currency => "Currency",
            ProductAllowedFilter::PriceBetween => "Price",
            ProductAllowedFilter::Attribute => "Attributes",
        };
        title.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductAllowedSort {
    Title,
    TitleDesc,
    Price,
    PriceDesc,
    Default,
}

impl AllowedSort for ProductAllowedSort {
    fn key(&self) -> &'static str {
        match self {
            ProductAllowedSort::Title => "TITLE",
            ProductAllowedSort::TitleDesc => "TITLE_DESC",
            ProductAllowedSort::Price => "PRICE",
            ProductAllowedSort::PriceDesc => "PRICE_DESC",
            ProductAllowedSort::Default => "DEFAULT",
        }
    }

    fn title(&self) -> String {
        let title = match self {
            ProductAllowedSort::Title => "Alphabetical",
            ProductAllowedSort::TitleDesc => "Reverse Alphabetical",
            ProductAllowedSort::Price => "Cheap First",
            ProductAllowedSort::PriceDesc => "Expensive First",
            ProductAllowedSort::Default => "Relevance",
        };
        title.to_string()
    }
}

/// A product's price in one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPrice {
    pub currency: Currency,
    pub price: Decimal,
    #[serde(default)]
    pub price_discounted: Option<Decimal>,
}

impl ProductPrice {
    /// The price a customer pays: the discounted one when there is one.
    pub fn effective(&self) -> Money {
        Money::new(self.price_discounted.unwrap_or(self.price), self.currency)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributeValue {
    pub attribute: String,
    pub value: TypedValue,
}

/// An attribute products can carry, e.g. `width` of type integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAttribute {
    pub slug: String,
    pub title: String,
    pub values_type: ValueType,
}

impl ProductAttribute {
    pub fn new(slug: &str, title: &str, values_type: ValueType) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            values_type,
        }
    }

    pub fn descriptor(&self) -> AttributeDescriptor {
        AttributeDescriptor::new(&self.slug, &self.title, self.values_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub prices: Vec<ProductPrice>,
    #[serde(default)]
    pub attributes: Vec<ProductAttributeValue>,
}

impl Product {
    pub fn price_in(&self, currency: Currency) -> Option<&ProductPrice> {
        self.prices.iter().find(|p| p.currency == currency)
    }

    fn to_record(&self) -> Record {
        let categories = self
            .categories
            .iter()
            .map(|slug| FieldValue::from(slug.as_str()))
            .collect();

        let mut record = Record::new(RecordId::new(self.slug.as_str()))
            .with_field(FieldId::new(TITLE_FIELD), self.title.as_str())
            .with_field(FieldId::new(DESCRIPTION_FIELD), self.description.as_str())
            .with_field(FieldId::new(CATEGORIES_FIELD), FieldValue::List(categories));

        for price in &self.prices {
            record = record.with_field(FieldId::new(price_field(price.currency.code())), price.effective());
        }
        for attribute in &self.attributes {
            record = record.with_attribute(attribute.attribute.as_str(), attribute.value.clone());
        }
        record
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    pub available_currencies: Vec<Currency>,
}

/// Everything needed to populate a catalog
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogData {
    pub settings: CatalogSettings,
    pub categories: Vec<Category>,
    pub attributes: Vec<ProductAttribute>,
    pub products: Vec<Product>,
}

/// A product as listed in the `data` section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductView {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub categories: Vec<String>,
    pub price: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_discounted: Option<Money>,
    pub attributes: Vec<ProductAttributeView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductAttributeView {
    pub attribute: AttributeDescriptor,
    pub value: TypedValue,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    settings: CatalogSettings,
    categories: Arc<CategoryTree>,
    attributes: Vec<ProductAttribute>,
    products: Vec<Product>,
    records: Vec<Record>,
}

impl Catalog {
    pub fn new(
        settings: CatalogSettings,
        categories: Vec<Category>,
        attributes: Vec<ProductAttribute>,
    ) -> Result<Self, QueryError> {
        {
            let mut seen = HashSet::new();
            if let Some(duplicate) = attributes.iter().find(|a| !seen.insert(a.slug.as_str())) {
                return Err(QueryError::configuration(format!(
                    "attribute '{}' is declared twice",
                    duplicate.slug
                )));
            }
        }

        Ok(Self {
            settings,
            categories: Arc::new(CategoryTree::build(categories)?),
            attributes,
            products: Vec::new(),
            records: Vec::new(),
        })
    }

    /// Build a catalog and import its products.
    pub fn from_data(data: CatalogData, options: ChunkOptions) -> Result<Self, QueryError> {
        let mut catalog = Self::new(data.settings, data.categories, data.attributes)?;
        catalog
            .import_products(data.products, options)
            .map_err(|e| e.source)?;
        Ok(catalog)
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &CategoryTree {
        &self.categories
    }

    /// Validate and add products chunk by chunk, returning their slugs.
    ///
    /// Products written before a failing chunk stay in the catalog.
    pub fn import_products(
        &mut self,
        products: Vec<Product>,
        options: ChunkOptions,
    ) -> Result<Vec<String>, ChunkWriteError<String, QueryError>> {
        self.check_unique_slugs(&products, options)?;

        let result = write_by_chunks(&products, options, |slice| {
            slice
                .iter()
                .map(|product| self.normalize_product(product))
                .collect::<Result<Vec<_>, _>>()
        });

        match result {
            Ok(normalized) => {
                let slugs = self.insert(normalized);
                info!("Imported {} products", slugs.len());
                Ok(slugs)
            }
            Err(ChunkWriteError {
                written,
                chunk,
                source,
            }) => Err(ChunkWriteError {
                written: self.insert(written),
                chunk,
                source,
            }),
        }
    }

    fn check_unique_slugs(
        &self,
        products: &[Product],
        options: ChunkOptions,
    ) -> Result<(), ChunkWriteError<String, QueryError>> {
        let mut seen: HashSet<&str> = self.products.iter().map(|p| p.slug.as_str()).collect();
        for (position, product) in products.iter().enumerate() {
            if !seen.insert(product.slug.as_str()) {
                return Err(ChunkWriteError {
                    written: Vec::new(),
                    chunk: position / options.chunk_size(),
                    source: QueryError::invalid_value(
                        "products.slug",
                        product.slug.as_str(),
                        "a unique product slug",
                    ),
                });
            }
        }
        Ok(())
    }

    fn insert(&mut self, products: Vec<Product>) -> Vec<String> {
        let mut slugs = Vec::with_capacity(products.len());
        for product in products {
            slugs.push(product.slug.clone());
            self.records.push(product.to_record());
            self.products.push(product);
        }
        slugs
    }

    /// Check a product against the category tree and attribute catalog,
    /// rounding prices and widening integer values of float attributes.
    pub fn normalize_product(&self, product: &Product) -> Result<Product, QueryError> {
        let key = |field: &str| format!("products.{}.{}", product.slug, field);

        if let Some(unknown) = product.categories.iter().find(|c| !self.categories.contains(c)) {
            return Err(QueryError::invalid_value(
                key(CATEGORIES_FIELD),
                unknown.as_str(),
                "a known category",
            ));
        }

        let mut currencies = HashSet::new();
        let mut prices = Vec::with_capacity(product.prices.len());
        for price in &product.prices {
            if !currencies.insert(price.currency) {
                return Err(QueryError::invalid_value(
                    key("prices"),
                    price.currency.code(),
                    "one price per currency",
                ));
            }
            prices.push(ProductPrice {
                currency: price.currency,
                price: Money::new(price.price, price.currency).amount(),
                price_discounted: price
                    .price_discounted
                    .map(|discounted| Money::new(discounted, price.currency).amount()),
            });
        }

        let mut slugs = HashSet::new();
        let mut attributes = Vec::with_capacity(product.attributes.len());
        for value in &product.attributes {
            let attribute = self.attribute(&value.attribute).ok_or_else(|| {
                QueryError::invalid_value(key("attributes"), value.attribute.as_str(), "a known attribute")
            })?;
            if !slugs.insert(attribute.slug.as_str()) {
                return Err(QueryError::invalid_value(
                    key("attributes"),
                    attribute.slug.as_str(),
                    "one value per attribute",
                ));
            }
            if !value.value.fits(attribute.values_type) {
                return Err(QueryError::invalid_value(
                    key(&attribute.slug),
                    value.value.to_string(),
                    attribute.values_type.as_str(),
                ));
            }
            let normalized = match (&value.value, attribute.values_type) {
                (TypedValue::Integer(i), ValueType::Float) => TypedValue::Float(*i as f64),
                (other, _) => other.clone(),
            };
            attributes.push(ProductAttributeValue {
                attribute: attribute.slug.clone(),
                value: normalized,
            });
        }

        Ok(Product {
            prices,
            attributes,
            ..product.clone()
        })
    }

    /// A product is listed only while at least one of its categories is visible.
    pub fn is_visible(&self, product: &Product) -> bool {
        product.categories.iter().any(|slug| self.categories.is_visible(slug))
    }

    fn visible_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| self.is_visible(product))
    }

    fn visibility_condition(&self) -> Condition {
        let slugs = self.categories.visible_slugs();
        Condition::compare(
            FieldRef::field(CATEGORIES_FIELD),
            FilterOperator::In,
            Operand::List(slugs.into_iter().map(Operand::String).collect()),
        )
    }

    fn attribute(&self, slug: &str) -> Option<&ProductAttribute> {
        self.attributes.iter().find(|a| a.slug == slug)
    }

    /// The filters products can be listed by, with prices in `currency`.
    pub fn filters(&self, currency: Currency) -> Result<FilterSet<ProductAllowedFilter>, QueryError> {
        let builder = ProductFilterBuilder {
            catalog: self,
            currency,
        };

        let filters = FilterService::<ProductAllowedFilter>::new(&builder)
            .add_search_filter(ProductAllowedFilter::Title, |filter| {
                Ok(Condition::compare(
                    FieldRef::field(TITLE_FIELD),
                    FilterOperator::Contains,
                    filter.selected_text()?,
                ))
            })?
            .add_filter(ProductAllowedFilter::Description, |filter| {
                Ok(Condition::compare(
                    FieldRef::field(DESCRIPTION_FIELD),
                    FilterOperator::Contains,
                    filter.selected_text()?,
                ))
            })?
            .add_filter(ProductAllowedFilter::Category, |filter| {
                Ok(filter
                    .as_hierarchical()?
                    .condition(FieldRef::field(CATEGORIES_FIELD)))
            })?
            .add_filter(ProductAllowedFilter::Currency, |filter| {
                Ok(Condition::Exists(FieldRef::field(price_field(
                    filter.selected_text()?,
                ))))
            })?
            .add_filter(ProductAllowedFilter::PriceBetween, move |filter| {
                Ok(filter
                    .as_range()?
                    .condition(FieldRef::field(price_field(currency.code()))))
            })?
            .add_filter(ProductAllowedFilter::Attribute, |filter| {
                Ok(filter.as_multiselect()?.condition())
            })?
            .build();

        Ok(filters)
    }

    /// The sorts products can be listed by, with prices in `currency`.
    pub fn sorts(currency: Currency) -> Result<SortSet<ProductAllowedSort>, QueryError> {
        let title = || FieldRef::field(TITLE_FIELD);
        let price = || FieldRef::field(price_field(currency.code()));

        SortService::new()
            .add_default_sort(ProductAllowedSort::Title, OrderSpec::by(OrderKey::asc(title())))
            .add_sort(ProductAllowedSort::TitleDesc, OrderSpec::by(OrderKey::desc(title())))
            .add_sort(
                ProductAllowedSort::Price,
                OrderSpec::by(OrderKey::asc(price())).then(OrderKey::asc(title())),
            )
            .add_sort(
                ProductAllowedSort::PriceDesc,
                OrderSpec::by(OrderKey::desc(price())).then(OrderKey::asc(title())),
            )
            .add_default_search_sort(ProductAllowedSort::Default, OrderSpec::Natural)
            .build()
    }

    /// List products for a request. `filter[CURRENCY]` is required.
    pub fn index(
        &self,
        params: &QueryParams,
        config: &QueryConfig,
    ) -> Result<ResponseEnvelope<ProductView>, QueryError> {
        let currency = self.requested_currency(params)?;
        debug!("Listing products in {}", currency.code());

        let listing = run_listing(
            &self.records,
            Some(self.visibility_condition()),
            self.filters(currency)?,
            Self::sorts(currency)?,
            params,
            config,
        )?;

        let page = listing.page.try_map(|record| self.view(record, currency))?;
        Ok(ResponseEnvelope::new(
            page,
            &config.path(PRODUCTS_PATH),
            listing.query,
        ))
    }

    fn requested_currency(&self, params: &QueryParams) -> Result<Currency, QueryError> {
        let key = ProductAllowedFilter::Currency.key();
        let param_key = format!("{}.{}", FILTER_KEY, key);

        let code = match params.get_filter(key) {
            None => return Err(QueryError::MissingFilter(key.to_string())),
            Some(FilterParam::Nested(_)) => {
                return Err(QueryError::invalid_value(param_key, "a nested object", "a currency code"));
            }
            Some(FilterParam::Value(code)) => code,
        };

        let currency = parse_currency(code).map_err(|e| e.with_key(&param_key))?;
        if !self.settings.available_currencies.contains(&currency) {
            return Err(QueryError::invalid_value(
                param_key,
                code.as_str(),
                format!("one of {}", self.currency_codes().join(", ")),
            ));
        }
        Ok(currency)
    }

    fn currency_codes(&self) -> Vec<String> {
        self.settings
            .available_currencies
            .iter()
            .map(|c| c.code().to_string())
            .collect()
    }

    fn view(&self, record: &Record, currency: Currency) -> Result<ProductView, QueryError> {
        let product = self
            .products
            .iter()
            .find(|p| p.slug == record.id.as_str())
            .ok_or_else(|| QueryError::configuration(format!("no product for record '{}'", record.id)))?;
        let price = product.price_in(currency).ok_or_else(|| {
            QueryError::configuration(format!(
                "product '{}' has no {} price",
                product.slug,
                currency.code()
            ))
        })?;

        let attributes = product
            .attributes
            .iter()
            .filter_map(|value| {
                self.attribute(&value.attribute).map(|attribute| ProductAttributeView {
                    attribute: attribute.descriptor(),
                    value: value.value.clone(),
                })
            })
            .collect();

        Ok(ProductView {
            slug: product.slug.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            categories: product.categories.clone(),
            price: Money::new(price.price, currency),
            price_discounted: price.price_discounted.map(|d| Money::new(d, currency)),
            attributes,
        })
    }
}

impl BoundsSource for Catalog {
    /// Cheapest and dearest effective price in `currency` among visible products.
    fn bounds(&self, currency: Currency) -> (Option<Decimal>, Option<Decimal>) {
        let amounts = self
            .visible_products()
            .filter_map(|p| p.price_in(currency))
            .map(|p| p.effective().amount());

        amounts.fold((None, None), |(min, max), amount| {
            (
                Some(min.map_or(amount, |m: Decimal| m.min(amount))),
                Some(max.map_or(amount, |m: Decimal| m.max(amount))),
            )
        })
    }
}

impl AttributeCatalog for Catalog {
    fn attributes(&self) -> Vec<AttributeDescriptor> {
        self.attributes.iter().map(ProductAttribute::descriptor).collect()
    }

    /// Values visible products use for an attribute, in first-seen order.
    fn available_values(&self, slug: &str) -> Vec<TypedValue> {
        let mut values: Vec<TypedValue> = Vec::new();
        for value in self
            .visible_products()
            .flat_map(|p| &p.attributes)
            .filter(|v| v.attribute == slug)
        {
            if !values.contains(&value.value) {
                values.push(value.value.clone());
            }
        }
        values
    }
}

/// Supplies the allowed value of each product filter
struct ProductFilterBuilder<'a> {
    catalog: &'a Catalog,
    currency: Currency,
}

impl FilterBuilder<ProductAllowedFilter> for ProductFilterBuilder<'_> {
    fn build(&self, filter: ProductAllowedFilter) -> Result<FilterValue, QueryError> {
        let value = match filter {
            ProductAllowedFilter::Title | ProductAllowedFilter::Description => {
                FilterValue::Exact(ExactFilter::new())
            }
            ProductAllowedFilter::Currency => {
                FilterValue::Exact(ExactFilter::with_options(self.catalog.currency_codes()))
            }
            ProductAllowedFilter::PriceBetween => {
                let (min, max) = self.catalog.bounds(self.currency);
                FilterValue::Range(RangeFilter::new(min, max, Some(self.currency)))
            }
            ProductAllowedFilter::Attribute => FilterValue::Multiselect(MultiselectFilter::new(
                self.catalog
                    .attributes()
                    .into_iter()
                    .map(|attribute| {
                        let values = self.catalog.available_values(&attribute.slug);
                        NestedValues::new(attribute, values)
                    })
                    .collect(),
            )),
            ProductAllowedFilter::Category => {
                FilterValue::Hierarchical(HierarchicalFilter::new(Arc::clone(&self.catalog.categories)))
            }
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::str::FromStr;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new(
            CatalogSettings {
                available_currencies: vec![Currency::USD, Currency::EUR],
            },
            vec![
                Category::new("furniture", "Furniture", None),
                Category::new("chairs", "Chairs", Some("furniture")),
            ],
            vec![
                ProductAttribute::new("width", "Width", ValueType::Integer),
                ProductAttribute::new("weight", "Weight", ValueType::Float),
            ],
        )
        .unwrap()
    }

    fn product(slug: &str, usd: &str) -> Product {
        Product {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            description: String::new(),
            categories: vec!["chairs".to_string()],
            prices: vec![ProductPrice {
                currency: Currency::USD,
                price: d(usd),
                price_discounted: None,
            }],
            attributes: vec![ProductAttributeValue {
                attribute: "weight".to_string(),
                value: TypedValue::Integer(3),
            }],
        }
    }

    #[test]
    fn test_normalize_rounds_prices_and_widens_floats() {
        let normalized = catalog().normalize_product(&product("a", "10.499")).unwrap();
        assert_eq!(normalized.prices[0].price, d("10.50"));
        assert_eq!(normalized.attributes[0].value, TypedValue::Float(3.0));
    }

    #[test]
    fn test_normalize_rejects_unknown_category_and_attribute() {
        let mut unknown_category = product("a", "1");
        unknown_category.categories = vec!["kitchen".to_string()];
        assert_matches!(
            catalog().normalize_product(&unknown_category),
            Err(QueryError::InvalidValue { key, .. }) if key == "products.a.categories"
        );

        let mut wrong_type = product("b", "1");
        wrong_type.attributes = vec![ProductAttributeValue {
            attribute: "width".to_string(),
            value: TypedValue::String("wide".to_string()),
        }];
        assert_matches!(
            catalog().normalize_product(&wrong_type),
            Err(QueryError::InvalidValue { key, .. }) if key == "products.b.width"
        );
    }

    #[test]
    fn test_import_keeps_earlier_chunks_on_failure() {
        let mut catalog = catalog();
        let mut broken = product("c", "3");
        broken.categories = vec!["kitchen".to_string()];
        let products = vec![product("a", "1"), product("b", "2"), broken, product("d", "4")];

        let error = catalog
            .import_products(products, ChunkOptions::new(2, 2).unwrap())
            .unwrap_err();
        assert_eq!(error.chunk, 1);
        assert_eq!(error.written, vec!["a", "b"]);
        assert_eq!(catalog.products().len(), 2);
    }

    #[test]
    fn test_import_rejects_duplicate_slugs() {
        let mut catalog = catalog();
        let error = catalog
            .import_products(
                vec![product("a", "1"), product("a", "2")],
                ChunkOptions::new(10, 5).unwrap(),
            )
            .unwrap_err();
        assert!(error.written.is_empty());
        assert!(catalog.products().is_empty());
    }

    #[test]
    fn test_bounds_use_effective_price() {
        let mut catalog = catalog();
        let mut discounted = product("b", "80");
        discounted.prices[0].price_discounted = Some(d("5"));
        catalog
            .import_products(
                vec![product("a", "40"), discounted, product("c", "120")],
                ChunkOptions::new(10, 5).unwrap(),
            )
            .unwrap();

        assert_eq!(catalog.bounds(Currency::USD), (Some(d("5")), Some(d("120"))));
        assert_eq!(catalog.bounds(Currency::EUR), (None, None));
        assert_eq!(catalog.available_values("weight"), vec![TypedValue::Float(3.0)]);
    }

    #[test]
    fn test_hidden_categories_hide_their_products() {
        let mut catalog = Catalog::new(
            CatalogSettings {
                available_currencies: vec![Currency::USD],
            },
            vec![
                Category::new("furniture", "Furniture", None).hidden(),
                Category::new("chairs", "Chairs", Some("furniture")),
                Category::new("lighting", "Lighting", None),
            ],
            vec![ProductAttribute::new("weight", "Weight", ValueType::Float)],
        )
        .unwrap();

        let mut lamp = product("lamp", "30");
        lamp.categories = vec!["lighting".to_string()];
        let mut both = product("both", "90");
        both.categories = vec!["chairs".to_string(), "lighting".to_string()];
        catalog
            .import_products(
                vec![product("chair", "500"), lamp, both],
                ChunkOptions::new(10, 5).unwrap(),
            )
            .unwrap();

        assert!(!catalog.is_visible(&catalog.products()[0]));
        assert!(catalog.is_visible(&catalog.products()[2]));
        assert_eq!(catalog.bounds(Currency::USD), (Some(d("30")), Some(d("90"))));
    }

    #[test]
    fn test_titles() {
        assert_eq!(ProductAllowedFilter::Title.title(), "Title");
        assert_eq!(ProductAllowedFilter::PriceBetween.title(), "Price");
        assert_eq!(ProductAllowedSort::PriceDesc.title(), "Expensive First");
    }
}

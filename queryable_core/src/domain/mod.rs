//! Domains that expose listings through the filter/sort engine

pub mod catalog;
pub mod news;

use iso_currency::Currency;
use rust_decimal::Decimal;

use crate::filter::AttributeDescriptor;
use crate::value::TypedValue;

/// Minimum and maximum of a field across the domain's records
pub trait BoundsSource {
    fn bounds(&self, currency: Currency) -> (Option<Decimal>, Option<Decimal>);
}

/// The attributes a domain's records carry and the values in use
pub trait AttributeCatalog {
    fn attributes(&self) -> Vec<AttributeDescriptor>;

    fn available_values(&self, slug: &str) -> Vec<TypedValue>;
}

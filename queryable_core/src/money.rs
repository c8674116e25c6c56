//! Currency-aware amounts

use std::fmt;

use iso_currency::Currency;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::QueryError;

/// An amount in major units of a currency, rounded to its minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(minor_exponent(currency)),
            currency,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The amount expressed in minor units (e.g. cents), if it fits.
    pub fn minor_units(&self) -> Option<i64> {
        let scale = Decimal::from(10i64.pow(minor_exponent(self.currency)));
        self.amount
            .checked_mul(scale)
            .and_then(|value| value.trunc().to_i64())
    }

    /// Whether both amounts are in the same currency and can be compared.
    pub fn is_comparable(&self, other: &Money) -> bool {
        self.currency == other.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency.code())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Money", 3)?;
        state.serialize_field("value", &self.amount.to_f64())?;
        state.serialize_field("amount", &self.minor_units())?;
        state.serialize_field("currency", self.currency.code())?;
        state.end()
    }
}

/// Parse an ISO 4217 currency code, ignoring case.
pub fn parse_currency(code: &str) -> Result<Currency, QueryError> {
    Currency::from_code(&code.trim().to_uppercase())
        .ok_or_else(|| QueryError::invalid_value("", code, "an ISO 4217 currency code"))
}

fn minor_exponent(currency: Currency) -> u32 {
    currency.exponent().map(u32::from).unwrap_or(0)
}

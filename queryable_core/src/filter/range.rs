//! Bounded numeric and money ranges

use std::str::FromStr;

use iso_currency::Currency;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::QueryError;
use crate::money::Money;
use crate::query::{Condition, FieldRef, FilterOperator, Operand};

const RANGE_SEPARATOR: char = ',';

/// A `[min, max]` range, optionally denominated in a currency.
///
/// The allowed value carries the domain bounds. Selecting values returns a
/// new range clamped into those bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter {
    min_value: Option<Decimal>,
    max_value: Option<Decimal>,
    currency: Option<Currency>,
}

impl RangeFilter {
    pub fn new(
        min_value: Option<Decimal>,
        max_value: Option<Decimal>,
        currency: Option<Currency>,
    ) -> Self {
        let convert = |value: Decimal| in_currency(value, currency);
        let (min_value, max_value) = ordered(min_value.map(convert), max_value.map(convert));
        Self {
            min_value,
            max_value,
            currency,
        }
    }

    pub fn min_value(&self) -> Option<Decimal> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<Decimal> {
        self.max_value
    }

    pub fn currency(&self) -> Option<Currency> {
        self.currency
    }

    /// Return the range the user selected, clamped into this range's bounds.
    ///
    /// Reversed input is swapped first. An absent selected bound takes the
    /// domain bound. Unless both domain bounds are known the selection stays
    /// unbounded.
    pub fn set_selected_values(
        &self,
        selected_min: Option<Decimal>,
        selected_max: Option<Decimal>,
    ) -> Self {
        let (selected_min, selected_max) = ordered(selected_min, selected_max);
        let convert = |value: Decimal| in_currency(value, self.currency);
        let (selected_min, selected_max) = (selected_min.map(convert), selected_max.map(convert));

        if self.min_value.is_none() || self.max_value.is_none() {
            return Self {
                min_value: None,
                max_value: None,
                currency: self.currency,
            };
        }

        let clamp = |value: Decimal| {
            let value = self.min_value.map_or(value, |min| value.max(min));
            self.max_value.map_or(value, |max| value.min(max))
        };

        Self {
            min_value: selected_min.map(clamp).or(self.min_value),
            max_value: selected_max.map(clamp).or(self.max_value),
            currency: self.currency,
        }
    }

    /// Parse a raw `min,max` parameter. Either side may be left empty.
    pub fn parse_selected(raw: &str) -> Result<(Option<Decimal>, Option<Decimal>), QueryError> {
        let items: Vec<&str> = raw.split(RANGE_SEPARATOR).map(str::trim).collect();
        let [min, max] = items.as_slice() else {
            return Err(QueryError::invalid_value("", raw, "must contain 2 items"));
        };
        Ok((parse_bound(min)?, parse_bound(max)?))
    }

    /// Both bounds of the range as comparisons against `field`.
    pub fn condition(&self, field: FieldRef) -> Condition {
        let mut bounds = Vec::new();
        if let Some(min) = self.min_value {
            bounds.push(Condition::compare(
                field.clone(),
                FilterOperator::GreaterOrEqual,
                self.operand(min),
            ));
        }
        if let Some(max) = self.max_value {
            bounds.push(Condition::compare(
                field,
                FilterOperator::LessOrEqual,
                self.operand(max),
            ));
        }
        Condition::All(bounds)
    }

    fn operand(&self, value: Decimal) -> Operand {
        match self.currency {
            Some(currency) => Money::new(value, currency).into(),
            None => Operand::Float(value.to_f64().unwrap_or(f64::NAN)),
        }
    }
}

fn in_currency(value: Decimal, currency: Option<Currency>) -> Decimal {
    match currency {
        Some(currency) => Money::new(value, currency).amount(),
        None => value,
    }
}

fn ordered(min: Option<Decimal>, max: Option<Decimal>) -> (Option<Decimal>, Option<Decimal>) {
    match (min, max) {
        (Some(min), Some(max)) if min > max => (Some(max), Some(min)),
        other => other,
    }
}

fn parse_bound(raw: &str) -> Result<Option<Decimal>, QueryError> {
    if raw.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(raw)
        .map(Some)
        .map_err(|_| QueryError::invalid_value("", raw, "a decimal number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn d(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn domain() -> RangeFilter {
        RangeFilter::new(Some(d("10")), Some(d("500")), Some(Currency::USD))
    }

    fn bounds(range: &RangeFilter) -> (Option<Decimal>, Option<Decimal>) {
        (range.min_value(), range.max_value())
    }

    #[test]
    fn test_out_of_range_values_clamp_to_bounds() {
        let selected = domain().set_selected_values(Some(d("-5")), Some(d("1000")));
        assert_eq!(bounds(&selected), (Some(d("10")), Some(d("500"))));
    }

    #[test]
    fn test_reversed_values_are_swapped() {
        let selected = domain().set_selected_values(Some(d("300")), Some(d("50")));
        assert_eq!(bounds(&selected), (Some(d("50")), Some(d("300"))));
        assert_eq!(
            selected,
            domain().set_selected_values(Some(d("50")), Some(d("300")))
        );
    }

    #[test]
    fn test_absent_values_take_domain_bounds() {
        let selected = domain().set_selected_values(None, None);
        assert_eq!(bounds(&selected), (Some(d("10")), Some(d("500"))));

        let selected = domain().set_selected_values(Some(d("600")), None);
        assert_eq!(bounds(&selected), (Some(d("500")), Some(d("500"))));
    }

    #[test]
    fn test_clamping_is_idempotent() {
        let once = domain().set_selected_values(Some(d("1")), Some(d("900")));
        let twice = domain().set_selected_values(once.min_value(), once.max_value());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unbounded_domain_stays_unbounded() {
        let domain = RangeFilter::new(None, None, Some(Currency::EUR));
        let selected = domain.set_selected_values(Some(d("5")), Some(d("10")));
        assert_eq!(bounds(&selected), (None, None));
        assert_eq!(selected.currency(), Some(Currency::EUR));
        assert_eq!(selected.condition(FieldRef::field("price.EUR")), Condition::All(vec![]));
    }

    #[test]
    fn test_one_sided_domain_stays_unbounded() {
        let upper_only = RangeFilter::new(None, Some(d("100")), None);
        let selected = upper_only.set_selected_values(Some(d("-50")), Some(d("150")));
        assert_eq!(bounds(&selected), (None, None));

        let lower_only = RangeFilter::new(Some(d("10")), None, None);
        let selected = lower_only.set_selected_values(Some(d("20")), None);
        assert_eq!(bounds(&selected), (None, None));
    }

    #[test]
    fn test_selected_values_round_to_currency() {
        let selected = domain().set_selected_values(Some(d("20.554")), None);
        assert_eq!(selected.min_value(), Some(d("20.55")));
    }

    #[test]
    fn test_construction_normalises_reversed_bounds() {
        let range = RangeFilter::new(Some(d("9")), Some(d("3")), None);
        assert_eq!(bounds(&range), (Some(d("3")), Some(d("9"))));
    }

    #[test]
    fn test_parse_selected() {
        assert_eq!(
            RangeFilter::parse_selected("10, 500").unwrap(),
            (Some(d("10")), Some(d("500")))
        );
        assert_eq!(RangeFilter::parse_selected(",42.5").unwrap(), (None, Some(d("42.5"))));
        assert_matches!(
            RangeFilter::parse_selected("10"),
            Err(QueryError::InvalidValue { expected, .. }) if expected == "must contain 2 items"
        );
        assert_matches!(RangeFilter::parse_selected("1,2,3"), Err(QueryError::InvalidValue { .. }));
        assert_matches!(RangeFilter::parse_selected("ten,20"), Err(QueryError::InvalidValue { .. }));
    }

    #[test]
    fn test_condition_compares_money() {
        let condition = domain()
            .set_selected_values(Some(d("50")), Some(d("300")))
            .condition(FieldRef::field("price.USD"));
        assert_eq!(
            condition,
            Condition::All(vec![
                Condition::compare(
                    FieldRef::field("price.USD"),
                    FilterOperator::GreaterOrEqual,
                    Money::new(d("50"), Currency::USD)
                ),
                Condition::compare(
                    FieldRef::field("price.USD"),
                    FilterOperator::LessOrEqual,
                    Money::new(d("300"), Currency::USD)
                ),
            ])
        );
    }
}

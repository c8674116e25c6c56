mod helpers;

use assert_matches::assert_matches;
use serde_json::{Value, json};

use helpers::{catalog, catalog_with, categories, config};
use queryable_core::domain::catalog::ProductView;
use queryable_core::{ErrorResponse, QueryError, QueryParams, ResponseEnvelope};

#[cfg(test)]
mod tests {
    use super::*;

    fn list(query: &str) -> Result<ResponseEnvelope<ProductView>, QueryError> {
        let params = QueryParams::parse(query)?;
        catalog().index(&params, &config())
    }

    fn slugs(envelope: &ResponseEnvelope<ProductView>) -> Vec<&str> {
        envelope.data.iter().map(|p| p.slug.as_str()).collect()
    }

    fn filter_entry(json: &Value, section: &str, key: &str) -> Value {
        json["query"]["filter"][section]
            .as_array()
            .unwrap()
            .iter()
            .find(|entry| entry["query"] == key)
            .cloned()
            .unwrap_or(Value::Null)
    }

    #[test]
    fn test_default_listing_sorts_by_title() {
        let envelope = list("filter[CURRENCY]=USD").unwrap();

        assert_eq!(
            slugs(&envelope),
            vec!["desk-lamp", "dining-table", "oak-chair", "side-table", "steel-chair"]
        );
        assert_eq!(envelope.meta.total, 5);
        assert_eq!(envelope.query.sort.applied[0].query, "TITLE");
    }

    #[test]
    fn test_currency_restricts_to_priced_products() {
        let envelope = list("filter[CURRENCY]=eur").unwrap();

        assert_eq!(slugs(&envelope), vec!["oak-chair", "side-table"]);
        assert_eq!(envelope.data[0].price.currency().code(), "EUR");
    }

    #[test]
    fn test_missing_currency_is_rejected() {
        let error = list("sort=PRICE").unwrap_err();

        assert_eq!(error, QueryError::MissingFilter("CURRENCY".to_string()));
        assert_eq!(ErrorResponse::from(&error).status, 422);
    }

    #[test]
    fn test_unavailable_currency_is_rejected() {
        assert_matches!(
            list("filter[CURRENCY]=GBP"),
            Err(QueryError::InvalidValue { key, .. }) if key == "filter.CURRENCY"
        );
        assert_matches!(
            list("filter[CURRENCY]=XYZ"),
            Err(QueryError::InvalidValue { key, .. }) if key == "filter.CURRENCY"
        );
    }

    #[test]
    fn test_price_range_is_clamped_to_bounds() {
        let envelope = list("filter[CURRENCY]=USD&filter[PRICE_BETWEEN]=0,1000").unwrap();
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(envelope.meta.total, 5);
        let applied = filter_entry(&json, "applied", "PRICE_BETWEEN");
        assert_eq!(applied["min_value"], json!(10.0));
        assert_eq!(applied["max_value"], json!(500.0));
        assert_eq!(applied["currency"], json!("USD"));
    }

    #[test]
    fn test_reversed_price_range_is_swapped() {
        let envelope = list("filter[CURRENCY]=USD&filter[PRICE_BETWEEN]=100,50").unwrap();

        // Discounted from 80 to 60
        assert_eq!(slugs(&envelope), vec!["steel-chair"]);
    }

    #[test]
    fn test_open_price_range_takes_domain_bound() {
        let envelope = list("filter[CURRENCY]=USD&filter[PRICE_BETWEEN]=,100").unwrap();
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(slugs(&envelope), vec!["desk-lamp", "side-table", "steel-chair"]);
        assert_eq!(filter_entry(&json, "applied", "PRICE_BETWEEN")["min_value"], json!(10.0));
    }

    #[test]
    fn test_malformed_price_range() {
        assert_matches!(
            list("filter[CURRENCY]=USD&filter[PRICE_BETWEEN]=50"),
            Err(QueryError::InvalidValue { key, expected, .. })
                if key == "filter.PRICE_BETWEEN" && expected == "must contain 2 items"
        );
        assert_matches!(
            list("filter[CURRENCY]=USD&filter[PRICE_BETWEEN]=cheap,100"),
            Err(QueryError::InvalidValue { .. })
        );
    }

    #[test]
    fn test_attribute_values_are_coerced() {
        let envelope = list("filter[CURRENCY]=USD&filter[ATTRIBUTE][width]=20,30").unwrap();
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(slugs(&envelope), vec!["desk-lamp", "side-table"]);
        assert_eq!(
            filter_entry(&json, "applied", "ATTRIBUTE")["values"],
            json!([{
                "attribute": {"query": "width", "title": "Width", "type": "integer"},
                "values": [20, 30]
            }])
        );
    }

    #[test]
    fn test_attributes_combine_with_and() {
        let envelope =
            list("filter[CURRENCY]=USD&filter[ATTRIBUTE][width]=40,45&filter[ATTRIBUTE][color]=grey")
                .unwrap();

        assert_eq!(slugs(&envelope), vec!["steel-chair"]);
    }

    #[test]
    fn test_attribute_type_and_slug_errors() {
        assert_matches!(
            list("filter[CURRENCY]=USD&filter[ATTRIBUTE][width]=wide"),
            Err(QueryError::InvalidValue { key, .. }) if key == "filter.ATTRIBUTE"
        );
        assert_matches!(
            list("filter[CURRENCY]=USD&filter[ATTRIBUTE][height]=10"),
            Err(QueryError::InvalidValue { value, .. }) if value == "height"
        );
    }

    #[test]
    fn test_category_includes_descendants() {
        let envelope = list("filter[CURRENCY]=USD&filter[CATEGORY]=furniture").unwrap();

        assert_eq!(
            slugs(&envelope),
            vec!["dining-table", "oak-chair", "side-table", "steel-chair"]
        );

        let leaf = list("filter[CURRENCY]=USD&filter[CATEGORY]=tables,lighting").unwrap();
        assert_eq!(slugs(&leaf), vec!["desk-lamp", "dining-table", "side-table"]);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert_matches!(
            list("filter[CURRENCY]=USD&filter[CATEGORY]=kitchen"),
            Err(QueryError::InvalidValue { key, .. }) if key == "filter.CATEGORY"
        );
    }

    #[test]
    fn test_empty_category_selection_is_rejected() {
        assert_matches!(
            list("filter[CURRENCY]=USD&filter[CATEGORY]=,"),
            Err(QueryError::InvalidValue { key, expected, .. })
                if key == "filter.CATEGORY" && expected == "at least one category"
        );
    }

    fn list_with_hidden(
        hidden: &[&str],
        query: &str,
    ) -> Result<ResponseEnvelope<ProductView>, QueryError> {
        let categories = categories()
            .into_iter()
            .map(|c| if hidden.contains(&c.slug.as_str()) { c.hidden() } else { c })
            .collect();
        let params = QueryParams::parse(query)?;
        catalog_with(categories).index(&params, &config())
    }

    #[test]
    fn test_category_visibility_follows_ancestors() {
        // A visible child under a hidden root stays hidden
        let root_hidden = list_with_hidden(&["furniture"], "filter[CURRENCY]=USD").unwrap();
        assert_eq!(slugs(&root_hidden), vec!["desk-lamp"]);
        let json = serde_json::to_value(&root_hidden).unwrap();
        assert_eq!(
            filter_entry(&json, "allowed", "CATEGORY")["values"],
            json!([{"query": "lighting", "title": "Lighting"}])
        );
        assert_eq!(filter_entry(&json, "allowed", "PRICE_BETWEEN")["max_value"], json!(30.0));

        let child_hidden = list_with_hidden(&["chairs"], "filter[CURRENCY]=USD").unwrap();
        assert_eq!(slugs(&child_hidden), vec!["desk-lamp", "dining-table", "side-table"]);
        let json = serde_json::to_value(&child_hidden).unwrap();
        let furniture = &filter_entry(&json, "allowed", "CATEGORY")["values"][0];
        assert_eq!(furniture["children"], json!([{"query": "tables", "title": "Tables"}]));

        assert_eq!(list_with_hidden(&[], "filter[CURRENCY]=USD").unwrap().meta.total, 5);
    }

    #[test]
    fn test_hidden_category_cannot_be_selected() {
        assert_matches!(
            list_with_hidden(&["chairs"], "filter[CURRENCY]=USD&filter[CATEGORY]=chairs"),
            Err(QueryError::InvalidValue { key, value, .. })
                if key == "filter.CATEGORY" && value == "chairs"
        );
    }

    #[test]
    fn test_unknown_filter_key() {
        let error = list("filter[CURRENCY]=USD&filter[COLOR]=red").unwrap_err();

        assert_matches!(
            &error,
            QueryError::InvalidFilterQuery { unknown, allowed }
                if unknown == &vec!["COLOR".to_string()] && allowed.len() == 6
        );
        assert_eq!(ErrorResponse::from(&error).status, 400);
    }

    #[test]
    fn test_unknown_sort_key() {
        let error = list("filter[CURRENCY]=USD&sort=NEWEST").unwrap_err();

        assert_matches!(&error, QueryError::InvalidSortQuery { unknown, .. } if unknown == "NEWEST");
        assert_eq!(ErrorResponse::from(&error).status, 400);
    }

    #[test]
    fn test_price_sort_uses_effective_price() {
        let envelope = list("filter[CURRENCY]=USD&sort=PRICE_DESC").unwrap();

        assert_eq!(
            slugs(&envelope),
            vec!["dining-table", "oak-chair", "steel-chair", "desk-lamp", "side-table"]
        );
    }

    #[test]
    fn test_search_uses_relevance_order() {
        let envelope = list("filter[CURRENCY]=USD&filter[TITLE]=chair").unwrap();

        assert_eq!(slugs(&envelope), vec!["oak-chair", "steel-chair"]);
        assert_eq!(envelope.query.sort.applied[0].query, "DEFAULT");
    }

    #[test]
    fn test_explicit_sort_wins_over_search_default() {
        let envelope = list("filter[CURRENCY]=USD&filter[TITLE]=CHAIR&sort=TITLE_DESC").unwrap();

        assert_eq!(slugs(&envelope), vec!["steel-chair", "oak-chair"]);
        assert_eq!(envelope.query.sort.applied[0].query, "TITLE_DESC");
    }

    #[test]
    fn test_description_filter() {
        let envelope = list("filter[CURRENCY]=USD&filter[DESCRIPTION]=lamp").unwrap();

        assert_eq!(slugs(&envelope), vec!["desk-lamp"]);
        assert_eq!(envelope.query.sort.applied[0].query, "TITLE");
    }

    #[test]
    fn test_pagination() {
        let envelope = list("filter[CURRENCY]=USD&page=2&per_page=2").unwrap();

        assert_eq!(slugs(&envelope), vec!["oak-chair", "side-table"]);
        assert_eq!(envelope.meta.current_page, 2);
        assert_eq!(envelope.meta.last_page, 3);
        assert_eq!(envelope.meta.from, Some(3));
        assert_eq!(envelope.meta.to, Some(4));
        assert_eq!(envelope.links.prev.as_deref(), Some("/products?page=1"));
        assert_eq!(envelope.links.next.as_deref(), Some("/products?page=3"));
    }

    #[test]
    fn test_page_past_the_end_is_empty() {
        let envelope = list("filter[CURRENCY]=USD&page=9").unwrap();

        assert!(envelope.data.is_empty());
        assert_eq!(envelope.meta.total, 5);
        assert_eq!(envelope.meta.from, None);
    }

    #[test]
    fn test_allowed_section_describes_every_filter() {
        let json = serde_json::to_value(list("filter[CURRENCY]=USD").unwrap()).unwrap();

        let allowed: Vec<&str> = json["query"]["filter"]["allowed"]
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["query"].as_str().unwrap())
            .collect();
        assert_eq!(
            allowed,
            vec!["TITLE", "DESCRIPTION", "CATEGORY", "CURRENCY", "PRICE_BETWEEN", "ATTRIBUTE"]
        );

        assert_eq!(
            filter_entry(&json, "allowed", "CURRENCY"),
            json!({"query": "CURRENCY", "title": "Currency", "type": "input", "options": ["USD", "EUR"]})
        );

        let price = filter_entry(&json, "allowed", "PRICE_BETWEEN");
        assert_eq!(price["type"], json!("range"));
        assert_eq!(price["min_value"], json!(10.0));
        assert_eq!(price["max_value"], json!(500.0));

        let widths = &filter_entry(&json, "allowed", "ATTRIBUTE")["values"][0]["values"];
        assert_eq!(widths, &json!([40, 45, 160, 20, 30]));

        let categories = filter_entry(&json, "allowed", "CATEGORY");
        assert_eq!(categories["values"][0]["query"], json!("furniture"));
        assert_eq!(categories["values"][0]["children"].as_array().unwrap().len(), 2);
        assert_eq!(categories["values"][1]["query"], json!("lighting"));
    }

    #[test]
    fn test_applied_section_lists_only_request_filters() {
        let json = serde_json::to_value(list("filter[CURRENCY]=USD&filter[TITLE]=oak").unwrap()).unwrap();

        assert_eq!(
            json["query"]["filter"]["applied"],
            json!([
                {"query": "TITLE", "title": "Title", "type": "input", "value": "oak"},
                {"query": "CURRENCY", "title": "Currency", "type": "input", "value": "USD"}
            ])
        );
        assert_eq!(json["query"]["sort"]["allowed"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_product_view_serialization() {
        let json = serde_json::to_value(list("filter[CURRENCY]=USD&filter[TITLE]=steel").unwrap()).unwrap();
        let product = &json["data"][0];

        assert_eq!(product["slug"], json!("steel-chair"));
        assert_eq!(product["price"], json!({"value": 80.0, "amount": 8000, "currency": "USD"}));
        assert_eq!(
            product["price_discounted"],
            json!({"value": 60.0, "amount": 6000, "currency": "USD"})
        );
        assert_eq!(product["attributes"][0]["attribute"]["query"], json!("width"));
        assert_eq!(product["attributes"][0]["value"], json!(45));
        assert_eq!(json["meta"]["path"], json!("/products"));
    }
}

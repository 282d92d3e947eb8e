//! Catalog query parameters.
//!
//! [`ProductParams`] is the filter/sort/page specification shared by the
//! server (deserialized from the query string) and the client (encoded back
//! into one). Brand and type filters travel as comma-separated lists, and
//! empty filters are omitted entirely so they never over-constrain the query.

use serde::{Deserialize, Deserializer, Serialize};

/// Default page size for catalog listings.
pub const DEFAULT_PAGE_SIZE: u32 = 6;

/// Upper bound on requested page size.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Sort key for catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderBy {
    /// Alphabetical by product name.
    #[default]
    #[serde(rename = "name")]
    Name,
    /// Price, lowest first.
    #[serde(rename = "price")]
    Price,
    /// Price, highest first.
    #[serde(rename = "priceDesc")]
    PriceDesc,
}

impl OrderBy {
    /// Wire representation of the sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::PriceDesc => "priceDesc",
        }
    }
}

/// Filter/sort/page specification for catalog queries.
///
/// Deserializes from the camelCase query string the client sends
/// (`pageNumber`, `pageSize`, `orderBy`, `searchTerm`, `brands`, `types`);
/// [`ProductParams::to_query`] produces the same encoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductParams {
    /// 1-based page number.
    pub page_number: u32,
    /// Items per page.
    pub page_size: u32,
    /// Sort key.
    pub order_by: OrderBy,
    /// Case-insensitive substring match on product name.
    pub search_term: Option<String>,
    /// Brand filter set; empty means no brand constraint.
    #[serde(deserialize_with = "comma_list")]
    pub brands: Vec<String>,
    /// Type filter set; empty means no type constraint.
    #[serde(deserialize_with = "comma_list")]
    pub types: Vec<String>,
}

impl Default for ProductParams {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            order_by: OrderBy::default(),
            search_term: None,
            brands: Vec::new(),
            types: Vec::new(),
        }
    }
}

impl ProductParams {
    /// Encode into query-string pairs.
    ///
    /// Page number, page size, and sort key are always present; the search
    /// term and filter sets only when non-empty.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("pageNumber", self.page_number.to_string()),
            ("pageSize", self.page_size.to_string()),
            ("orderBy", self.order_by.as_str().to_owned()),
        ];
        if let Some(term) = self.search_term.as_deref()
            && !term.is_empty()
        {
            pairs.push(("searchTerm", term.to_owned()));
        }
        if !self.brands.is_empty() {
            pairs.push(("brands", self.brands.join(",")));
        }
        if !self.types.is_empty() {
            pairs.push(("types", self.types.join(",")));
        }
        pairs
    }

    /// Page number clamped to at least 1.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        if self.page_number == 0 { 1 } else { self.page_number }
    }

    /// Page size clamped to `1..=MAX_PAGE_SIZE`.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else if self.page_size > MAX_PAGE_SIZE {
            MAX_PAGE_SIZE
        } else {
            self.page_size
        }
    }
}

/// Deserialize a comma-separated list (`"a,b,c"`) into a `Vec<String>`.
///
/// Absent or empty values produce an empty vec.
fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_map(params: &ProductParams) -> std::collections::HashMap<&'static str, String> {
        params.to_query().into_iter().collect()
    }

    #[test]
    fn test_defaults() {
        let params = ProductParams::default();
        assert_eq!(params.page_number, 1);
        assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(params.order_by, OrderBy::Name);
        assert!(params.brands.is_empty());
    }

    #[test]
    fn test_to_query_omits_empty_filters() {
        let params = ProductParams::default();
        let map = query_map(&params);
        assert_eq!(map.get("pageNumber").map(String::as_str), Some("1"));
        assert_eq!(map.get("pageSize").map(String::as_str), Some("6"));
        assert_eq!(map.get("orderBy").map(String::as_str), Some("name"));
        assert!(!map.contains_key("searchTerm"));
        assert!(!map.contains_key("brands"));
        assert!(!map.contains_key("types"));
    }

    #[test]
    fn test_to_query_includes_filters_when_present() {
        let params = ProductParams {
            search_term: Some("board".to_owned()),
            brands: vec!["Angular".to_owned(), "React".to_owned()],
            types: vec!["Boards".to_owned()],
            order_by: OrderBy::PriceDesc,
            ..ProductParams::default()
        };
        let map = query_map(&params);
        assert_eq!(map.get("searchTerm").map(String::as_str), Some("board"));
        assert_eq!(
            map.get("brands").map(String::as_str),
            Some("Angular,React")
        );
        assert_eq!(map.get("types").map(String::as_str), Some("Boards"));
        assert_eq!(map.get("orderBy").map(String::as_str), Some("priceDesc"));
    }

    #[test]
    fn test_empty_search_term_omitted() {
        let params = ProductParams {
            search_term: Some(String::new()),
            ..ProductParams::default()
        };
        assert!(!query_map(&params).contains_key("searchTerm"));
    }

    #[test]
    fn test_deserialize_from_query_string() {
        let params: ProductParams = serde_urlencoded_fixture(
            "pageNumber=2&pageSize=6&orderBy=price&brands=Angular,React&types=Boots",
        );
        assert_eq!(params.page_number, 2);
        assert_eq!(params.order_by, OrderBy::Price);
        assert_eq!(params.brands, vec!["Angular", "React"]);
        assert_eq!(params.types, vec!["Boots"]);
        assert_eq!(params.search_term, None);
    }

    #[test]
    fn test_deserialize_missing_fields_use_defaults() {
        let params: ProductParams = serde_urlencoded_fixture("pageNumber=3");
        assert_eq!(params.page_number, 3);
        assert_eq!(params.page_size, DEFAULT_PAGE_SIZE);
        assert!(params.brands.is_empty());
    }

    #[test]
    fn test_page_size_clamped() {
        let params = ProductParams {
            page_size: 500,
            ..ProductParams::default()
        };
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);
        let params = ProductParams {
            page_size: 0,
            ..ProductParams::default()
        };
        assert_eq!(params.page_size(), DEFAULT_PAGE_SIZE);
    }

    /// Deserialize query-string fixtures through serde_json's representation
    /// of simple key/value pairs, matching how axum's `Query` extractor
    /// presents them.
    fn serde_urlencoded_fixture(query: &str) -> ProductParams {
        let map: serde_json::Map<String, serde_json::Value> = query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| {
                let value = v
                    .parse::<u64>()
                    .map_or_else(|_| serde_json::Value::String(v.to_owned()), Into::into);
                (k.to_owned(), value)
            })
            .collect();
        serde_json::from_value(serde_json::Value::Object(map)).expect("deserialize params")
    }
}

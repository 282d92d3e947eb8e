//! Pagination metadata carried out-of-band with catalog list responses.
//!
//! The server serializes this into the `Pagination` response header; the
//! client decodes it from there. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Name of the response header carrying serialized [`MetaData`].
///
/// Lowercase so it can back a static `HeaderName`; header lookups are
/// case-insensitive on both ends.
pub const PAGINATION_HEADER: &str = "pagination";

/// Pagination metadata for a catalog page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaData {
    /// The 1-based page number this response covers.
    pub current_page: u32,
    /// Total number of pages for the query.
    pub total_pages: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Total number of items matching the query across all pages.
    pub total_count: u64,
}

impl MetaData {
    /// Compute metadata for a page, deriving `total_pages` from the count.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // page counts fit comfortably in u32
    pub fn new(current_page: u32, page_size: u32, total_count: u64) -> Self {
        let size = if page_size == 0 { 1 } else { page_size };
        let total_pages = total_count.div_ceil(u64::from(size)) as u32;
        Self {
            current_page,
            total_pages,
            page_size: size,
            total_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let meta = MetaData::new(1, 6, 13);
        assert_eq!(meta.total_pages, 3);
    }

    #[test]
    fn test_exact_multiple() {
        let meta = MetaData::new(2, 6, 12);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.current_page, 2);
    }

    #[test]
    fn test_empty_result_set() {
        let meta = MetaData::new(1, 6, 0);
        assert_eq!(meta.total_pages, 0);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let meta = MetaData::new(2, 6, 18);
        let json = serde_json::to_string(&meta).expect("serialize");
        assert!(json.contains("\"currentPage\":2"));
        assert!(json.contains("\"totalPages\":3"));
        assert!(json.contains("\"pageSize\":6"));
        assert!(json.contains("\"totalCount\":18"));
    }
}

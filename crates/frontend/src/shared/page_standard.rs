//! Page categories for `PageFrame` (`data-page-category`).
//!
//! Page id format: `{entity}--{category}`, e.g. `a001_sale--list`.

pub const PAGE_CAT_LIST: &str = "list";

pub const PAGE_CAT_DETAIL: &str = "detail";

pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty()
}

#[cfg(test)]
mod tests {
    use super::is_valid_page_id;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a001_sale--list"));
        assert!(!is_valid_page_id("a001_sale"));
        assert!(!is_valid_page_id("--list"));
    }
}

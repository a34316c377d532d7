//! Page category constants.
//!
//! Every routed page declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"d401_analytics_builder--dashboard"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator keeps the entity searchable: copy the id from the DOM
//! inspector and it leads straight to `dashboards/d401_analytics_builder/`.

/// Analytical dashboard / chart view.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Free-form page exempt from the header/content structure.
pub const PAGE_CAT_CUSTOM: &str = "custom";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_DASHBOARD, PAGE_CAT_CUSTOM];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    let parts: Vec<&str> = id.splitn(2, "--").collect();
    parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty()
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("d400_sales_overview--dashboard"));
        assert!(!is_valid_page_id("d400_sales_overview"));
        assert!(!is_valid_page_id("--dashboard"));
    }

    #[test]
    fn test_categories() {
        assert!(is_known_category(PAGE_CAT_DASHBOARD));
        assert!(!is_known_category("list"));
    }
}

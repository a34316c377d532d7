//! API utilities for frontend-backend communication
//!
//! Resolves the analytics backend base URL and builds request URLs from it.

/// Port of the analytics backend when the URL is derived from the page location.
pub const BACKEND_PORT: u16 = 8000;

/// Get the base URL for API requests
///
/// `ANALYTICS_API_URL` set at build time wins; otherwise the URL is derived from the
/// current window location with port 8000.
///
/// # Returns
/// - API base URL like "http://localhost:8000", without a trailing slash
/// - Empty string if window is not available
pub fn api_base() -> String {
    if let Some(configured) = option_env!("ANALYTICS_API_URL") {
        return normalize_base(configured);
    }
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_from_location(&protocol, &hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```ignore
/// let url = api_url("/api/stores");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&api_base(), path)
}

fn base_from_location(protocol: &str, hostname: &str) -> String {
    format!("{}//{}:{}", protocol, hostname, BACKEND_PORT)
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}

fn join_url(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_from_location() {
        assert_eq!(
            base_from_location("https:", "dash.example.com"),
            "https://dash.example.com:8000"
        );
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(
            normalize_base(" http://api.local:9000/ "),
            "http://api.local:9000"
        );
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:8000", "/api/stores"),
            "http://localhost:8000/api/stores"
        );
        assert_eq!(
            join_url("http://localhost:8000", "api/health"),
            "http://localhost:8000/api/health"
        );
    }
}

//! URL helpers

/// Percent-encode a value for use inside a query string
pub fn encode_query(value: &str) -> String {
    percent_encoding::utf8_percent_encode(value, percent_encoding::NON_ALPHANUMERIC).to_string()
}

/// Join the site URL and a site-relative path
pub fn full_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_query() {
        assert_eq!(encode_query("a b&c"), "a%20b%26c");
        assert_eq!(encode_query("memo"), "memo");
    }

    #[test]
    fn test_full_url() {
        assert_eq!(
            full_url("https://example.com/", "/blog/a-b"),
            "https://example.com/blog/a-b"
        );
        assert_eq!(full_url("https://example.com", ""), "https://example.com/");
    }
}

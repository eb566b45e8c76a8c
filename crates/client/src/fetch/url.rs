//! URL validation and domain derivation.
//!
//! These are pure functions: validation gates requests before any scraping
//! begins, and the derived domain is used only as a cache key and display
//! label, never for scraping decisions.

/// True iff `raw` parses as an absolute URL with an `http` or `https` scheme
/// and a non-empty host. No network access.
pub fn validate_url(raw: &str) -> bool {
    match url::Url::parse(raw) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

/// Derive a normalized domain label from a URL: the host component,
/// lower-cased, with a leading `www.` stripped.
///
/// Unparseable input yields an empty string rather than an error; the label
/// is cosmetic and a bad one only costs a cache miss.
pub fn domain_name(raw: &str) -> String {
    let Ok(parsed) = url::Url::parse(raw) else {
        return String::new();
    };

    let host = parsed.host_str().unwrap_or_default().to_lowercase();
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("https://example.com"));
        assert!(validate_url("http://example.com/path?q=1"));
    }

    #[test]
    fn test_validate_url_rejects_missing_scheme() {
        assert!(!validate_url("example.com"));
        assert!(!validate_url("//example.com"));
    }

    #[test]
    fn test_validate_url_rejects_other_schemes() {
        assert!(!validate_url("ftp://example.com"));
        assert!(!validate_url("file:///etc/passwd"));
        assert!(!validate_url("mailto:hi@example.com"));
    }

    #[test]
    fn test_validate_url_rejects_empty_or_garbage() {
        assert!(!validate_url(""));
        assert!(!validate_url("not a url at all"));
    }

    #[test]
    fn test_domain_name_strips_www_and_lowercases() {
        assert_eq!(domain_name("https://www.Example.com/path"), "example.com");
    }

    #[test]
    fn test_domain_name_keeps_subdomains() {
        assert_eq!(domain_name("https://blog.example.com"), "blog.example.com");
    }

    #[test]
    fn test_domain_name_only_strips_leading_www() {
        assert_eq!(domain_name("https://www.www-tools.com"), "www-tools.com");
    }

    #[test]
    fn test_domain_name_invalid_input() {
        assert_eq!(domain_name("not a url"), "");
    }
}

//! Utility functions for the storefront client
//!
//! UTF-8 safe truncation for logging response bodies, and origin naming for
//! per-origin credential files.

use reqwest::Url;

/// Safely truncate a string at a UTF-8 character boundary.
///
/// Returns a slice of at most `max_bytes` bytes, ensuring the result
/// is valid UTF-8 by finding the last valid character boundary.
///
/// # Example
/// ```
/// use storefront_client::utils::safe_truncate;
///
/// // "ỗ" is 3 bytes - truncating at byte 3 would cut it in half
/// let text = "Lỗi đăng nhập";
/// assert_eq!(safe_truncate(text, 3), "L");
/// ```
#[inline]
#[must_use]
pub fn safe_truncate(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut boundary = max_bytes;
    while boundary > 0 && !s.is_char_boundary(boundary) {
        boundary -= 1;
    }

    &s[..boundary]
}

/// Truncate a string for display with ellipsis.
///
/// # Example
/// ```
/// use storefront_client::utils::truncate_for_display;
///
/// assert_eq!(truncate_for_display("This is a long message", 10), "This is a ...");
/// ```
#[must_use]
pub fn truncate_for_display(s: &str, max_bytes: usize) -> String {
    let truncated = safe_truncate(s, max_bytes);
    if truncated.len() < s.len() {
        format!("{truncated}...")
    } else {
        truncated.to_string()
    }
}

/// Lossy, bounded preview of a response body for logs and error messages
#[must_use]
pub fn body_preview(body: &[u8], max_bytes: usize) -> String {
    truncate_for_display(&String::from_utf8_lossy(body), max_bytes)
}

/// File-system safe name for the origin (scheme, host, port) of a URL.
///
/// Falls back to sanitizing the whole input if it does not parse.
#[must_use]
pub fn origin_slug(base_url: &str) -> String {
    let raw = match Url::parse(base_url) {
        Ok(url) => {
            let host = url.host_str().unwrap_or("localhost");
            match url.port_or_known_default() {
                Some(port) => format!("{}_{host}_{port}", url.scheme()),
                None => format!("{}_{host}", url.scheme()),
            }
        }
        Err(_) => base_url.to_string(),
    };

    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_truncate_ascii() {
        assert_eq!(safe_truncate("hello", 10), "hello");
        assert_eq!(safe_truncate("hello", 3), "hel");
        assert_eq!(safe_truncate("", 3), "");
    }

    #[test]
    fn test_safe_truncate_multibyte() {
        // "ỗ" is 3 bytes
        let text = "Lỗi";
        assert_eq!(safe_truncate(text, 2), "L");
        assert_eq!(safe_truncate(text, 4), "Lỗ");
    }

    #[test]
    fn test_body_preview() {
        assert_eq!(body_preview(b"{\"message\":\"x\"}", 100), "{\"message\":\"x\"}");
        assert_eq!(body_preview(b"0123456789", 4), "0123...");
        assert_eq!(body_preview(&[0xff, b'a'], 10), "\u{fffd}a");
    }

    #[test]
    fn test_origin_slug() {
        assert_eq!(origin_slug("http://localhost:8080"), "http_localhost_8080");
        assert_eq!(origin_slug("https://shop.example.com/api"), "https_shop_example_com_443");
        assert_eq!(origin_slug("not a url"), "not_a_url");
    }
}

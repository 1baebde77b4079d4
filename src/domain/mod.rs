//! Domain normalization.
//!
//! Reduces whatever a spreadsheet holds in its website column
//! (`"HTTPS://WWW.Example.com/about"`, `" example.com "`) to the canonical host
//! used as the MX lookup key.

const SCHEMES: &[&str] = &["https://", "http://"];
const WWW_PREFIX: &str = "www.";

/// Normalizes a raw website/domain cell to a canonical host.
///
/// Trims whitespace, lower-cases, strips leading `http://`/`https://` and
/// `www.` prefixes, and drops everything from the first `/` on. Input that
/// does not look like a URL is returned trimmed and lower-cased, without
/// further validation.
///
/// Returns `None` for absent input and for input that normalizes to nothing
/// (`""`, `"https://"`, `"/path"`). The function is pure and idempotent.
///
/// # Examples
///
/// ```
/// use mx_filter::normalize_domain;
///
/// assert_eq!(
///     normalize_domain(Some("HTTPS://WWW.Example.com/path?q=1")),
///     Some("example.com".to_string())
/// );
/// assert_eq!(normalize_domain(None), None);
/// ```
pub fn normalize_domain(raw: Option<&str>) -> Option<String> {
    let lowered = raw?.to_lowercase();
    let mut host = lowered.trim();

    // Strip prefixes until none applies, so "http://www. x.com" and
    // "www.www.x.com" reach the same fixed point a second pass would.
    loop {
        let before = host;
        for scheme in SCHEMES {
            if let Some(rest) = host.strip_prefix(scheme) {
                host = rest.trim_start();
            }
        }
        if let Some(rest) = host.strip_prefix(WWW_PREFIX) {
            host = rest.trim_start();
        }
        if host == before {
            break;
        }
    }

    let host = host.split('/').next().unwrap_or_default().trim_end();
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// URL helpers: display titles and fragment-insensitive matching
use url::Url;

/// Maximum hostname length shown before truncation
const TITLE_MAX_LEN: usize = 20;

/// Derive the short display title for a reminder from its URL.
///
/// Algorithm:
/// 1. Parse the URL and take its hostname
/// 2. Strip a leading "www."
/// 3. Truncate to 20 characters and append "..." if longer
/// 4. Fall back to "Custom URL" when the URL does not parse
///
/// Examples:
/// - https://www.google.com/search → google.com
/// - https://issues.internal.example-company.com → issues.internal.exam...
/// - not-a-url → Custom URL
pub fn display_title(url: &str) -> String {
    let hostname = match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(host) => host,
        None => return "Custom URL".to_string(),
    };

    let hostname = hostname.strip_prefix("www.").unwrap_or(&hostname);

    if hostname.chars().count() > TITLE_MAX_LEN {
        let truncated: String = hostname.chars().take(TITLE_MAX_LEN).collect();
        format!("{}...", truncated)
    } else {
        hostname.to_string()
    }
}

/// Strip a trailing #fragment from a URL string
pub fn strip_fragment(url: &str) -> &str {
    url.split('#').next().unwrap_or(url)
}

/// Compare two URLs ignoring their #fragment suffixes
pub fn urls_match(a: &str, b: &str) -> bool {
    strip_fragment(a) == strip_fragment(b)
}

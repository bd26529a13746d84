//! Input checks run before a request is dispatched.

use std::sync::OnceLock;

use regex::Regex;

const URL_PATTERN: &str = r"^(http|https)://[a-zA-Z0-9]+([-\.][a-zA-Z0-9-]+)*\.[a-zA-Z]{2,}(:[0-9]{1,5})?(/[^?#]*)?(\?[^#]*)?(#.*)?$";
const PORT_PATTERN: &str = r":([0-9]+)";

fn url_regex() -> Option<&'static Regex> {
    static URL: OnceLock<Option<Regex>> = OnceLock::new();
    URL.get_or_init(|| Regex::new(URL_PATTERN).ok()).as_ref()
}

fn port_regex() -> Option<&'static Regex> {
    static PORT: OnceLock<Option<Regex>> = OnceLock::new();
    PORT.get_or_init(|| Regex::new(PORT_PATTERN).ok()).as_ref()
}

/// Accepts http(s) URLs with a dotted host name, an optional port up to
/// 65535 and optional path, query and fragment. Whitespace anywhere fails.
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() || url.chars().any(char::is_whitespace) {
        return false;
    }
    let (Some(url_re), Some(port_re)) = (url_regex(), port_regex()) else {
        return false;
    };
    if !url_re.is_match(url) {
        return false;
    }
    match port_re.captures(url).and_then(|caps| caps.get(1)) {
        Some(port) => port.as_str().len() <= 5 && port.as_str().parse::<u32>().is_ok_and(|p| p <= 65535),
        None => true,
    }
}

/// An empty body counts as valid: it means "no body".
pub fn is_valid_json(body: &str) -> bool {
    body.is_empty() || serde_json::from_str::<serde_json::Value>(body).is_ok()
}

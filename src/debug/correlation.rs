//! Correlation ids and request tagging.

use chrono::Utc;
use reqwest::Url;

/// Query parameter carrying the correlation id.
pub const DEBUG_QUERY_KEY: &str = "dbg";

/// Origin used only to parse relative targets.
const PLACEHOLDER_ORIGIN: &str = "http://origin.invalid";

const SUFFIX_LEN: usize = 6;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a correlation id: `<unix-millis>-<6 base36 chars>`.
pub fn new_correlation_id() -> String {
    let mut random = uuid::Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(BASE36[(random % 36) as usize] as char);
        random /= 36;
    }
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Whether a target is a same-origin relative path (`/tools`, not `//host`).
pub fn is_relative_target(target: &str) -> bool {
    target.starts_with('/') && !target.starts_with("//")
}

/// Set `key=value` on a relative target, replacing any existing `key`.
///
/// Returns `path?query`. Absolute or protocol-relative targets, and targets
/// that fail to parse, come back unchanged.
pub fn add_query_param(target: &str, key: &str, value: &str) -> String {
    if !is_relative_target(target) {
        return target.to_string();
    }

    let mut url = match Url::parse(PLACEHOLDER_ORIGIN).and_then(|base| base.join(target)) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(target: "toolcat::net", "Not tagging '{}': {}", target, e);
            return target.to_string();
        }
    };

    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(retained);
        pairs.append_pair(key, value);
    }

    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_id_shape() {
        let id = new_correlation_id();
        let (millis, suffix) = id.split_once('-').unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_correlation_ids_differ() {
        assert_ne!(new_correlation_id(), new_correlation_id());
    }

    #[test]
    fn test_adds_param_to_plain_path() {
        assert_eq!(add_query_param("/tools", "dbg", "1-abc"), "/tools?dbg=1-abc");
    }

    #[test]
    fn test_keeps_existing_params_and_replaces_key() {
        let tagged = add_query_param("/tools?dbg=old&q=mail", "dbg", "new");
        assert_eq!(tagged, "/tools?q=mail&dbg=new");
        assert_eq!(tagged.matches("dbg=").count(), 1);
    }

    #[test]
    fn test_absolute_urls_are_untouched() {
        let url = "https://cdn.example.com/icons/a.png?v=2";
        assert_eq!(add_query_param(url, "dbg", "x"), url);
    }

    #[test]
    fn test_protocol_relative_urls_are_untouched() {
        assert_eq!(add_query_param("//cdn.example.com/a", "dbg", "x"), "//cdn.example.com/a");
        assert!(!is_relative_target("//cdn.example.com/a"));
    }

    #[test]
    fn test_fragment_is_dropped() {
        assert_eq!(add_query_param("/admin#tools", "dbg", "x"), "/admin?dbg=x");
    }
}

//! Cross-origin policy for browser clients.
//!
//! Origins come from an explicit allow-list. An entry of the form
//! `*.example.com` matches every origin ending in `.example.com`, and
//! `https://*.example.com` additionally requires the scheme. Anything else
//! must match the `Origin` header exactly; entries with a `*` anywhere else
//! are ignored with a warning.

use axum::http::{
    HeaderName, HeaderValue, Method,
    header::{AUTHORIZATION, CONTENT_TYPE},
    request::Parts,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

static X_REQUESTED_WITH: HeaderName = HeaderName::from_static("x-requested-with");

#[derive(Clone, Debug, PartialEq, Eq)]
enum OriginRule {
    Exact(String),
    /// `*.domain`, optionally pinned to a scheme (`https://*.domain`).
    Suffix {
        scheme: Option<String>,
        suffix: String,
    },
}

impl OriginRule {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().trim_end_matches('/');
        if raw.is_empty() {
            return None;
        }

        let (scheme, host) = match raw.split_once("://") {
            Some((scheme, host)) => (Some(format!("{scheme}://")), host),
            None => (None, raw),
        };
        if let Some(domain) = host.strip_prefix("*.") {
            if domain.is_empty() || domain.contains('*') {
                return None;
            }
            return Some(Self::Suffix {
                scheme,
                suffix: format!(".{domain}"),
            });
        }
        if raw.contains('*') {
            return None;
        }
        Some(Self::Exact(raw.to_string()))
    }

    fn matches(&self, origin: &str) -> bool {
        match self {
            Self::Exact(allowed) => origin == allowed,
            Self::Suffix { scheme, suffix } => {
                scheme
                    .as_deref()
                    .is_none_or(|scheme| origin.starts_with(scheme))
                    && origin.ends_with(suffix.as_str())
            }
        }
    }
}

fn parse_rules(allowed_origins: &[String]) -> Vec<OriginRule> {
    allowed_origins
        .iter()
        .filter_map(|raw| {
            let rule = OriginRule::parse(raw);
            if rule.is_none() {
                tracing::warn!("ignoring invalid allowed origin {raw:?}");
            }
            rule
        })
        .collect()
}

/// Build the CORS layer for the configured allow-list.
pub fn layer(allowed_origins: &[String]) -> CorsLayer {
    let rules = parse_rules(allowed_origins);
    tracing::debug!("CORS allow-list: {rules:?}");

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _: &Parts| {
                origin
                    .to_str()
                    .is_ok_and(|origin| rules.iter().any(|rule| rule.matches(origin)))
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION, X_REQUESTED_WITH.clone()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_rule_matches_only_itself() {
        let rule = OriginRule::parse("http://localhost:5173/").unwrap();
        assert!(rule.matches("http://localhost:5173"));
        assert!(!rule.matches("http://localhost:5174"));
        assert!(!rule.matches("https://localhost:5173"));
    }

    #[test]
    fn wildcard_rule_matches_subdomains() {
        let rule = OriginRule::parse("*.onrender.com").unwrap();
        assert!(rule.matches("https://expenso.onrender.com"));
        assert!(!rule.matches("https://onrender.com.evil.io"));
        assert!(!rule.matches("https://notonrender.com"));
    }

    #[test]
    fn scheme_prefixed_wildcard_matches_that_scheme_only() {
        let rule = OriginRule::parse("https://*.example.com").unwrap();
        assert!(rule.matches("https://app.example.com"));
        assert!(!rule.matches("http://app.example.com"));
        assert!(!rule.matches("https://example.com"));
    }

    #[test]
    fn misplaced_wildcards_are_dropped() {
        assert_eq!(OriginRule::parse("https://app.*.example.com"), None);
        assert_eq!(OriginRule::parse("https://*.*.example.com"), None);
        assert_eq!(OriginRule::parse("*"), None);
    }

    #[test]
    fn blank_entries_are_dropped() {
        let rules = parse_rules(&["".to_string(), "*.".to_string(), "http://a".to_string()]);
        assert_eq!(rules, vec![OriginRule::Exact("http://a".to_string())]);
    }
}

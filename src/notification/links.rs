use url::{form_urlencoded, Url};

use crate::{Result, StorefrontError};

/// Builds absolute links into the storefront web application.
///
/// The base URL comes from configuration; nothing here reads request state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppLinks {
    base: String,
}

impl AppLinks {
    pub fn new(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url.trim())
            .map_err(|e| StorefrontError::InvalidConfig(format!("APP_BASE_URL '{base_url}': {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(StorefrontError::InvalidConfig(format!("APP_BASE_URL must be http(s), got '{}'", url.scheme())));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(StorefrontError::InvalidConfig("APP_BASE_URL must not carry a query or fragment".into()));
        }
        Ok(Self { base: url.as_str().trim_end_matches('/').to_string() })
    }

    pub fn base(&self) -> &str { &self.base }

    /// `<base>/<path>` followed by the form-encoded `query`, if any.
    pub fn link(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut link = format!("{}/{}", self.base, path.trim_start_matches('/'));
        if !query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new()).extend_pairs(query).finish();
            link.push('?');
            link.push_str(&encoded);
        }
        link
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_keeps_base_path() {
        let links = AppLinks::new("https://shop.example.com/worldoftoys/").unwrap();
        assert_eq!(links.link("/login", &[]), "https://shop.example.com/worldoftoys/login");
    }

    #[test]
    fn test_link_encodes_query() {
        let links = AppLinks::new("http://localhost:8080").unwrap();
        assert_eq!(links.link("activate", &[("token", "a b&c")]), "http://localhost:8080/activate?token=a+b%26c");
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(matches!(AppLinks::new("ftp://example.com"), Err(StorefrontError::InvalidConfig(_))));
        assert!(AppLinks::new("not a url").is_err());
        assert!(AppLinks::new("https://example.com/?x=1").is_err());
    }
}

use actix_web::{
    http::header::{self, HeaderValue},
    HttpResponse,
};

pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Exact-match origin allow-list.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<String>,
}

impl CorsPolicy {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    pub fn allowed_origin<'a>(&self, origin: Option<&'a str>) -> Option<&'a str> {
        origin.filter(|o| self.allowed_origins.iter().any(|allowed| allowed == o))
    }

    /// Sets the CORS headers on any outgoing response. The origin is only
    /// echoed back when it is on the allow-list.
    pub fn apply(&self, origin: Option<&str>, response: &mut HttpResponse) {
        let headers = response.headers_mut();

        if let Some(origin) = self.allowed_origin(origin) {
            if let Ok(value) = HeaderValue::from_str(origin) {
                headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
            }
        }
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_ALLOWED_ORIGINS;

    fn policy() -> CorsPolicy {
        CorsPolicy::new(DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_exact_match_only() {
        let cors = policy();
        assert_eq!(
            cors.allowed_origin(Some("https://nbdomains.com")),
            Some("https://nbdomains.com")
        );
        assert_eq!(cors.allowed_origin(Some("https://nbdomains.com/")), None);
        assert_eq!(cors.allowed_origin(Some("http://nbdomains.com")), None);
        assert_eq!(cors.allowed_origin(Some("https://evil.nbdomains.com")), None);
        assert_eq!(cors.allowed_origin(None), None);
    }

    #[test]
    fn test_apply_without_origin_still_sets_methods() {
        let mut response = HttpResponse::Ok().finish();
        policy().apply(Some("https://example.com"), &mut response);

        let headers = response.headers();
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "POST, OPTIONS"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "Content-Type"
        );
    }
}

//! CORS gate for the proxy route.
//!
//! The policy is a fixed table compiled into the binary. The only
//! per-request decision is whether the caller's `Origin` is on the allow-list;
//! if it is, that exact origin is echoed back. Otherwise no
//! `Access-Control-Allow-Origin` header is sent and the browser blocks the
//! response (implicit deny).
//!
//! The remaining headers are always set, on every response of the route
//! (preflight, success, 404, 405 and error responses alike).

use axum::{
    extract::Request,
    http::{
        HeaderMap, HeaderValue,
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
            CACHE_CONTROL, ORIGIN, VARY,
        },
    },
    middleware::Next,
    response::Response,
};

/// Origins allowed to call the proxy from a browser.
pub const ALLOWED_ORIGINS: [&str; 3] = [
    "https://myselflingerie.com",
    "https://www.myselflingerie.com",
    "http://localhost:3000",
];

/// Value of `Access-Control-Allow-Methods`.
pub const ALLOWED_METHODS: &str = "GET,POST,OPTIONS";

/// Value of `Access-Control-Allow-Headers`.
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, X-Requested-With";

/// Value of `Access-Control-Max-Age` (24 hours).
pub const MAX_AGE_SECS: &str = "86400";

/// Whether `origin` is on the allow-list (exact, case-sensitive match).
#[must_use]
pub fn is_allowed_origin(origin: &HeaderValue) -> bool {
    ALLOWED_ORIGINS
        .iter()
        .any(|allowed| origin.as_bytes() == allowed.as_bytes())
}

/// Apply the CORS policy to a response's headers.
///
/// `origin` is the request's `Origin` header, if any.
pub fn apply_cors_headers(headers: &mut HeaderMap, origin: Option<&HeaderValue>) {
    if let Some(origin) = origin.filter(|origin| is_allowed_origin(origin)) {
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
    }

    // The response differs per origin, so shared caches must key on it
    headers.append(VARY, HeaderValue::from_static("Origin"));

    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS));
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
}

/// Middleware that applies the CORS policy to every response of the route.
pub async fn cors_middleware(request: Request, next: Next) -> Response {
    let origin = request.headers().get(ORIGIN).cloned();

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut(), origin.as_ref());

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers_for(origin: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let origin = origin.map(HeaderValue::from_static);
        apply_cors_headers(&mut headers, origin.as_ref());
        headers
    }

    #[test]
    fn test_allowed_origins_are_echoed() {
        for origin in ALLOWED_ORIGINS {
            let headers = headers_for(Some(origin));
            assert_eq!(
                headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
                origin,
                "origin {origin} should be echoed"
            );
        }
    }

    #[test]
    fn test_unknown_origin_gets_no_allow_origin() {
        for origin in [
            "https://evil.example",
            "https://myselflingerie.com.evil.example",
            "http://myselflingerie.com",
            "https://MYSELFLINGERIE.com",
            "http://localhost:3001",
            "*",
        ] {
            let headers = headers_for(Some(origin));
            assert!(
                headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none(),
                "origin {origin} should be denied"
            );
        }
    }

    #[test]
    fn test_missing_origin_gets_no_allow_origin() {
        let headers = headers_for(None);
        assert!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn test_fixed_headers_always_set() {
        for origin in [None, Some("https://evil.example"), Some("http://localhost:3000")] {
            let headers = headers_for(origin);
            assert_eq!(
                headers.get(ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
                "GET,POST,OPTIONS"
            );
            assert_eq!(
                headers.get(ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
                "Content-Type, Authorization, X-Requested-With"
            );
            assert_eq!(
                headers.get(ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
                "true"
            );
            assert_eq!(headers.get(ACCESS_CONTROL_MAX_AGE).unwrap(), "86400");
            assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "no-store");
            assert_eq!(headers.get(VARY).unwrap(), "Origin");
        }
    }

    #[test]
    fn test_never_wildcard() {
        for origin in ALLOWED_ORIGINS {
            let headers = headers_for(Some(origin));
            assert_ne!(headers.get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
        }
    }
}

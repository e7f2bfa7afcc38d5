//! Common and pagination response headers
//!
//! The header lists below are a versioned contract with API clients and must
//! not change silently: clients rely on `Access-Control-Expose-Headers` to
//! read the pagination and count headers from cross-origin responses.

use http::{header, HeaderMap, HeaderName, HeaderValue};

use crate::pagination::PageWindow;

/// Content type of every JSON response
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=UTF-8";

/// Headers exposed to cross-origin callers
pub const EXPOSED_HEADERS: &str = "X-Requested-With, X-Count-Local, X-Count-Total, X-PageCurrent, X-Page-Size, X-Page-Prev, X-Page-Next, X-Page-First, X-Page-Last, X-Namespace";

/// Methods accepted on cross-origin requests
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, PATCH, HEAD, OPTIONS";

/// Request headers accepted on cross-origin requests
pub const ALLOWED_HEADERS: &str = "Authorization, Content-Type, Cache-Control, If-Modified-Since, X-Requested-With, X-Count-Local, X-Count-Total, X-PageCurrent, X-Page-Size, X-Page-Prev, X-Page-Next, X-Page-First, X-Page-Last, X-Namespace";

/// `X-Page-First` response header
pub static X_PAGE_FIRST: HeaderName = HeaderName::from_static("x-page-first");
/// `X-Page-Prev` response header
pub static X_PAGE_PREV: HeaderName = HeaderName::from_static("x-page-prev");
/// `X-Page-Next` response header
pub static X_PAGE_NEXT: HeaderName = HeaderName::from_static("x-page-next");
/// `X-Page-Last` response header
pub static X_PAGE_LAST: HeaderName = HeaderName::from_static("x-page-last");

/// Set the content-type and CORS headers shared by every response.
///
/// `Access-Control-Allow-Origin` echoes `origin` when it is present and
/// non-empty, and falls back to `*` otherwise.
pub fn set_common_headers(headers: &mut HeaderMap, origin: Option<&str>) {
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(CONTENT_TYPE_JSON),
    );

    let allow_origin = origin
        .filter(|o| !o.is_empty())
        .and_then(|o| HeaderValue::from_str(o).ok())
        .unwrap_or_else(|| HeaderValue::from_static("*"));
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin);

    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static(EXPOSED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
}

/// Set the four `X-Page-*` navigation headers from a computed window.
///
/// Present on every response for a collection-touching operation, even when
/// the body is empty (HEAD and Info probes included).
pub fn set_pagination_headers(headers: &mut HeaderMap, window: PageWindow) {
    headers.insert(&X_PAGE_FIRST, HeaderValue::from(window.first));
    headers.insert(&X_PAGE_PREV, HeaderValue::from(window.prev));
    headers.insert(&X_PAGE_NEXT, HeaderValue::from(window.next));
    headers.insert(&X_PAGE_LAST, HeaderValue::from(window.last));
}

/// Extract the `Origin` header value from an incoming request
pub fn request_origin(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

use crate::error::ApiError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};

/// Builds the default headers for app-only authentication.
///
/// The X API v2 read endpoints used here accept an OAuth 2.0 bearer token in the
/// `Authorization` header. The header value is marked sensitive so it is never
/// printed by `reqwest`'s debug output.
pub fn bearer_headers(token: &str) -> Result<HeaderMap, ApiError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ApiError::MissingCredentials);
    }

    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|e| ApiError::InvalidData(format!("Bearer token is not a valid header value: {}", e)))?;
    value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

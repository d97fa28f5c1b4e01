use http::header::AUTHORIZATION;
use http::HeaderMap;

use super::errors::HeaderError;

const BEARER_PREFIX: &str = "Bearer ";
const API_KEY_PREFIX: &str = "ApiKey ";

/// Extract a bearer credential from the `Authorization` header.
///
/// On protected routes the credential is a signed access token; on the
/// refresh/revoke routes it carries the opaque refresh-token value.
///
/// # Arguments
/// * `headers` - Request headers
///
/// # Returns
/// Credential value with surrounding whitespace trimmed
///
/// # Errors
/// * `NoAuthHeader` - Header is absent
/// * `Malformed` - Header does not carry exactly one `Bearer `-prefixed value
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, HeaderError> {
    extract_with_scheme(headers, BEARER_PREFIX)
}

/// Extract an API-key credential from the `Authorization` header.
///
/// Identical contract to [`extract_bearer`] with the `ApiKey ` scheme.
///
/// # Arguments
/// * `headers` - Request headers
///
/// # Returns
/// Key value with surrounding whitespace trimmed
///
/// # Errors
/// * `NoAuthHeader` - Header is absent
/// * `Malformed` - Header does not carry exactly one `ApiKey `-prefixed value
pub fn extract_api_key(headers: &HeaderMap) -> Result<String, HeaderError> {
    extract_with_scheme(headers, API_KEY_PREFIX)
}

fn extract_with_scheme(headers: &HeaderMap, prefix: &str) -> Result<String, HeaderError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(HeaderError::NoAuthHeader)?
        .to_str()
        .map_err(|_| HeaderError::Malformed)?;

    if !value.starts_with(prefix) {
        return Err(HeaderError::Malformed);
    }

    // Splitting on the scheme prefix must yield exactly the empty lead-in
    // and one credential; a repeated scheme is rejected.
    let parts: Vec<&str> = value.split(prefix).collect();
    if parts.len() != 2 {
        return Err(HeaderError::Malformed);
    }

    Ok(parts[1].trim().to_string())
}

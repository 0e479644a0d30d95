//! Set-Cookie helpers for the auth token pair.
//!
//! Auth handlers deliver tokens both in the response body and as HttpOnly
//! cookies so browser clients never have to touch the tokens from script.

use axum::http::{HeaderMap, HeaderValue};

/// Cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Builds a `Set-Cookie` value carrying an auth token.
///
/// Cookies are HttpOnly with SameSite=Strict; pass `secure: true` outside
/// development so they are only ever sent over HTTPS.
pub fn auth_cookie(
    name: &str,
    token: &str,
    max_age: i64,
    secure: bool,
) -> eyre::Result<HeaderValue> {
    let secure_flag = if secure { " Secure;" } else { "" };
    let cookie = format!(
        "{}={}; HttpOnly;{} SameSite=Strict; Path=/; Max-Age={}",
        name, token, secure_flag, max_age
    );

    HeaderValue::from_str(&cookie).map_err(|e| eyre::eyre!("invalid cookie value: {}", e))
}

/// Builds a `Set-Cookie` value that expires the named cookie immediately.
pub fn clear_auth_cookie(name: &str, secure: bool) -> eyre::Result<HeaderValue> {
    auth_cookie(name, "", 0, secure)
}

/// Finds a cookie value by name in the request `Cookie` header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get("cookie").and_then(|v| v.to_str().ok())?;

    cookies.split(';').find_map(|cookie| {
        let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
        if parts.len() == 2 && parts[0] == name {
            Some(parts[1].to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_cookie_sets_expected_attributes() {
        let value = auth_cookie(ACCESS_TOKEN_COOKIE, "tok123", 900, false).unwrap();
        let cookie = value.to_str().unwrap();
        assert!(cookie.starts_with("access_token=tok123;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=900"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn auth_cookie_secure_flag() {
        let value = auth_cookie(REFRESH_TOKEN_COOKIE, "tok456", 604800, true).unwrap();
        assert!(value.to_str().unwrap().contains(" Secure;"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let value = clear_auth_cookie(ACCESS_TOKEN_COOKIE, false).unwrap();
        let cookie = value.to_str().unwrap();
        assert!(cookie.starts_with("access_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn cookie_value_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            "theme=dark; access_token=abc.def.ghi; lang=en".parse().unwrap(),
        );

        assert_eq!(
            cookie_value(&headers, "access_token").as_deref(),
            Some("abc.def.ghi")
        );
        assert_eq!(cookie_value(&headers, "theme").as_deref(), Some("dark"));
        assert_eq!(cookie_value(&headers, "refresh_token"), None);
    }

    #[test]
    fn cookie_value_keeps_equals_signs_in_value() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", "access_token=abc=extra".parse().unwrap());

        assert_eq!(
            cookie_value(&headers, "access_token").as_deref(),
            Some("abc=extra")
        );
    }

    #[test]
    fn cookie_value_without_header() {
        let headers = HeaderMap::new();
        assert_eq!(cookie_value(&headers, "access_token"), None);
    }
}

//! Buyer identity resolution.
//!
//! Anonymous basket ownership rides in the `buyerId` cookie: an essential,
//! long-lived cookie holding an opaque token. It is intentionally not
//! HttpOnly - the browser client reads it to know whether a basket may exist.
//! Authenticated requests ignore the cookie and use the username as the
//! buyer token.

use axum::{extract::FromRequestParts, http::HeaderMap, http::header, http::request::Parts};

use driftwood_core::BuyerToken;

use super::auth::MaybeUser;
use crate::error::AppError;
use crate::state::AppState;

/// Cookie carrying the anonymous buyer token.
pub const BUYER_COOKIE: &str = "buyerId";

/// Cookie lifetime: 30 days, in seconds.
const BUYER_COOKIE_MAX_AGE: i64 = 30 * 24 * 60 * 60;

/// The resolved buyer identity for a request, if any.
///
/// Username takes precedence over the cookie; an authenticated request always
/// addresses the basket stored under the username.
pub struct BuyerId(pub Option<BuyerToken>);

impl FromRequestParts<AppState> for BuyerId {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let MaybeUser(user) = MaybeUser::from_request_parts(parts, state).await?;
        if let Some(user) = user {
            return Ok(Self(Some(BuyerToken::user(&user.username))));
        }
        Ok(Self(cookie_value(&parts.headers, BUYER_COOKIE).map(BuyerToken::from)))
    }
}

/// Read a cookie value out of the request headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_owned())
}

/// Build the `Set-Cookie` value that persists an anonymous buyer token.
#[must_use]
pub fn set_buyer_cookie(token: &BuyerToken, secure: bool) -> String {
    let mut cookie = format!(
        "{BUYER_COOKIE}={}; Max-Age={BUYER_COOKIE_MAX_AGE}; Path=/; SameSite=Lax",
        token.as_str()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that clears the buyer cookie.
#[must_use]
pub fn clear_buyer_cookie(secure: bool) -> String {
    let mut cookie = format!("{BUYER_COOKIE}=; Max-Age=0; Path=/; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_cookie_value_found_among_many() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; buyerId=abc-123; lang=en"),
        );
        assert_eq!(
            cookie_value(&headers, BUYER_COOKIE),
            Some("abc-123".to_owned())
        );
    }

    #[test]
    fn test_cookie_value_missing() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(cookie_value(&headers, BUYER_COOKIE), None);
    }

    #[test]
    fn test_set_buyer_cookie_30_days() {
        let token = BuyerToken::from("tok".to_owned());
        let cookie = set_buyer_cookie(&token, false);
        assert!(cookie.starts_with("buyerId=tok; "));
        assert!(cookie.contains("Max-Age=2592000"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_clear_buyer_cookie_expires_immediately() {
        let cookie = clear_buyer_cookie(true);
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.contains("Secure"));
    }
}

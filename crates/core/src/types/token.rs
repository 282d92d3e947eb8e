//! Buyer token - the owner key for a basket.
//!
//! A basket belongs either to an authenticated user (token == username) or to
//! an anonymous session (random UUID persisted client-side in the `buyerId`
//! cookie). The token is deliberately opaque: the persistence layer keys
//! baskets by it and never inspects which kind it is.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for a basket owner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
pub struct BuyerToken(String);

impl BuyerToken {
    /// Token for an authenticated user. The username is the key.
    #[must_use]
    pub fn user(username: &str) -> Self {
        Self(username.to_owned())
    }

    /// Freshly generated token for an anonymous session.
    ///
    /// The caller must persist this client-side (long-lived `buyerId` cookie)
    /// so subsequent anonymous requests resolve the same basket.
    #[must_use]
    pub fn anonymous() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for BuyerToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl std::fmt::Display for BuyerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_token_is_username() {
        let token = BuyerToken::user("sam");
        assert_eq!(token.as_str(), "sam");
    }

    #[test]
    fn test_anonymous_tokens_are_unique() {
        assert_ne!(BuyerToken::anonymous(), BuyerToken::anonymous());
    }

    #[test]
    fn test_serde_transparent() {
        let token = BuyerToken::user("sam");
        assert_eq!(
            serde_json::to_string(&token).expect("serialize"),
            "\"sam\""
        );
    }
}

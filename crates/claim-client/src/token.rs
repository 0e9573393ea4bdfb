//! Session token handling.

use std::fmt;

/// Opaque credential issued by the authentication endpoint.
///
/// Used once to authorize the claim call. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Authorization header value: `<scheme> <token>`.
    ///
    /// A token that already starts with the scheme is returned unchanged, so
    /// the prefix is never doubled. An empty scheme yields the bare token.
    #[must_use]
    pub fn authorization_value(&self, scheme: &str) -> String {
        let token = self.0.trim();
        if scheme.is_empty() || has_scheme(token, scheme) {
            return token.to_string();
        }
        format!("{scheme} {token}")
    }

    /// A short prefix safe for debug logs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let prefix: String = self.0.chars().take(8).collect();
        format!("{prefix}...")
    }
}

fn has_scheme(token: &str, scheme: &str) -> bool {
    token
        .split_once(' ')
        .is_some_and(|(head, _)| head.eq_ignore_ascii_case(scheme))
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

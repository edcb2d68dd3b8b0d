//! Credentials domain type

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Username/password pair forwarded to the job server
///
/// The password is never printed: `Debug` redacts it so credentials can be
/// carried through `tracing` fields and error chains safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Parse an HTTP `Authorization: Basic ...` header value
    ///
    /// Returns `None` for other schemes or malformed values. The password
    /// may itself contain ':'; only the first one separates the fields.
    pub fn from_basic_auth(header: &str) -> Option<Self> {
        let (scheme, encoded) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self::new(username, password))
    }

    /// Both fields must be non-empty
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("alice", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_from_basic_auth() {
        let creds = Credentials::from_basic_auth("Basic YWxpY2U6c2VjcmV0").unwrap();
        assert_eq!(creds, Credentials::new("alice", "secret"));

        // "bob:pa:ss"
        let creds = Credentials::from_basic_auth("basic Ym9iOnBhOnNz").unwrap();
        assert_eq!(creds.password, "pa:ss");
    }

    #[test]
    fn test_from_basic_auth_rejects_malformed() {
        assert!(Credentials::from_basic_auth("Bearer abc").is_none());
        assert!(Credentials::from_basic_auth("Basic !!!").is_none());
        // "nocolon"
        assert!(Credentials::from_basic_auth("Basic bm9jb2xvbg==").is_none());
        assert!(Credentials::from_basic_auth("Basic").is_none());
    }

    #[test]
    fn test_is_complete() {
        assert!(Credentials::new("alice", "secret").is_complete());
        assert!(!Credentials::new("", "secret").is_complete());
        assert!(!Credentials::new("alice", "").is_complete());
    }
}

//! Active shopper identity.

use secrecy::SecretString;

use mathmarket_core::Email;

use crate::api::AuthSession;

/// Who is shopping right now.
///
/// Anonymous shoppers can browse, fill a cart, and check out as guests with
/// just an email. Authenticated shoppers carry a bearer token and get the
/// purchase gate and the post-purchase library.
#[derive(Debug, Clone, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated {
        email: Email,
        token: SecretString,
    },
}

impl Identity {
    /// Email of the authenticated identity, if any.
    #[must_use]
    pub const fn email(&self) -> Option<&Email> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { email, .. } => Some(email),
        }
    }

    /// Whether a customer is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

impl From<AuthSession> for Identity {
    fn from(session: AuthSession) -> Self {
        Self::Authenticated {
            email: session.email,
            token: session.token,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_email() {
        let identity = Identity::Anonymous;
        assert!(!identity.is_authenticated());
        assert!(identity.email().is_none());
    }

    #[test]
    fn test_authenticated_exposes_email() {
        let identity = Identity::Authenticated {
            email: Email::parse("user@example.com").unwrap(),
            token: SecretString::from("tok"),
        };
        assert!(identity.is_authenticated());
        assert_eq!(identity.email().unwrap().as_str(), "user@example.com");
    }
}

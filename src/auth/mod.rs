use crate::types::SessionUser;

/// Resolves a bearer credential to the signed-in user, if any.
pub trait AuthProvider: Send + Sync {
    fn authenticate(&self, bearer: Option<&str>) -> Option<SessionUser>;
}

/// Accepts a single shared token and reports a fixed identity for it.
#[derive(Clone, Debug)]
pub struct StaticTokenAuth {
    token: String,
    user: SessionUser,
}

impl StaticTokenAuth {
    pub fn new(token: impl Into<String>, user: SessionUser) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }
}

impl AuthProvider for StaticTokenAuth {
    fn authenticate(&self, bearer: Option<&str>) -> Option<SessionUser> {
        match bearer {
            Some(token) if !self.token.is_empty() && token == self.token => {
                Some(self.user.clone())
            }
            _ => None,
        }
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> StaticTokenAuth {
        StaticTokenAuth::new(
            "secret",
            SessionUser::new(Some("Ada".into()), Some("ada@example.com".into())),
        )
    }

    #[test]
    fn accepts_matching_token() {
        let user = provider().authenticate(Some("secret")).unwrap();
        assert_eq!(user.name.as_deref(), Some("Ada"));
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn rejects_missing_or_wrong_token() {
        assert!(provider().authenticate(None).is_none());
        assert!(provider().authenticate(Some("nope")).is_none());
    }

    #[test]
    fn empty_configured_token_denies_everyone() {
        let auth = StaticTokenAuth::new("", SessionUser::default());
        assert!(auth.authenticate(Some("")).is_none());
    }

    #[test]
    fn parses_bearer_header() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer   abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}

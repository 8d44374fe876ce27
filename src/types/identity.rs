/// Resolves the login of the user on whose behalf a call is made.
pub trait IdentityProvider {
    /// Returns the current user's login, or `None` when nobody is signed in.
    fn current_user_login(&self) -> Option<String>;
}

/// An identity resolved once per request and handed to the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
    login: Option<String>,
}

impl CurrentUser {
    pub fn new(login: impl Into<String>) -> Self {
        Self {
            login: Some(login.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self { login: None }
    }

    /// Builds an identity from an optional login. Blank logins count as absent.
    ///
    /// Non-blank logins are kept verbatim so they compare equal to the
    /// `createdBy` values stored from them.
    pub fn from_login(login: Option<&str>) -> Self {
        match login {
            Some(l) if !l.trim().is_empty() => Self::new(l),
            _ => Self::anonymous(),
        }
    }
}

impl IdentityProvider for CurrentUser {
    fn current_user_login(&self) -> Option<String> {
        self.login.clone().filter(|l| !l.trim().is_empty())
    }
}

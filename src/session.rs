use std::fmt;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Roles and accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Admin,
}

impl Role {
    /// Admin grants everything; Viewer grants only Viewer.
    pub fn grants(self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::Viewer, Role::Viewer) => true,
            (Role::Viewer, Role::Admin) => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Viewer => write!(f, "viewer"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A configured login. Accounts come from [`crate::config::AppConfig`];
/// the defaults are demo credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: String,
    pub role: Role,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown user and wrong password are deliberately the same error.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("not logged in")]
    NotAuthenticated,

    #[error("requires the {0} role")]
    Forbidden(Role),
}

/// Per-session authentication context, owned by the application state and
/// passed to page handlers.  Created logged-out at startup, dropped with
/// the app; never global.
#[derive(Debug, Clone)]
pub struct Session {
    user: Option<String>,
    role: Role,
}

impl Default for Session {
    fn default() -> Self {
        Session {
            user: None,
            role: Role::Viewer,
        }
    }
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Validate credentials against the configured accounts and record
    /// the user and role on success.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
        accounts: &[Account],
    ) -> Result<(), AuthError> {
        let account = accounts
            .iter()
            .find(|a| a.username == username && a.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        log::info!("user '{}' logged in as {}", account.username, account.role);
        self.user = Some(account.username.clone());
        self.role = account.role;
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("user '{user}' logged out");
        }
        self.role = Role::Viewer;
    }

    /// Fail-closed role gate: denies whenever no user is logged in or the
    /// session role does not grant `required`.  Denial has no side effect
    /// beyond the returned error.
    pub fn require_auth(&self, required: Role) -> Result<(), AuthError> {
        if !self.is_authenticated() {
            return Err(AuthError::NotAuthenticated);
        }
        if !self.role.grants(required) {
            return Err(AuthError::Forbidden(required));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> Vec<Account> {
        vec![
            Account {
                username: "admin".to_string(),
                password: "secret".to_string(),
                role: Role::Admin,
            },
            Account {
                username: "analyst".to_string(),
                password: "numbers".to_string(),
                role: Role::Viewer,
            },
        ]
    }

    #[test]
    fn login_records_user_and_role() {
        let mut session = Session::default();
        session.login("admin", "secret", &accounts()).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.user(), Some("admin"));
        assert_eq!(session.role(), Role::Admin);
    }

    #[test]
    fn wrong_password_and_unknown_user_are_indistinguishable() {
        let mut session = Session::default();
        let a = session.login("admin", "wrong", &accounts()).unwrap_err();
        let b = session.login("nobody", "secret", &accounts()).unwrap_err();
        assert_eq!(a, AuthError::InvalidCredentials);
        assert_eq!(a, b);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn require_auth_fails_closed_when_logged_out() {
        let session = Session::default();
        assert_eq!(
            session.require_auth(Role::Viewer).unwrap_err(),
            AuthError::NotAuthenticated
        );
        assert_eq!(
            session.require_auth(Role::Admin).unwrap_err(),
            AuthError::NotAuthenticated
        );
    }

    #[test]
    fn viewer_cannot_reach_admin() {
        let mut session = Session::default();
        session.login("analyst", "numbers", &accounts()).unwrap();
        assert!(session.require_auth(Role::Viewer).is_ok());
        assert_eq!(
            session.require_auth(Role::Admin).unwrap_err(),
            AuthError::Forbidden(Role::Admin)
        );
    }

    #[test]
    fn admin_grants_viewer_pages() {
        let mut session = Session::default();
        session.login("admin", "secret", &accounts()).unwrap();
        assert!(session.require_auth(Role::Viewer).is_ok());
        assert!(session.require_auth(Role::Admin).is_ok());
    }

    #[test]
    fn logout_clears_the_session() {
        let mut session = Session::default();
        session.login("admin", "secret", &accounts()).unwrap();
        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), Role::Viewer);
        assert!(session.require_auth(Role::Viewer).is_err());
    }
}

use crate::errors::{AppError, AppResult};
use crate::models::Role;

pub const ADMIN_ACCOUNT: &str = "admin";
pub const USER_ACCOUNT: &str = "usuario";

/// Secrets of the two fixed accounts, supplied by process configuration.
/// An account without a secret cannot log in.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    admin: Option<String>,
    user: Option<String>,
}

impl Credentials {
    pub fn new(admin: Option<String>, user: Option<String>) -> Self {
        Self {
            admin: admin.filter(|s| !s.is_empty()),
            user: user.filter(|s| !s.is_empty()),
        }
    }

    /// Role granted to `username` when `password` matches its secret.
    pub fn role_for(&self, username: &str, password: &str) -> Option<Role> {
        let (secret, role) = match username {
            ADMIN_ACCOUNT => (self.admin.as_deref(), Role::Admin),
            USER_ACCOUNT => (self.user.as_deref(), Role::Editor),
            _ => return None,
        };

        match secret {
            Some(s) if s == password => Some(role),
            _ => None,
        }
    }
}

/// An authenticated session. Created at login, dropped at logout, and
/// passed explicitly to every operation that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
    pub role: Role,
    pub user: String,
}

impl Session {
    pub fn login(credentials: &Credentials, username: &str, password: &str) -> AppResult<Self> {
        match credentials.role_for(username, password) {
            Some(role) => {
                log::info!("user '{username}' logged in as {role}");
                Ok(Self {
                    authenticated: true,
                    role,
                    user: username.to_string(),
                })
            }
            None => {
                log::warn!("rejected login for '{username}'");
                Err(AppError::Auth("invalid username or password".into()))
            }
        }
    }

    pub fn is_admin(&self) -> bool {
        self.authenticated && self.role == Role::Admin
    }

    pub fn require_admin(&self, action: &str) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!(
                "{action} requires the admin role (connected as {})",
                self.role
            )))
        }
    }

    /// Banner shown at the top of every session.
    pub fn banner(&self) -> String {
        format!("Connected as: {}", self.role.as_str().to_uppercase())
    }

    pub fn logout(self) {
        log::info!("user '{}' logged out", self.user);
    }
}

//! Where the portal username and password come from.

use crate::error::{LsfError, Result};

/// Environment variable read for the username by default.
pub const DEFAULT_USERNAME_VAR: &str = "LOGIN";
/// Environment variable read for the password by default.
pub const DEFAULT_PASSWORD_VAR: &str = "PASSWORD";

/// Source of the login credential pair.
pub trait CredentialProvider: Send + Sync {
    fn username(&self) -> Result<String>;
    fn password(&self) -> Result<String>;
}

// ── EnvCredentials ────────────────────────────────────────────────────────────

/// Reads credentials from environment variables on every call.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    username_var: String,
    password_var: String,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(DEFAULT_USERNAME_VAR, DEFAULT_PASSWORD_VAR)
    }
}

impl EnvCredentials {
    pub fn new(username_var: impl Into<String>, password_var: impl Into<String>) -> Self {
        Self {
            username_var: username_var.into(),
            password_var: password_var.into(),
        }
    }

    fn read(var: &str) -> Result<String> {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => Ok(value),
            _ => Err(LsfError::MissingCredential(var.to_string())),
        }
    }
}

impl CredentialProvider for EnvCredentials {
    fn username(&self) -> Result<String> {
        Self::read(&self.username_var)
    }

    fn password(&self) -> Result<String> {
        Self::read(&self.password_var)
    }
}

// ── StaticCredentials ─────────────────────────────────────────────────────────

/// Fixed credential pair, mostly for tests.
#[derive(Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl CredentialProvider for StaticCredentials {
    fn username(&self) -> Result<String> {
        Ok(self.username.clone())
    }

    fn password(&self) -> Result<String> {
        Ok(self.password.clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_credentials() {
        let creds = StaticCredentials::new("alice", "s3cret");
        assert_eq!(creds.username().unwrap(), "alice");
        assert_eq!(creds.password().unwrap(), "s3cret");
    }

    #[test]
    fn test_static_credentials_debug_hides_password() {
        let creds = StaticCredentials::new("alice", "s3cret");
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("alice"));
        assert!(!dbg.contains("s3cret"));
    }

    #[test]
    fn test_env_credentials_reads_named_vars() {
        std::env::set_var("LSF_TEST_USER_A", "bob");
        std::env::set_var("LSF_TEST_PASS_A", "hunter2");

        let creds = EnvCredentials::new("LSF_TEST_USER_A", "LSF_TEST_PASS_A");
        assert_eq!(creds.username().unwrap(), "bob");
        assert_eq!(creds.password().unwrap(), "hunter2");

        std::env::remove_var("LSF_TEST_USER_A");
        std::env::remove_var("LSF_TEST_PASS_A");
    }

    #[test]
    fn test_env_credentials_missing_var() {
        std::env::remove_var("LSF_TEST_USER_B");
        let creds = EnvCredentials::new("LSF_TEST_USER_B", "LSF_TEST_PASS_B");
        let err = creds.username().unwrap_err();
        assert_eq!(err.to_string(), "Missing credential: LSF_TEST_USER_B");
    }

    #[test]
    fn test_env_credentials_empty_var_counts_as_missing() {
        std::env::set_var("LSF_TEST_PASS_C", "");
        let creds = EnvCredentials::new("LSF_TEST_USER_C", "LSF_TEST_PASS_C");
        assert!(matches!(
            creds.password().unwrap_err(),
            LsfError::MissingCredential(_)
        ));
        std::env::remove_var("LSF_TEST_PASS_C");
    }
}

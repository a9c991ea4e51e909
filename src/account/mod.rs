//! WordPress.org account verification.
//!
//! A username is accepted once its public profile page exists. The lookup
//! sits behind [`AccountDirectory`] so the check can be swapped out in
//! tests.
//!
//! # Example
//!
//! ```no_run
//! use wpready::account::{verify_account_identity, ProfileDirectory};
//!
//! let directory = ProfileDirectory::new().unwrap();
//! let username = verify_account_identity(&directory, "matt").unwrap();
//! println!("Verified {}", username);
//! ```

use std::sync::LazyLock;
use std::time::Duration;

use anyhow::{anyhow, Context};
use regex::Regex;

use crate::error::{ReadinessError, Result};

/// Public profile host.
pub const PROFILES_URL: &str = "https://profiles.wordpress.org";

/// Time allowed for a profile lookup.
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._@-]+$").unwrap());

/// Something that can tell whether a WordPress.org username exists.
pub trait AccountDirectory {
    /// `Ok(true)` if the account exists, `Ok(false)` if it definitely
    /// doesn't, `Err` if the answer couldn't be determined.
    fn exists(&self, username: &str) -> anyhow::Result<bool>;
}

/// Looks usernames up on profiles.wordpress.org.
pub struct ProfileDirectory {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ProfileDirectory {
    /// A directory backed by the public profiles site.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(PROFILES_URL)
    }

    /// A directory backed by another host.
    pub fn with_base_url(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .user_agent(concat!("wpready/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn profile_url(&self, username: &str) -> String {
        format!("{}/{}/", self.base_url, username)
    }
}

impl AccountDirectory for ProfileDirectory {
    fn exists(&self, username: &str) -> anyhow::Result<bool> {
        let url = self.profile_url(username);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        match response.status() {
            reqwest::StatusCode::OK => Ok(true),
            reqwest::StatusCode::NOT_FOUND => Ok(false),
            status => Err(anyhow!("HTTP {} fetching {}", status, url)),
        }
    }
}

/// Check that `username` names an existing WordPress.org account.
///
/// Returns the trimmed username on success; that is the value to save.
pub fn verify_account_identity(directory: &dyn AccountDirectory, username: &str) -> Result<String> {
    let username = username.trim();
    let fail = |message: String| ReadinessError::AccountVerificationFailed {
        username: username.to_string(),
        message,
    };

    if username.is_empty() {
        return Err(fail("Username is required".to_string()));
    }
    if !USERNAME.is_match(username) {
        return Err(fail("Username contains invalid characters".to_string()));
    }

    match directory.exists(username) {
        Ok(true) => {
            tracing::debug!("Verified WordPress.org account {}", username);
            Ok(username.to_string())
        }
        Ok(false) => Err(fail("Username not found on WordPress.org".to_string())),
        Err(e) => Err(fail(format!("{:#}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct FixedDirectory(anyhow::Result<bool>);

    impl AccountDirectory for FixedDirectory {
        fn exists(&self, _username: &str) -> anyhow::Result<bool> {
            match &self.0 {
                Ok(found) => Ok(*found),
                Err(e) => Err(anyhow!("{}", e)),
            }
        }
    }

    #[test]
    fn empty_username_is_required() {
        let err = verify_account_identity(&FixedDirectory(Ok(true)), "   ").unwrap_err();
        assert!(err.to_string().contains("Username is required"));
    }

    #[test]
    fn invalid_characters_are_rejected() {
        let err = verify_account_identity(&FixedDirectory(Ok(true)), "a/../b").unwrap_err();
        assert!(matches!(err, ReadinessError::AccountVerificationFailed { .. }));
    }

    #[test]
    fn existing_username_is_trimmed_and_returned() {
        let name = verify_account_identity(&FixedDirectory(Ok(true)), "  matt ").unwrap();
        assert_eq!(name, "matt");
    }

    #[test]
    fn missing_username_is_not_found() {
        let err = verify_account_identity(&FixedDirectory(Ok(false)), "nobody").unwrap_err();
        assert!(err.to_string().contains("Username not found on WordPress.org"));
    }

    #[test]
    fn lookup_failure_is_reported() {
        let err = verify_account_identity(&FixedDirectory(Err(anyhow!("timed out"))), "matt")
            .unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn profile_directory_finds_existing_profile() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/matt/");
            then.status(200).body("<html>profile</html>");
        });

        let directory = ProfileDirectory::with_base_url(&server.base_url()).unwrap();
        assert!(directory.exists("matt").unwrap());
        mock.assert();
    }

    #[test]
    fn profile_directory_404_is_missing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ghost/");
            then.status(404);
        });

        let directory = ProfileDirectory::with_base_url(&server.base_url()).unwrap();
        assert!(!directory.exists("ghost").unwrap());
    }

    #[test]
    fn profile_directory_server_error_is_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/matt/");
            then.status(503);
        });

        let directory = ProfileDirectory::with_base_url(&server.base_url()).unwrap();
        let err = directory.exists("matt").unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn verify_through_profile_directory() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ghost/");
            then.status(404);
        });

        let directory = ProfileDirectory::with_base_url(&server.base_url()).unwrap();
        let err = verify_account_identity(&directory, "ghost").unwrap_err();
        assert!(err.to_string().contains("Username not found"));
    }
}

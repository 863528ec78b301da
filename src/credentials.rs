// Credential store: the email and bearer token saved by
// `bobolink configure`, kept in an INI file under the bobolink home
// directory and read before every authenticated call.

use crate::error::{Error, Result};
use crate::transport::Auth;
use ini::{EscapePolicy, Ini, ParseOption};
use std::path::{Path, PathBuf};
use tracing::debug;

const SECTION: &str = "default";
const EMAIL_KEY: &str = "bobolink_email";
const TOKEN_KEY: &str = "bobolink_token";

// Values are stored verbatim: no quote stripping, no backslash escapes.
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

/// Identity used for every authenticated request. The token is sent as
/// the HTTP Basic password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub token: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, token: impl Into<String>) -> Self {
        Credentials {
            email: email.into(),
            token: token.into(),
        }
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth::basic(&self.email, &self.token)
    }
}

// Keep the token out of logs and panics.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("token", &"***")
            .finish()
    }
}

/// File-backed credential store.
#[derive(Clone, Debug)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store whose file is `<dir>/credentials`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        CredentialStore {
            path: dir.as_ref().join("credentials"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved credentials. Fails with `MissingCredentials` when
    /// nothing has been saved yet.
    pub fn load(&self) -> Result<Credentials> {
        if !self.path.exists() {
            return Err(Error::MissingCredentials(self.path.clone()));
        }
        let ini = Ini::load_from_file_opt(&self.path, parse_option())
            .map_err(|e| Error::CredentialStore(format!("{}: {}", self.path.display(), e)))?;

        let section = ini.section(Some(SECTION));
        let email = section.and_then(|s| s.get(EMAIL_KEY));
        let token = section.and_then(|s| s.get(TOKEN_KEY));
        match (email, token) {
            (Some(email), Some(token)) if !email.is_empty() && !token.is_empty() => {
                debug!(path = %self.path.display(), "loaded credentials");
                Ok(Credentials::new(email, token))
            }
            _ => Err(Error::MissingCredentials(self.path.clone())),
        }
    }

    /// Write `creds`, replacing any previous file.
    pub fn save(&self, creds: &Credentials) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| Error::CredentialStore(format!("{}: {}", dir.display(), e)))?;
        }

        let mut ini = Ini::new();
        ini.with_section(Some(SECTION))
            .set(EMAIL_KEY, creds.email.as_str())
            .set(TOKEN_KEY, creds.token.as_str());
        ini.write_to_file_policy(&self.path, EscapePolicy::Nothing)
            .map_err(|e| Error::CredentialStore(format!("{}: {}", self.path.display(), e)))?;

        debug!(path = %self.path.display(), "saved credentials");
        Ok(())
    }
}

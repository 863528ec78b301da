// API client module: one method per remote capability of the bookmark
// service. Request and response bodies are typed records; every call
// goes through the `Transport`, which owns error classification, so
// the methods here only pick the path, identity, body and decode mode.

use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::transport::{Auth, Transport, NO_BODY};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Bookmark field a search query is matched against.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchField {
    /// Text content of the indexed page.
    #[default]
    Content,
    /// The bookmark URL itself.
    Url,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Content => "content",
            SearchField::Url => "url",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "content" => Ok(SearchField::Content),
            "url" => Ok(SearchField::Url),
            other => Err(format!("unknown search field '{}'", other)),
        }
    }
}

/// User identifier as returned by the service. Some deployments send a
/// number, others a string; both are only used to build a path.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

/// Result of a user lookup. Fields other than `id` and `email` are ignored.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
}

/// One match from the full-text search. `content` carries `<b>...</b>`
/// markers around the matched terms.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct SearchHit {
    pub url: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Serialize, Debug)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `PUT users/account/password`. Without `new` and `token` the
/// service mails a reset token; with them it performs the reset.
#[derive(Serialize, Debug)]
pub struct ResetRequest<'a> {
    pub email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<&'a str>,
}

#[derive(Serialize, Debug)]
pub struct UrlsRequest<'a> {
    pub urls: &'a [String],
}

#[derive(Serialize, Debug)]
pub struct UserSearchRequest<'a> {
    pub email: &'a str,
}

#[derive(Serialize, Debug)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub field: SearchField,
}

/// Client for the bookmark service.
#[derive(Clone)]
pub struct ApiClient {
    transport: Transport,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(ApiClient {
            transport: Transport::new(config)?,
        })
    }

    /// Create an account. Returns the service's confirmation text.
    pub fn signup(&self, email: &str, password: &str) -> Result<String> {
        let body = SignupRequest { email, password };
        self.transport
            .text(Method::POST, "users", None, Some(&body))
    }

    /// Exchange email and password for a bearer token.
    pub fn get_token(&self, email: &str, password: &str) -> Result<String> {
        self.transport
            .text(Method::GET, "token", Some(Auth::basic(email, password)), NO_BODY)
    }

    /// Ask the service to mail a password reset token to `email`.
    pub fn send_reset_token(&self, email: &str) -> Result<String> {
        let body = ResetRequest {
            email,
            new: None,
            token: None,
        };
        self.transport
            .text(Method::PUT, "users/account/password", None, Some(&body))
    }

    /// Set a new password using a previously mailed reset token.
    pub fn reset_password(&self, email: &str, new_password: &str, token: &str) -> Result<String> {
        let body = ResetRequest {
            email,
            new: Some(new_password),
            token: Some(token),
        };
        self.transport
            .text(Method::PUT, "users/account/password", None, Some(&body))
    }

    /// Store bookmarks. Returns the URLs the service accepted.
    pub fn add_bookmarks(&self, creds: &Credentials, urls: &[String]) -> Result<Vec<String>> {
        self.transport.json(
            Method::POST,
            "bookmarks",
            Some(creds.auth()),
            Some(&UrlsRequest { urls }),
        )
    }

    /// Remove bookmarks. Returns the URLs the service deleted.
    pub fn delete_bookmarks(&self, creds: &Credentials, urls: &[String]) -> Result<Vec<String>> {
        self.transport.json(
            Method::DELETE,
            "bookmarks",
            Some(creds.auth()),
            Some(&UrlsRequest { urls }),
        )
    }

    /// Look up the user that owns `creds`.
    pub fn get_user_data(&self, creds: &Credentials) -> Result<User> {
        let body = UserSearchRequest { email: &creds.email };
        self.transport
            .json(Method::POST, "users/search", Some(creds.auth()), Some(&body))
    }

    /// Every bookmark URL stored for the user. Looks the user up first to
    /// learn its id; a failure in either request is the whole result.
    pub fn get_user_bookmarks(&self, creds: &Credentials) -> Result<Vec<String>> {
        let user = self.get_user_data(creds)?;
        debug!(user_id = %user.id, "listing bookmarks");
        let path = format!("users/{}/bookmarks", user.id);
        self.transport
            .json(Method::GET, &path, Some(creds.auth()), NO_BODY)
    }

    /// Full-text search over the user's bookmarks. `field` defaults to
    /// page content.
    pub fn search_bookmarks(
        &self,
        creds: &Credentials,
        query: &str,
        field: Option<SearchField>,
    ) -> Result<Vec<SearchHit>> {
        let body = SearchRequest {
            query,
            field: field.unwrap_or_default(),
        };
        self.transport
            .json(Method::POST, "bookmarks/search", Some(creds.auth()), Some(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_field_defaults_to_content() {
        let body = SearchRequest {
            query: "rust",
            field: SearchField::default(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"query": "rust", "field": "content"})
        );
    }

    #[test]
    fn search_field_parses_cli_values() {
        assert_eq!("url".parse::<SearchField>(), Ok(SearchField::Url));
        assert_eq!("content".parse::<SearchField>(), Ok(SearchField::Content));
        assert!("title".parse::<SearchField>().is_err());
    }

    #[test]
    fn reset_request_omits_absent_fields() {
        let send = ResetRequest {
            email: "a@b.c",
            new: None,
            token: None,
        };
        assert_eq!(serde_json::to_value(&send).unwrap(), json!({"email": "a@b.c"}));

        let reset = ResetRequest {
            email: "a@b.c",
            new: Some("hunter2"),
            token: Some("t0k"),
        };
        assert_eq!(
            serde_json::to_value(&reset).unwrap(),
            json!({"email": "a@b.c", "new": "hunter2", "token": "t0k"})
        );
    }

    #[test]
    fn user_id_accepts_number_or_string() {
        let user: User = serde_json::from_value(json!({"id": 7, "email": "a@b.c", "extra": true})).unwrap();
        assert_eq!(user.id.to_string(), "7");

        let user: User = serde_json::from_value(json!({"id": "5f2a"})).unwrap();
        assert_eq!(user.id, UserId::Text("5f2a".into()));
        assert_eq!(user.email, None);
    }

    #[test]
    fn user_without_id_is_rejected() {
        assert!(serde_json::from_value::<User>(json!({"email": "a@b.c"})).is_err());
    }
}

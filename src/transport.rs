// Transport module: one blocking reqwest client bound to the configured
// service root. Every request goes through `execute`, which turns the
// outcome into either the body text (2xx) or an `Error`.

use crate::config::Config;
use crate::error::{Error, Result};
use reqwest::blocking::Client;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// HTTP Basic identity attached to a request.
#[derive(Clone, Copy, Debug)]
pub struct Auth<'a> {
    pub username: &'a str,
    pub secret: &'a str,
}

impl<'a> Auth<'a> {
    pub fn basic(username: &'a str, secret: &'a str) -> Self {
        Auth { username, secret }
    }
}

/// Placeholder for calls that send no body.
pub const NO_BODY: Option<&()> = None;

/// Blocking HTTP transport. Does not retry.
#[derive(Clone)]
pub struct Transport {
    client: Client,
    config: Config,
}

impl Transport {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Transport {
            client,
            config: config.clone(),
        })
    }

    /// Perform the request and return the body as literal text.
    pub fn text<B>(
        &self,
        method: Method,
        path: &str,
        auth: Option<Auth<'_>>,
        body: Option<&B>,
    ) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, path, auth, body)
    }

    /// Perform the request and decode the body as JSON into `T`.
    pub fn json<T, B>(
        &self,
        method: Method,
        path: &str,
        auth: Option<Auth<'_>>,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.execute(method, path, auth, body)?;
        serde_json::from_str(&text).map_err(|e| Error::Malformed {
            reason: e.to_string(),
            body: text,
        })
    }

    fn execute<B>(
        &self,
        method: Method,
        path: &str,
        auth: Option<Auth<'_>>,
        body: Option<&B>,
    ) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(path);
        debug!(%method, %url, "sending request");

        let mut req = self.client.request(method.clone(), &url);
        if let Some(auth) = auth {
            req = req.basic_auth(auth.username, Some(auth.secret));
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send()?;
        let status = res.status();
        debug!(%method, %url, status = status.as_u16(), "received response");

        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            return Err(Error::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(res.text()?)
    }
}

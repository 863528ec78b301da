// Configuration module: everything the client reads from the environment
// is resolved once here and handed to the transport, so no other module
// looks at environment variables.

use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Service root used when `BOBO_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/v1/";

/// Request timeout used when `BOBO_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable per-process configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    timeout: Duration,
    home: Option<PathBuf>,
}

impl Config {
    /// Build a configuration for `base_url` with the default timeout.
    /// The URL is normalized to end with a single `/`.
    pub fn new(base_url: &str) -> Self {
        Config {
            base_url: normalize_base_url(base_url),
            timeout: DEFAULT_TIMEOUT,
            home: None,
        }
    }

    /// Resolve the configuration from `BOBO_URL`, `BOBO_TIMEOUT_SECS`
    /// and `BOBO_HOME`, falling back to the built-in defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `get`.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = get("BOBO_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let mut config = Config::new(&base_url);

        if let Some(raw) = get("BOBO_TIMEOUT_SECS") {
            match parse_timeout(&raw) {
                Some(timeout) => config.timeout = timeout,
                None => warn!(value = %raw, "ignoring invalid BOBO_TIMEOUT_SECS"),
            }
        }
        config.home = get("BOBO_HOME").map(PathBuf::from);
        config
    }

    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Directory holding the credentials file: `BOBO_HOME` when set,
    /// otherwise `~/.bobolink`.
    pub fn home_dir(&self) -> PathBuf {
        match &self.home {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".bobolink"),
        }
    }

    /// Absolute URL for a path relative to the service root.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> String {
    format!("{}/", raw.trim().trim_end_matches('/'))
}

fn parse_timeout(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = Config::new("http://example.com/v1");
        assert_eq!(config.base_url(), "http://example.com/v1/");
    }

    #[test]
    fn repeated_trailing_slashes_collapse() {
        let config = Config::new("http://example.com/v1//");
        assert_eq!(config.base_url(), "http://example.com/v1/");
    }

    #[test]
    fn endpoint_never_duplicates_separator() {
        let config = Config::new("http://example.com/v1/");
        assert_eq!(config.endpoint("users"), "http://example.com/v1/users");
        assert_eq!(config.endpoint("/token"), "http://example.com/v1/token");
        assert_eq!(
            config.endpoint("users/42/bookmarks"),
            "http://example.com/v1/users/42/bookmarks"
        );
    }

    #[test]
    fn timeout_must_be_positive_integer() {
        assert_eq!(parse_timeout("5"), Some(Duration::from_secs(5)));
        assert_eq!(parse_timeout(" 12 "), Some(Duration::from_secs(12)));
        assert_eq!(parse_timeout("0"), None);
        assert_eq!(parse_timeout("soon"), None);
    }

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn unset_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config, Config::new(DEFAULT_BASE_URL));
    }

    #[test]
    fn bobo_url_overrides_default() {
        let config = Config::from_lookup(lookup(&[("BOBO_URL", "https://bobo.example.org/api")]));
        assert_eq!(config.base_url(), "https://bobo.example.org/api/");
        assert_eq!(config.endpoint("token"), "https://bobo.example.org/api/token");
    }

    #[test]
    fn valid_timeout_is_applied() {
        let config = Config::from_lookup(lookup(&[("BOBO_TIMEOUT_SECS", "5")]));
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn invalid_or_zero_timeout_falls_back_to_default() {
        for raw in ["0", "-3", "soon", ""] {
            let config = Config::from_lookup(lookup(&[("BOBO_TIMEOUT_SECS", raw)]));
            assert_eq!(config.timeout(), DEFAULT_TIMEOUT, "value {:?}", raw);
        }
    }

    #[test]
    fn bobo_home_sets_credentials_dir() {
        let config = Config::from_lookup(lookup(&[("BOBO_HOME", "/srv/bobo")]));
        assert_eq!(config.home_dir(), PathBuf::from("/srv/bobo"));
    }

    #[test]
    fn explicit_home_overrides_default() {
        let config = Config::new(DEFAULT_BASE_URL).with_home("/tmp/bobo");
        assert_eq!(config.home_dir(), PathBuf::from("/tmp/bobo"));
    }
}

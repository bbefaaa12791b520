//! Proxy configuration.
//!
//! Values resolve with the precedence CLI flag > environment variable > default.
//! Environment lookups go through a closure so resolution can be tested without
//! touching the process environment.

mod error;


use std::env;
use std::fmt;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

pub use error::{ConfigError, ConfigResult};

use crate::paths::get_cache_dir;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_SUMMARY_LIMIT: usize = 40;
pub const DEFAULT_PORT: u16 = 3737;

/// Upstream GraphQL API flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    /// GitLab (`/api/graphql`, bearer token)
    Gitlab,
    /// Atlassian gateway (`/gateway/api/graphql`, basic auth)
    Atlassian,
    /// Any other GraphQL endpoint
    Custom,
}

impl Provider {
    /// Human readable API name used in tool descriptions.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Gitlab => "GitLab",
            Provider::Atlassian => "Atlassian",
            Provider::Custom => "GraphQL",
        }
    }

    /// Endpoint implied by the provider's own variables, if any.
    pub fn default_endpoint<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        match self {
            Provider::Gitlab => {
                let base = lookup("GITLAB_URL").unwrap_or_else(|| "https://gitlab.com".to_string());
                Some(format!("{}/api/graphql", base.trim_end_matches('/')))
            }
            Provider::Atlassian => lookup("ATLASSIAN_SITE").map(|site| {
                let site = site
                    .trim_start_matches("https://")
                    .trim_start_matches("http://")
                    .trim_end_matches('/');
                if site.contains('.') {
                    format!("https://{site}/gateway/api/graphql")
                } else {
                    format!("https://{site}.atlassian.net/gateway/api/graphql")
                }
            }),
            Provider::Custom => None,
        }
    }

    /// Provider named by `GQL_MCP_PROVIDER`, defaulting to GitLab.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup("GQL_MCP_PROVIDER").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Provider::from_str(raw.trim(), true).map_err(|_| ConfigError::InvalidValue {
                name: "GQL_MCP_PROVIDER".to_string(),
                value: raw.clone(),
            }),
            None => Ok(Provider::Gitlab),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Gitlab => "gitlab",
            Provider::Atlassian => "atlassian",
            Provider::Custom => "custom",
        };
        f.write_str(name)
    }
}

/// MCP transport the server speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    Stdio,
    /// Streamable HTTP mounted at `/mcp`
    Http,
}

/// How requests to the upstream authenticate.
#[derive(Clone, PartialEq, Eq)]
pub enum Auth {
    None,
    Bearer(String),
    Basic { username: String, password: String },
    Header { name: String, value: String },
}

// Credentials never show up in logs.
impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Auth::None => f.write_str("None"),
            Auth::Bearer(_) => f.write_str("Bearer(***)"),
            Auth::Basic { username, .. } => write!(f, "Basic({username}:***)"),
            Auth::Header { name, .. } => write!(f, "Header({name}: ***)"),
        }
    }
}

/// Upstream connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub endpoint: String,
    pub auth: Auth,
    pub timeout: Duration,
    pub user_agent: String,
}

/// Proxy configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub upstream: UpstreamConfig,
    pub transport: Transport,
    /// Host address to bind to (HTTP transport)
    pub host: IpAddr,
    /// Port to listen on (HTTP transport)
    pub port: u16,
    /// Schema cache directory, `None` disables the disk cache
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl: Duration,
    /// Hide `graphql_mutate`
    pub read_only: bool,
    /// Max root fields listed per tool description
    pub summary_limit: usize,
}

impl Config {
    /// Resolve configuration for `provider` from the process environment.
    pub fn from_env(provider: Provider) -> ConfigResult<Self> {
        Self::from_lookup(provider, |key| env::var(key).ok())
    }

    /// Resolve configuration for `provider` from an arbitrary lookup.
    pub fn from_lookup<F>(provider: Provider, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoint = lookup("GQL_MCP_ENDPOINT")
            .or_else(|| provider.default_endpoint(lookup))
            .unwrap_or_default();

        let auth = match provider {
            Provider::Gitlab => lookup("GITLAB_TOKEN").map_or(Auth::None, Auth::Bearer),
            Provider::Atlassian => match (lookup("ATLASSIAN_EMAIL"), lookup("ATLASSIAN_API_TOKEN")) {
                (Some(username), Some(password)) => Auth::Basic { username, password },
                _ => Auth::None,
            },
            Provider::Custom => match (lookup("GQL_MCP_TOKEN"), lookup("GQL_MCP_AUTH_HEADER")) {
                (Some(value), Some(name)) => Auth::Header { name, value },
                (Some(token), None) => Auth::Bearer(token),
                _ => Auth::None,
            },
        };

        let timeout = match lookup("GQL_MCP_TIMEOUT") {
            Some(raw) => Duration::from_secs(parse_number("GQL_MCP_TIMEOUT", &raw)?),
            None => DEFAULT_TIMEOUT,
        };

        let cache_ttl = match lookup("GQL_MCP_CACHE_TTL") {
            Some(raw) => Duration::from_secs(parse_number("GQL_MCP_CACHE_TTL", &raw)?),
            None => DEFAULT_CACHE_TTL,
        };

        let read_only = match lookup("GQL_MCP_READ_ONLY") {
            Some(raw) => parse_flag("GQL_MCP_READ_ONLY", &raw)?,
            None => false,
        };

        let transport = match lookup("GQL_MCP_TRANSPORT") {
            Some(raw) => Transport::from_str(raw.trim(), true).map_err(|_| ConfigError::InvalidValue {
                name: "GQL_MCP_TRANSPORT".to_string(),
                value: raw.clone(),
            })?,
            None => Transport::Stdio,
        };

        let port = match lookup("GQL_MCP_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "GQL_MCP_PORT".to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let cache_dir = lookup("GQL_MCP_CACHE_DIR")
            .map(PathBuf::from)
            .or_else(get_cache_dir);

        Ok(Self {
            provider,
            upstream: UpstreamConfig {
                endpoint,
                auth,
                timeout,
                user_agent: format!("gql-mcp/{}", env!("CARGO_PKG_VERSION")),
            },
            transport,
            host: IpAddr::from([127, 0, 0, 1]),
            port,
            cache_dir,
            cache_ttl,
            read_only,
            summary_limit: DEFAULT_SUMMARY_LIMIT,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.upstream.endpoint = endpoint.into();
        self
    }

    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_cache_dir(mut self, dir: PathBuf) -> Self {
        self.cache_dir = Some(dir);
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.cache_dir = None;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_summary_limit(mut self, limit: usize) -> Self {
        self.summary_limit = limit;
        self
    }

    /// Check that the resolved configuration can reach an upstream.
    pub fn validate(&self) -> ConfigResult<()> {
        let endpoint = self.upstream.endpoint.trim();
        if endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint {
                provider: self.provider.to_string(),
            });
        }

        let has_scheme = endpoint
            .strip_prefix("https://")
            .or_else(|| endpoint.strip_prefix("http://"))
            .is_some_and(|rest| !rest.is_empty());
        if !has_scheme {
            return Err(ConfigError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
            });
        }

        if self.provider == Provider::Atlassian && self.upstream.auth == Auth::None {
            return Err(ConfigError::MissingCredentials {
                provider: self.provider.to_string(),
                variables: "ATLASSIAN_EMAIL and ATLASSIAN_API_TOKEN".to_string(),
            });
        }

        if self.summary_limit == 0 {
            return Err(ConfigError::InvalidSummaryLimit);
        }

        Ok(())
    }
}

fn parse_number(name: &str, raw: &str) -> ConfigResult<u64> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

fn parse_flag(name: &str, raw: &str) -> ConfigResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

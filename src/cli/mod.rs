//! Command line interface for the `gql-mcp` binary.


use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::api;
use crate::config::{Config, ConfigResult, Provider, Transport};

#[derive(Parser, Debug)]
#[command(name = "gql-mcp")]
#[command(
    author,
    version,
    about = "MCP server that proxies GraphQL queries to GitLab, Atlassian, or any GraphQL API",
    long_about = None
)]
pub struct Cli {
    /// Upstream API flavour (default: GQL_MCP_PROVIDER env or gitlab)
    #[arg(long, value_enum)]
    pub provider: Option<Provider>,

    /// GraphQL endpoint URL (default: GQL_MCP_ENDPOINT env or the provider's endpoint)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// MCP transport (default: GQL_MCP_TRANSPORT env or stdio)
    #[arg(long, value_enum)]
    pub transport: Option<Transport>,

    /// Host address to bind to (http transport)
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (http transport, default: GQL_MCP_PORT env or 3737)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Schema cache directory (default: GQL_MCP_CACHE_DIR env or $XDG_CACHE_HOME/gql-mcp)
    #[arg(long, conflicts_with = "no_cache")]
    pub cache_dir: Option<PathBuf>,

    /// Always introspect; never read or write the schema cache
    #[arg(long)]
    pub no_cache: bool,

    /// Seconds a cached schema stays fresh (default: GQL_MCP_CACHE_TTL env or 86400)
    #[arg(long)]
    pub cache_ttl: Option<u64>,

    /// Hide the graphql_mutate tool
    #[arg(long)]
    pub read_only: bool,

    /// Max root fields listed in each tool description
    #[arg(long)]
    pub summary_limit: Option<usize>,
}

impl Cli {
    /// Resolve the configuration, letting flags override `lookup`.
    pub fn into_config_with<F>(self, lookup: F) -> ConfigResult<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = match self.provider {
            Some(provider) => provider,
            None => Provider::from_lookup(&lookup)?,
        };
        let mut config = Config::from_lookup(provider, &lookup)?;

        if let Some(endpoint) = self.endpoint {
            config = config.with_endpoint(endpoint);
        }
        if let Some(transport) = self.transport {
            config = config.with_transport(transport);
        }
        if let Some(host) = self.host {
            config = config.with_host(host);
        }
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if self.no_cache {
            config = config.without_cache();
        } else if let Some(dir) = self.cache_dir {
            config = config.with_cache_dir(dir);
        }
        if let Some(secs) = self.cache_ttl {
            config = config.with_cache_ttl(Duration::from_secs(secs));
        }
        if self.read_only {
            config = config.with_read_only(true);
        }
        if let Some(limit) = self.summary_limit {
            config = config.with_summary_limit(limit);
        }

        Ok(config)
    }

    /// Resolve the configuration against the process environment.
    pub fn into_config(self) -> ConfigResult<Config> {
        self.into_config_with(|key| std::env::var(key).ok())
    }
}

pub async fn run() -> miette::Result<()> {
    // reqwest is built without a bundled crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    let config = Cli::parse().into_config()?;
    api::run(config).await?;
    Ok(())
}

//! On-disk schema cache.
//!
//! Introspection results are stored per endpoint as JSON. A fresh entry skips
//! introspection entirely; a stale entry is only used when the upstream cannot
//! be introspected.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use super::client::Upstream;
use super::error::{GraphqlError, GraphqlResult};
use super::schema::{Schema, introspect};

/// A cached introspection result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedSchema {
    pub endpoint: String,
    pub fetched_at: DateTime<Utc>,
    pub schema: Schema,
}

impl CachedSchema {
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.fetched_at).to_std().unwrap_or_default()
    }
}

/// Where a loaded schema came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaSource {
    Fresh,
    Cached,
    Stale,
}

/// Schema cache rooted at `dir`; `None` disables persistence.
#[derive(Debug, Clone)]
pub struct SchemaCache {
    dir: Option<PathBuf>,
    ttl: Duration,
}

impl SchemaCache {
    pub fn new(dir: Option<PathBuf>, ttl: Duration) -> Self {
        Self { dir, ttl }
    }

    /// Cache file for an endpoint: first 16 hex chars of SHA-256(endpoint).
    pub fn path_for(&self, endpoint: &str) -> Option<PathBuf> {
        let digest = Sha256::digest(endpoint.as_bytes());
        let key: String = digest.iter().take(8).map(|b| format!("{b:02x}")).collect();
        self.dir.as_ref().map(|dir| dir.join(format!("{key}.json")))
    }

    /// Read the entry for `endpoint`, ignoring unreadable or foreign files.
    pub fn read(&self, endpoint: &str) -> Option<CachedSchema> {
        let path = self.path_for(endpoint)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read schema cache");
                return None;
            }
        };

        match serde_json::from_str::<CachedSchema>(&raw) {
            Ok(cached) if cached.endpoint == endpoint => Some(cached),
            Ok(cached) => {
                debug!(cached = %cached.endpoint, "schema cache belongs to another endpoint");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt schema cache");
                None
            }
        }
    }

    /// Persist `schema` for `endpoint` atomically. No-op without a cache dir.
    pub fn write(&self, endpoint: &str, schema: &Schema) -> GraphqlResult<()> {
        let Some(path) = self.path_for(endpoint) else {
            return Ok(());
        };
        let dir = path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(dir).map_err(cache_error)?;

        let entry = CachedSchemaRef {
            endpoint,
            fetched_at: Utc::now(),
            schema,
        };
        let json = serde_json::to_vec(&entry)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(cache_error)?;
        tmp.write_all(&json).map_err(cache_error)?;
        tmp.persist(&path).map_err(|e| cache_error(e.error))?;

        debug!(path = %path.display(), "schema cache written");
        Ok(())
    }

    /// Load the schema for `upstream`, introspecting when the cache is cold.
    pub async fn load_or_fetch<U: Upstream + ?Sized>(
        &self,
        upstream: &U,
    ) -> GraphqlResult<(Schema, SchemaSource)> {
        let endpoint = upstream.endpoint().to_string();
        let cached = self.read(&endpoint);

        if let Some(entry) = &cached {
            let age = entry.age(Utc::now());
            if age < self.ttl {
                info!(age_secs = age.as_secs(), "using cached schema");
                return Ok((entry.schema.clone(), SchemaSource::Cached));
            }
        }

        match introspect(upstream).await {
            Ok(schema) => {
                if let Err(e) = self.write(&endpoint, &schema) {
                    warn!(error = %e, "failed to write schema cache");
                }
                Ok((schema, SchemaSource::Fresh))
            }
            Err(e) => match cached {
                Some(entry) => {
                    warn!(
                        error = %e,
                        fetched_at = %entry.fetched_at,
                        "introspection failed, falling back to stale cached schema"
                    );
                    Ok((entry.schema, SchemaSource::Stale))
                }
                None => Err(e),
            },
        }
    }
}

#[derive(Serialize)]
struct CachedSchemaRef<'a> {
    endpoint: &'a str,
    fetched_at: DateTime<Utc>,
    schema: &'a Schema,
}

fn cache_error(e: std::io::Error) -> GraphqlError {
    GraphqlError::Cache {
        message: e.to_string(),
    }
}

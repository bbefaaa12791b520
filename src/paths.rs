//! Path resolution for gql-mcp directories.
//!
//! Provides XDG-compliant path resolution for the schema cache.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "gql-mcp";

/// Get XDG-compliant cache directory for gql-mcp.
///
/// # Returns
/// `$XDG_CACHE_HOME/gql-mcp`, falling back to `~/.cache/gql-mcp`.
/// `None` when neither `XDG_CACHE_HOME` nor `HOME` is set, which disables
/// the on-disk schema cache.
pub fn get_cache_dir() -> Option<PathBuf> {
    resolve_cache_dir(|key| env::var(key).ok())
}

/// Resolve the cache directory from an arbitrary variable lookup.
pub(crate) fn resolve_cache_dir<F>(lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let cache_home = lookup("XDG_CACHE_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            lookup("HOME")
                .filter(|v| !v.is_empty())
                .map(|home| PathBuf::from(home).join(".cache"))
        })?;

    Some(cache_home.join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_xdg_cache_home_wins() {
        let dir = resolve_cache_dir(lookup_from(&[
            ("XDG_CACHE_HOME", "/tmp/xdg"),
            ("HOME", "/home/someone"),
        ]));
        assert_eq!(dir, Some(PathBuf::from("/tmp/xdg/gql-mcp")));
    }

    #[test]
    fn test_falls_back_to_home_cache() {
        let dir = resolve_cache_dir(lookup_from(&[("HOME", "/home/someone")]));
        assert_eq!(dir, Some(PathBuf::from("/home/someone/.cache/gql-mcp")));
    }

    #[test]
    fn test_no_home_disables_cache() {
        assert_eq!(resolve_cache_dir(lookup_from(&[])), None);
    }
}

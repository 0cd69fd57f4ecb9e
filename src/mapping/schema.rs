//! Mapping file schema and lookup.
//!
//! The YAML layout is a single `mapping` key holding host names, each of
//! which holds a `path: target` table. Both levels accept a YAML null so that
//! `mapping:` and `somehost:` with nothing under them deserialize as empty
//! tables and are rejected or accepted by validation, not by serde.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Path that acts as the catch-all entry for a host.
pub const WILDCARD_ROOT: &str = "/";

/// One `path → target` rule of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingEntry<'a> {
    pub path: &'a str,
    pub target: &'a str,
}

/// Path to redirect-target table of a single host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "Option<BTreeMap<String, String>>", into = "BTreeMap<String, String>")]
pub struct Mapping {
    entries: BTreeMap<String, String>,
}

impl Mapping {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Entries in path order.
    pub fn entries(&self) -> impl Iterator<Item = MappingEntry<'_>> {
        self.entries.iter().map(|(path, target)| MappingEntry {
            path: path.as_str(),
            target: target.as_str(),
        })
    }

    /// Exact-match target for `path`.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Exact match first, then the wildcard root.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        self.get(path).or_else(|| self.get(WILDCARD_ROOT))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Option<BTreeMap<String, String>>> for Mapping {
    fn from(entries: Option<BTreeMap<String, String>>) -> Self {
        Self::new(entries.unwrap_or_default())
    }
}

impl From<Mapping> for BTreeMap<String, String> {
    fn from(mapping: Mapping) -> Self {
        mapping.entries
    }
}

impl<P, T> FromIterator<(P, T)> for Mapping
where
    P: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(path, target)| (path.into(), target.into()))
                .collect(),
        )
    }
}

/// Root of a mapping file: host name to [`Mapping`].
///
/// Values handed out by [`crate::mapping::parse`] are already validated and
/// expose no way to mutate them, so a single instance can be shared between
/// threads and read without locking. Tables only come from the loader:
///
/// ```compile_fail
/// use https_redirect::mapping::{Mapping, MappingsFile};
/// let _: MappingsFile = [("localhost", Mapping::default())].into_iter().collect();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MappingsFile {
    #[serde(default, deserialize_with = "null_as_default")]
    mapping: BTreeMap<String, Mapping>,
}

impl MappingsFile {
    /// Hosts in name order.
    pub fn hosts(&self) -> impl Iterator<Item = (&str, &Mapping)> {
        self.mapping.iter().map(|(host, mapping)| (host.as_str(), mapping))
    }

    pub fn host(&self, host: &str) -> Option<&Mapping> {
        self.mapping.get(host)
    }

    /// Number of hosts.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Total number of path entries across all hosts.
    pub fn entry_count(&self) -> usize {
        self.mapping.values().map(Mapping::len).sum()
    }

    /// Resolve `(host, path)` to a redirect target.
    ///
    /// An exact path entry wins; otherwise the host's `/` entry is used.
    /// Unknown hosts, and hosts with neither, yield `None`.
    pub fn lookup(&self, host: &str, path: &str) -> Option<&str> {
        self.host(host)?.resolve(path)
    }

    /// Same as [`lookup`](Self::lookup) with `""` standing in for "no redirect".
    pub fn get_redirect_uri(&self, host: &str, path: &str) -> &str {
        self.lookup(host, path).unwrap_or_default()
    }
}

#[cfg(test)]
impl<H: Into<String>> FromIterator<(H, Mapping)> for MappingsFile {
    fn from_iter<I: IntoIterator<Item = (H, Mapping)>>(iter: I) -> Self {
        Self {
            mapping: iter
                .into_iter()
                .map(|(host, mapping)| (host.into(), mapping))
                .collect(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

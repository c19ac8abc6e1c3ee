//! Core types for snapshots: digest keys, scheme-tagged digest values and digest maps.

use crate::error::DigestError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of one digested artifact.
///
/// A filesystem path for files and symlinks, or a composite key for archive members:
/// `<archive>#namelist`, `<archive>#<entry>#date_time` or `<archive>#<entry>`.
pub type DigestKey = String;

/// Separator between an archive path and its member-level suffix.
pub const ARCHIVE_KEY_SEPARATOR: char = '#';

const SHA256_SCHEME: &str = "sha256";
const SYMLINK_SCHEME: &str = "symlink";

/// Scheme-tagged digest value
///
/// The scheme is part of the value so a symlink can never compare equal to a
/// regular file's content hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DigestValue {
    /// Lowercase hex SHA-256 digest
    Sha256(String),
    /// Unresolved symbolic link target
    Symlink(String),
}

impl DigestValue {
    /// Scheme tag of this value (`sha256` or `symlink`)
    pub fn scheme(&self) -> &'static str {
        match self {
            DigestValue::Sha256(_) => SHA256_SCHEME,
            DigestValue::Symlink(_) => SYMLINK_SCHEME,
        }
    }

    /// Payload without the scheme tag
    pub fn payload(&self) -> &str {
        match self {
            DigestValue::Sha256(hex) => hex,
            DigestValue::Symlink(target) => target,
        }
    }
}

impl fmt::Display for DigestValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.scheme(), self.payload())
    }
}

/// Error returned when parsing a digest value with a missing or unknown scheme
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid digest value: {0}")]
pub struct ParseDigestValueError(pub String);

impl FromStr for DigestValue {
    type Err = ParseDigestValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((SHA256_SCHEME, hex)) => Ok(DigestValue::Sha256(hex.to_string())),
            Some((SYMLINK_SCHEME, target)) => Ok(DigestValue::Symlink(target.to_string())),
            _ => Err(ParseDigestValueError(s.to_string())),
        }
    }
}

impl Serialize for DigestValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DigestValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Mapping from digest key to digest value for one snapshot
///
/// Iteration is in ascending key order. A map is built once per snapshot and
/// only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigestMap {
    entries: BTreeMap<DigestKey, DigestValue>,
}

impl DigestMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a leaf digest.
    ///
    /// The same path reached twice (e.g. listed both directly and through its
    /// parent directory) digests the same leaf, so the later value replaces the earlier one.
    pub fn insert_leaf(&mut self, key: impl Into<DigestKey>, value: DigestValue) {
        self.entries.insert(key.into(), value);
    }

    /// Add every key of `other` to this map.
    ///
    /// Overlaid keys are strict additions: a key already present is a
    /// [`DigestError::KeyCollision`] and leaves `self` untouched.
    pub fn overlay(&mut self, other: DigestMap) -> Result<(), DigestError> {
        if let Some(key) = other.entries.keys().find(|k| self.entries.contains_key(*k)) {
            return Err(DigestError::KeyCollision { key: key.clone() });
        }
        self.entries.extend(other.entries);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&DigestValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &DigestKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DigestKey, &DigestValue)> {
        self.entries.iter()
    }
}

impl FromIterator<(DigestKey, DigestValue)> for DigestMap {
    fn from_iter<I: IntoIterator<Item = (DigestKey, DigestValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DigestMap {
    type Item = (DigestKey, DigestValue);
    type IntoIter = std::collections::btree_map::IntoIter<DigestKey, DigestValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

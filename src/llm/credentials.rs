use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ConfigurationError;

/// An opaque API credential. Never prints its secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for placing on the wire only
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Short redacted form safe for logs
    pub fn fingerprint(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", self.fingerprint())
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fingerprint())
    }
}

/// Split a comma-delimited credential list, dropping blank entries
pub fn parse_credential_list(raw: &str) -> Vec<Credential> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(Credential::new)
        .collect()
}

/// Round-robin pool of interchangeable credentials
///
/// The n-th call to [`CredentialRotator::acquire`] over the lifetime of the
/// rotator returns `pool[n % pool.len()]`, however many tasks call it
/// concurrently. The cursor is advanced with a single compare-and-swap, so no
/// two callers can observe the same position.
#[derive(Debug)]
pub struct CredentialRotator {
    pool: Vec<Credential>,
    cursor: AtomicUsize,
}

impl CredentialRotator {
    pub fn new(pool: Vec<Credential>) -> Result<Self, ConfigurationError> {
        if pool.is_empty() {
            return Err(ConfigurationError::EmptyCredentialPool);
        }
        Ok(Self {
            pool,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Build from configuration values. The list form wins when it holds at
    /// least one credential; otherwise the single credential is used.
    pub fn from_config(list: Option<&str>, single: Option<&str>) -> Result<Self, ConfigurationError> {
        let mut pool = list.map(parse_credential_list).unwrap_or_default();
        if pool.is_empty() {
            pool = single.map(parse_credential_list).unwrap_or_default();
        }
        Self::new(pool)
    }

    /// Advance the cursor and return the position it held
    pub fn next_index(&self) -> usize {
        let len = self.pool.len();
        self.cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| Some((i + 1) % len))
            .unwrap_or_else(|current| current)
    }

    pub fn acquire(&self) -> Credential {
        self.pool[self.next_index()].clone()
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Redacted fingerprints of the pool, in rotation order
    pub fn fingerprints(&self) -> Vec<String> {
        self.pool.iter().map(|c| c.fingerprint()).collect()
    }
}

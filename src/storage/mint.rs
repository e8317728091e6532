//! Identifier minting
//!
//! Identifiers are `<namespace>n<digits>`. Because nothing is written to the
//! store during a run, the minter also remembers what it has already handed
//! out so two composite entities never share an identifier.

use super::traits::{StorageError, StorageResult};
use crate::graph::Iri;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Attempts before giving up on finding an unused identifier
const MAX_ATTEMPTS: usize = 1000;

/// Upper bound (exclusive) for random identifier numbers
const RANDOM_SPACE: u128 = 10_000_000_000;

/// How candidate identifiers are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MintStrategy {
    /// `n1`, `n2`, ...; reproducible, used by snapshot stores
    Sequential,
    /// Random numbers, for shared live stores
    #[default]
    Random,
}

#[derive(Debug)]
pub struct IdentifierMinter {
    namespace: String,
    strategy: MintStrategy,
    counter: AtomicU64,
    issued: Mutex<HashSet<Iri>>,
}

impl IdentifierMinter {
    pub fn new(namespace: impl Into<String>, strategy: MintStrategy) -> Self {
        Self {
            namespace: namespace.into(),
            strategy,
            counter: AtomicU64::new(0),
            issued: Mutex::new(HashSet::new()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Mint an identifier that `in_use` reports as unused and that was not issued before.
    pub fn mint(&self, in_use: impl Fn(&Iri) -> StorageResult<bool>) -> StorageResult<Iri> {
        for _ in 0..MAX_ATTEMPTS {
            let candidate = Iri::new(format!("{}n{}", self.namespace, self.next_number()));
            if self.issued.lock().unwrap().contains(&candidate) {
                continue;
            }
            if in_use(&candidate)? {
                continue;
            }
            self.issued.lock().unwrap().insert(candidate.clone());
            debug!(iri = %candidate, "minted identifier");
            return Ok(candidate);
        }
        Err(StorageError::MintExhausted(MAX_ATTEMPTS))
    }

    /// Number of identifiers issued so far
    pub fn issued_count(&self) -> usize {
        self.issued.lock().unwrap().len()
    }

    fn next_number(&self) -> u128 {
        match self.strategy {
            MintStrategy::Sequential => u128::from(self.counter.fetch_add(1, Ordering::SeqCst) + 1),
            MintStrategy::Random => uuid::Uuid::new_v4().as_u128() % RANDOM_SPACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://vivo.ufl.edu/individual/";

    #[test]
    fn sequential_minting_is_reproducible() {
        let minter = IdentifierMinter::new(NS, MintStrategy::Sequential);
        let a = minter.mint(|_| Ok(false)).unwrap();
        let b = minter.mint(|_| Ok(false)).unwrap();
        assert_eq!(a.as_str(), "http://vivo.ufl.edu/individual/n1");
        assert_eq!(b.as_str(), "http://vivo.ufl.edu/individual/n2");
    }

    #[test]
    fn skips_identifiers_in_use() {
        let minter = IdentifierMinter::new(NS, MintStrategy::Sequential);
        let taken = Iri::new(format!("{}n1", NS));
        let minted = minter.mint(|iri| Ok(*iri == taken)).unwrap();
        assert_eq!(minted.as_str(), "http://vivo.ufl.edu/individual/n2");
    }

    #[test]
    fn random_minting_never_repeats_within_a_run() {
        let minter = IdentifierMinter::new(NS, MintStrategy::Random);
        let mut seen = HashSet::new();
        for _ in 0..200 {
            assert!(seen.insert(minter.mint(|_| Ok(false)).unwrap()));
        }
        assert_eq!(minter.issued_count(), 200);
    }

    #[test]
    fn gives_up_when_everything_is_taken() {
        let minter = IdentifierMinter::new(NS, MintStrategy::Sequential);
        let result = minter.mint(|_| Ok(true));
        assert!(matches!(result, Err(StorageError::MintExhausted(MAX_ATTEMPTS))));
    }

    #[test]
    fn propagates_lookup_failures() {
        let minter = IdentifierMinter::new(NS, MintStrategy::Sequential);
        let result = minter.mint(|_| Err(StorageError::InvalidResponse("down".into())));
        assert!(matches!(result, Err(StorageError::InvalidResponse(_))));
        assert_eq!(minter.issued_count(), 0);
    }
}

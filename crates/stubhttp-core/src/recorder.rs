//! Request history for registered endpoints.
//!
//! [`Recorder`] is a cloneable handle: the test keeps one clone for assertions
//! while the server records into another. All clones share one store guarded
//! by a single mutex, so a hit becomes visible with its headers, body and count
//! at once.

use crate::types::procedure::Headers;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Identity of an endpoint: exact method and path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EndpointKey {
    pub method: String,
    pub path: String,
}

impl EndpointKey {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for EndpointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// One observed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedHit {
    pub method: String,
    pub path: String,
    /// Request headers as received
    pub headers: Headers,
    /// Raw request body
    pub body: Vec<u8>,
}

/// Errors returned by [`Recorder::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecorderError {
    /// A thread panicked while holding the store lock
    #[error("recorder store is poisoned")]
    Poisoned,
}

type Store = HashMap<EndpointKey, Vec<RecordedHit>>;

/// Concurrency-safe store of request history keyed by endpoint.
#[derive(Clone, Default)]
pub struct Recorder {
    store: Arc<Mutex<Store>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the store for reads and appends.
    ///
    /// Appends are single `push` calls, so a poisoned store still holds whole
    /// hits and stays readable.
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a hit for `(method, path)`, creating the endpoint history if absent.
    pub fn record(&self, method: &str, path: &str, headers: Headers, body: Vec<u8>) {
        let hit = RecordedHit {
            method: method.to_owned(),
            path: path.to_owned(),
            headers,
            body,
        };
        self.lock()
            .entry(EndpointKey::new(method, path))
            .or_default()
            .push(hit);
    }

    /// Number of recorded hits, 0 when the endpoint was never hit.
    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.lock()
            .get(&EndpointKey::new(method, path))
            .map_or(0, Vec::len)
    }

    /// Header snapshot of every hit, in arrival order.
    pub fn headers(&self, method: &str, path: &str) -> Vec<Headers> {
        self.with_hits(method, path, |hit| hit.headers.clone())
    }

    /// Body snapshot of every hit, in arrival order.
    pub fn body(&self, method: &str, path: &str) -> Vec<Vec<u8>> {
        self.with_hits(method, path, |hit| hit.body.clone())
    }

    /// Full copies of every hit, in arrival order.
    pub fn requests(&self, method: &str, path: &str) -> Vec<RecordedHit> {
        self.with_hits(method, path, RecordedHit::clone)
    }

    /// Hits across all endpoints.
    pub fn total_hits(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    /// Endpoints with at least one hit, sorted by method then path.
    pub fn endpoints(&self) -> Vec<EndpointKey> {
        let mut keys: Vec<EndpointKey> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Drop the history of every endpoint.
    ///
    /// Callers are expected not to reset while requests are in flight.
    pub fn reset(&self) -> Result<(), RecorderError> {
        let mut store = self.store.lock().map_err(|_| RecorderError::Poisoned)?;
        store.clear();
        Ok(())
    }

    fn with_hits<T>(&self, method: &str, path: &str, f: impl FnMut(&RecordedHit) -> T) -> Vec<T> {
        self.lock()
            .get(&EndpointKey::new(method, path))
            .map(|hits| hits.iter().map(f).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("endpoints", &self.endpoints())
            .field("total_hits", &self.total_hits())
            .finish()
    }
}

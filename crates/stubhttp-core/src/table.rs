//! Procedure table for exact `(method, path)` lookup.
//!
//! The table is built once from an ordered list of procedures and is read-only
//! afterwards. When the same `(method, path)` is registered more than once the
//! first registration wins and later ones are ignored.

use crate::recorder::EndpointKey;
use crate::types::procedure::{Procedure, ProcedureError, ResponseTemplate};
use std::collections::HashMap;

/// Immutable map of registered procedures.
#[derive(Debug, Clone, Default)]
pub struct ProcedureTable {
    procedures: HashMap<EndpointKey, ResponseTemplate>,
}

impl ProcedureTable {
    /// Build a table from procedures in registration order.
    ///
    /// Every procedure is validated; the first invalid one aborts construction.
    pub fn new(procedures: impl IntoIterator<Item = Procedure>) -> Result<Self, ProcedureError> {
        let mut table = HashMap::new();

        for procedure in procedures {
            procedure.validate()?;

            let key = EndpointKey::new(procedure.method, procedure.path);
            if table.contains_key(&key) {
                tracing::warn!(
                    method = %key.method,
                    path = %key.path,
                    "Duplicate procedure ignored, first registration wins"
                );
                continue;
            }
            table.insert(key, procedure.response);
        }

        tracing::debug!(procedures = table.len(), "Procedure table built");
        Ok(Self { procedures: table })
    }

    /// Find the response registered for exactly this method and path.
    pub fn lookup(&self, method: &str, path: &str) -> Option<&ResponseTemplate> {
        self.procedures.get(&EndpointKey::new(method, path))
    }

    pub fn contains(&self, method: &str, path: &str) -> bool {
        self.lookup(method, path).is_some()
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

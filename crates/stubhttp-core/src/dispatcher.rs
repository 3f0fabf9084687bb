//! Per-request matching and recording.
//!
//! [`Dispatcher`] knows nothing about sockets: the server adapts its HTTP
//! request into an [`IncomingRequest`] and writes the returned [`Reply`].

use crate::recorder::Recorder;
use crate::table::ProcedureTable;
use crate::types::procedure::Headers;

/// Status written for requests without a registered procedure.
pub const NOT_FOUND: u16 = 404;

/// A fully buffered inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingRequest {
    /// HTTP method as received
    pub method: String,
    /// Request target (path, optionally with query string)
    pub target: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: Vec<u8>,
}

/// Response to write back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl Reply {
    pub fn not_found() -> Self {
        Self {
            status: NOT_FOUND,
            headers: Headers::new(),
            body: Vec::new(),
        }
    }
}

/// Matches requests against a [`ProcedureTable`] and records hits.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: ProcedureTable,
    recorder: Recorder,
}

impl Dispatcher {
    pub fn new(table: ProcedureTable, recorder: Recorder) -> Self {
        Self { table, recorder }
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    pub fn table(&self) -> &ProcedureTable {
        &self.table
    }

    /// Handle one request.
    ///
    /// Matched requests are recorded and answered with the registered template.
    /// Anything else gets an empty `404` and leaves the recorder untouched.
    pub fn dispatch(&self, request: IncomingRequest) -> Reply {
        let path = request_path(&request.target);

        let Some(template) = self.table.lookup(&request.method, path) else {
            tracing::debug!(method = %request.method, path = %path, "No procedure registered");
            return Reply::not_found();
        };

        self.recorder
            .record(&request.method, path, request.headers, request.body);

        let status = template.status_code();
        tracing::debug!(method = %request.method, path = %path, status, "Procedure matched");

        Reply {
            status,
            headers: template.headers.clone(),
            body: template.body.clone(),
        }
    }
}

/// Strip query string and fragment from a request target.
pub fn request_path(target: &str) -> &str {
    let end = target.find(['?', '#']).unwrap_or(target.len());
    &target[..end]
}

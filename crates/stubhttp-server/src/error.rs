//! Errors surfaced by the mock server lifecycle.

use std::io;
use std::net::SocketAddr;
use stubhttp_core::ProcedureError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum ServerError {
    /// A procedure failed validation while building the table
    #[error("invalid procedure: {0}")]
    InvalidProcedure(#[from] ProcedureError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to resolve listener address: {0}")]
    LocalAddr(#[source] io::Error),
    /// The listener failed before `stop` was called
    #[error("server stopped with error: {0}")]
    Serve(#[source] io::Error),
    #[error("server task failed: {0}")]
    Join(#[from] JoinError),
}

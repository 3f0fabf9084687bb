//! Core library for the stubhttp mock server.
//!
//! The engine is transport-free:
//! - [`ProcedureTable`]: immutable `(method, path)` to response template lookup
//! - [`Recorder`]: shared store of every request that hit a registered procedure
//! - [`Dispatcher`]: matches one request, records it and builds the reply
//!
//! The HTTP listener lives in the `stubhttp-server` crate.

pub mod config;
pub mod dispatcher;
pub mod matching;
pub mod recorder;
pub mod table;
pub mod types;

pub use dispatcher::{Dispatcher, IncomingRequest, Reply};
pub use recorder::{EndpointKey, RecordedHit, Recorder, RecorderError};
pub use table::ProcedureTable;
pub use types::procedure::{Headers, Procedure, ProcedureError, ResponseTemplate};

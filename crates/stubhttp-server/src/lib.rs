//! In-process mock HTTP server for tests.
//!
//! Register procedures, start a [`MockServer`] on an ephemeral port, point the
//! code under test at [`MockServer::url`] and assert on the shared [`Recorder`].
//!
//! ```no_run
//! use stubhttp_server::{MockServer, Procedure, Recorder, ResponseTemplate};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let recorder = Recorder::new();
//! let server = MockServer::start(
//!     &recorder,
//!     vec![Procedure::new("GET", "/").respond_with(ResponseTemplate::new().with_body("getRoot"))],
//! )
//! .await?;
//!
//! // ... issue requests against server.url_for("/") ...
//!
//! assert_eq!(recorder.hits("GET", "/"), 0);
//! server.stop().await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod handler;
pub mod logging;
mod server;

pub use error::ServerError;
pub use server::{MockServer, MockServerBuilder};
pub use stubhttp_core::{
    config::load_procedures,
    matching::{headers_equal, headers_include},
    Headers, Procedure, ProcedureError, RecordedHit, Recorder, RecorderError, ResponseTemplate,
};

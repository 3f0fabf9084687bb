//! Mock server lifecycle.
//!
//! The server owns a tokio listener on an ephemeral local port and serves the
//! dispatcher in a background task. [`MockServer::stop`] shuts it down and
//! reports serving failures; dropping the server releases the listener too,
//! so a panicking test never leaks it.

use crate::error::ServerError;
use crate::handler;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use stubhttp_core::{Dispatcher, Procedure, ProcedureTable, Recorder};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A running mock server.
#[derive(Debug)]
pub struct MockServer {
    address: SocketAddr,
    recorder: Recorder,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

impl MockServer {
    /// Start a server on `127.0.0.1` with a random port.
    ///
    /// Every matched request is recorded into `recorder`.
    ///
    /// # Errors
    /// Returns error if a procedure is invalid or the listener cannot be bound.
    pub async fn start(
        recorder: &Recorder,
        procedures: impl IntoIterator<Item = Procedure>,
    ) -> Result<Self, ServerError> {
        Self::builder()
            .recorder(recorder.clone())
            .procedures(procedures)
            .start()
            .await
    }

    pub fn builder() -> MockServerBuilder {
        MockServerBuilder::default()
    }

    /// Base URL, e.g. `http://127.0.0.1:41234`.
    pub fn url(&self) -> String {
        format!("http://{}", self.address)
    }

    /// Base URL joined with a path (and optional query string).
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.url(), path)
    }

    pub fn address(&self) -> SocketAddr {
        self.address
    }

    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Stop accepting requests and wait for the serving task to finish.
    ///
    /// # Errors
    /// Returns error if the listener failed while serving or the task panicked.
    pub async fn stop(mut self) -> Result<(), ServerError> {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            task.await?.map_err(ServerError::Serve)?;
        }
        tracing::info!(address = %self.address, "Mock server stopped");
        Ok(())
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!(address = %self.address, "Mock server dropped without stop");
        }
    }
}

/// Builder for [`MockServer`].
#[derive(Debug)]
pub struct MockServerBuilder {
    procedures: Vec<Procedure>,
    recorder: Recorder,
    address: SocketAddr,
}

impl Default for MockServerBuilder {
    fn default() -> Self {
        Self {
            procedures: Vec::new(),
            recorder: Recorder::new(),
            address: SocketAddr::from((Ipv4Addr::LOCALHOST, 0)),
        }
    }
}

impl MockServerBuilder {
    /// Register one procedure after the ones already added.
    pub fn procedure(mut self, procedure: Procedure) -> Self {
        self.procedures.push(procedure);
        self
    }

    pub fn procedures(mut self, procedures: impl IntoIterator<Item = Procedure>) -> Self {
        self.procedures.extend(procedures);
        self
    }

    /// Record into a shared recorder instead of a fresh one.
    pub fn recorder(mut self, recorder: Recorder) -> Self {
        self.recorder = recorder;
        self
    }

    /// Listen on a specific address. Port `0` picks a free port.
    pub fn listen_on(mut self, address: SocketAddr) -> Self {
        self.address = address;
        self
    }

    /// Build the procedure table, bind the listener and start serving.
    pub async fn start(self) -> Result<MockServer, ServerError> {
        let table = ProcedureTable::new(self.procedures)?;
        let procedures = table.len();

        let listener = TcpListener::bind(self.address)
            .await
            .map_err(|source| ServerError::Bind {
                address: self.address,
                source,
            })?;
        let address = listener.local_addr().map_err(ServerError::LocalAddr)?;

        let app = handler::router(Arc::new(Dispatcher::new(table, self.recorder.clone())));
        let (shutdown, signal) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = signal.await;
                })
                .await
        });

        tracing::info!(address = %address, procedures, "Mock server started");

        Ok(MockServer {
            address,
            recorder: self.recorder,
            shutdown: Some(shutdown),
            task: Some(task),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stubhttp_core::{ProcedureError, ResponseTemplate};

    #[rstest]
    #[tokio::test]
    async fn test_start_binds_ephemeral_port() {
        let server = MockServer::start(&Recorder::new(), Vec::new()).await.unwrap();

        assert!(server.address().ip().is_loopback());
        assert_ne!(server.address().port(), 0);
        assert_eq!(server.url(), format!("http://{}", server.address()));
        assert_eq!(server.url_for("/a?b=c"), format!("{}/a?b=c", server.url()));

        server.stop().await.unwrap();
    }

    #[rstest]
    #[tokio::test]
    async fn test_invalid_procedure_fails_start() {
        let result = MockServer::builder()
            .procedure(Procedure::new("GET", "missing-slash"))
            .start()
            .await;

        assert!(matches!(
            result.unwrap_err(),
            ServerError::InvalidProcedure(ProcedureError::InvalidPath { .. })
        ));
    }

    #[rstest]
    #[case::informational_status(ResponseTemplate::new().with_status(100))]
    #[case::control_byte_in_header(ResponseTemplate::new().with_header("x-name", "a\u{1}b"))]
    #[case::delete_byte_in_header(ResponseTemplate::new().with_header("x-name", "a\u{7f}"))]
    #[tokio::test]
    async fn test_unsendable_template_fails_start(#[case] template: ResponseTemplate) {
        let recorder = Recorder::new();
        let result = MockServer::start(
            &recorder,
            vec![Procedure::new("GET", "/h").respond_with(template)],
        )
        .await;

        assert!(matches!(
            result.unwrap_err(),
            ServerError::InvalidProcedure(
                ProcedureError::InvalidStatus { .. } | ProcedureError::InvalidHeaderValue { .. }
            )
        ));
        assert_eq!(recorder.total_hits(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let first = MockServer::start(&Recorder::new(), Vec::new()).await.unwrap();
        let result = MockServer::builder()
            .listen_on(first.address())
            .start()
            .await;

        assert!(matches!(result.unwrap_err(), ServerError::Bind { .. }));
        first.stop().await.unwrap();
    }

    #[rstest]
    #[tokio::test]
    async fn test_stop_releases_listener() {
        let server = MockServer::start(&Recorder::new(), Vec::new()).await.unwrap();
        let address = server.address();
        server.stop().await.unwrap();

        let rebound = MockServer::builder().listen_on(address).start().await;
        assert!(rebound.is_ok());
    }
}

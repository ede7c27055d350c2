use settings_headers_crypto::{DecryptionGateway, Decryptor};
use settings_headers_model::Server;
use settings_headers_telemetry::{log_request_received, log_request_rewritten};

use crate::error::HeaderDecryptionError;
use crate::rewriter::HeaderRewriter;

/// The request a build is about to execute with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionRequest {
    servers: Vec<Server>,
}

impl ExecutionRequest {
    /// Create a request over the given server entries.
    pub fn new(servers: Vec<Server>) -> Self {
        Self { servers }
    }

    /// Server entries the build will connect with.
    pub fn servers(&self) -> &[Server] {
        &self.servers
    }

    /// Replace the server entries.
    pub fn set_servers(&mut self, servers: Vec<Server>) {
        self.servers = servers;
    }
}

/// Events delivered to spies during a build, in order.
#[derive(Debug)]
pub enum BuildEvent<'a> {
    /// The build session is starting.
    SessionStarted,
    /// The execution request is ready; spies may rewrite it.
    ExecutionRequest(&'a mut ExecutionRequest),
    /// The build session has ended.
    SessionEnded,
    /// Any other host event, identified by kind.
    Other(&'a str),
}

/// Observer of build events.
///
/// Events are delivered sequentially; implementations do not need to be
/// re-entrant.
pub trait EventSpy {
    type Error;

    /// Handle one event. An error aborts the build.
    fn on_event(&self, event: BuildEvent<'_>) -> Result<(), Self::Error>;
}

/// Spy that decrypts HTTP headers of the execution request's servers.
pub struct HeaderDecryptionSpy<D> {
    rewriter: HeaderRewriter<D>,
}

impl<D: Decryptor> HeaderDecryptionSpy<D> {
    /// Create a spy decrypting through `decryptor`.
    pub fn new(decryptor: D) -> Self {
        Self {
            rewriter: HeaderRewriter::new(DecryptionGateway::new(decryptor)),
        }
    }

    /// The underlying rewriter.
    pub fn rewriter(&self) -> &HeaderRewriter<D> {
        &self.rewriter
    }
}

impl<D: Decryptor> EventSpy for HeaderDecryptionSpy<D> {
    type Error = HeaderDecryptionError;

    fn on_event(&self, event: BuildEvent<'_>) -> Result<(), Self::Error> {
        let BuildEvent::ExecutionRequest(request) = event else {
            return Ok(());
        };

        log_request_received!(
            servers = request.servers().len(),
            "processing execution request"
        );
        let servers = self.rewriter.rewrite(request.servers())?;
        request.set_servers(servers);
        log_request_rewritten!(
            servers = request.servers().len(),
            "finished processing execution request"
        );
        Ok(())
    }
}

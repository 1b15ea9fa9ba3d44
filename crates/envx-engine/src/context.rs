//! Per-request execution context

use std::io::Write;

use envx_core::EnvironmentClient;
use envx_core_types::RequestContext;

/// Everything a command needs to run one request
///
/// Holds the remote client, the output and diagnostics sinks, and the
/// correlation context. Commands receive it explicitly; there is no global
/// client state.
pub struct ExecutionContext<'a> {
    client: &'a dyn EnvironmentClient,
    stdout: &'a mut (dyn Write + Send),
    stderr: &'a mut (dyn Write + Send),
    request: RequestContext,
}

impl<'a> ExecutionContext<'a> {
    /// Create a context with a fresh request id
    pub fn new(
        client: &'a dyn EnvironmentClient,
        stdout: &'a mut (dyn Write + Send),
        stderr: &'a mut (dyn Write + Send),
    ) -> Self {
        Self {
            client,
            stdout,
            stderr,
            request: RequestContext::new(),
        }
    }

    /// Replace the correlation context
    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = request;
        self
    }

    pub fn client(&self) -> &'a dyn EnvironmentClient {
        self.client
    }

    pub fn request(&self) -> &RequestContext {
        &self.request
    }

    pub(crate) fn request_mut(&mut self) -> &mut RequestContext {
        &mut self.request
    }

    /// Sink for rendered output
    pub fn stdout(&mut self) -> &mut (dyn Write + Send) {
        &mut *self.stdout
    }

    /// Sink for diagnostics
    pub fn stderr(&mut self) -> &mut (dyn Write + Send) {
        &mut *self.stderr
    }
}

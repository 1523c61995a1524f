use std::sync::Arc;

use echo_network_primitives::error::NetworkError;
use echo_network_primitives::messages::SetStreamHandler;
use tokio::spawn;
use tracing::{debug, info};

use crate::stream::dispatch_incoming;
use crate::EventLoop;

impl EventLoop {
    /// Installs or replaces the handler for a protocol. Acceptance for the
    /// protocol is set up only once, so a replaced handler never runs twice
    /// for the same stream.
    pub(super) fn set_stream_handler(
        &mut self,
        SetStreamHandler { protocol, handler }: SetStreamHandler,
    ) -> Result<(), NetworkError> {
        let previous = self
            .stream_handlers
            .write()
            .insert(protocol.clone(), handler);

        if previous.is_some() {
            debug!(%protocol, "Replaced stream handler");
            return Ok(());
        }

        let incoming = match self.control.accept(protocol.clone()) {
            Ok(incoming) => incoming,
            Err(_) => {
                drop(self.stream_handlers.write().remove(&protocol));
                return Err(NetworkError::AlreadyRegistered { protocol });
            }
        };

        drop(spawn(dispatch_incoming(
            protocol.clone(),
            incoming,
            Arc::clone(&self.stream_handlers),
        )));

        info!(%protocol, "Accepting inbound streams");

        Ok(())
    }
}

use std::collections::hash_map::HashMap;
use std::sync::Arc;

use echo_network_primitives::stream::{Stream, StreamHandler};
use futures_util::StreamExt;
use libp2p::StreamProtocol;
use libp2p_stream::IncomingStreams;
use parking_lot::RwLock;
use tokio::spawn;
use tracing::{debug, warn};

/// Handlers keyed by the protocol they serve. At most one per protocol.
pub(crate) type StreamHandlers = Arc<RwLock<HashMap<StreamProtocol, StreamHandler>>>;

/// Hands every inbound stream of `protocol` to the handler currently
/// registered for it, each on its own task.
pub(crate) async fn dispatch_incoming(
    protocol: StreamProtocol,
    mut incoming: IncomingStreams,
    handlers: StreamHandlers,
) {
    while let Some((peer_id, stream)) = incoming.next().await {
        let handler = handlers.read().get(&protocol).cloned();

        let Some(handler) = handler else {
            warn!(%peer_id, %protocol, "No handler registered, dropping stream");
            continue;
        };

        debug!(%peer_id, %protocol, "Dispatching inbound stream");

        drop(spawn(handler(Stream::new(stream, peer_id, protocol.clone()))));
    }

    debug!(%protocol, "Inbound stream acceptance finished");
}

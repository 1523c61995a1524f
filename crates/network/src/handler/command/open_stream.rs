use std::collections::hash_map::Entry;
use std::time::Instant;

use echo_network_primitives::error::NetworkError;
use echo_network_primitives::messages::OpenStream;
use echo_network_primitives::stream::Stream;
use libp2p::swarm::dial_opts::DialOpts;
use libp2p::{PeerId, StreamProtocol};
use libp2p_stream::OpenStreamError;
use tokio::spawn;
use tokio::sync::oneshot;
use tracing::debug;

use crate::EventLoop;

impl EventLoop {
    pub(super) fn open_stream(
        &mut self,
        OpenStream { peer_id, protocol }: OpenStream,
        outcome: oneshot::Sender<Result<Stream, NetworkError>>,
    ) {
        if self.swarm.is_connected(&peer_id) {
            self.spawn_open_stream(peer_id, protocol, outcome);
            return;
        }

        match self.pending_dial.entry(peer_id) {
            Entry::Occupied(mut entry) => entry.get_mut().push((protocol, outcome)),
            Entry::Vacant(entry) => {
                let addrs = self.address_book.addresses(&peer_id, Instant::now());

                if addrs.is_empty() {
                    let _ignored = outcome.send(Err(NetworkError::NoAddresses { peer_id }));
                    return;
                }

                debug!(%peer_id, ?addrs, "Dialing peer");

                match self
                    .swarm
                    .dial(DialOpts::peer_id(peer_id).addresses(addrs).build())
                {
                    Ok(()) => {
                        let _pending = entry.insert(vec![(protocol, outcome)]);
                    }
                    Err(err) => {
                        let _ignored = outcome.send(Err(NetworkError::Dial {
                            peer_id,
                            reason: err.to_string(),
                        }));
                    }
                }
            }
        }
    }

    /// Completes every stream request that was waiting on a dial to `peer_id`.
    pub(crate) fn resolve_pending_dial(
        &mut self,
        peer_id: PeerId,
        result: Result<(), String>,
    ) {
        let Some(pending) = self.pending_dial.remove(&peer_id) else {
            return;
        };

        for (protocol, outcome) in pending {
            match &result {
                Ok(()) => self.spawn_open_stream(peer_id, protocol, outcome),
                Err(reason) => {
                    let _ignored = outcome.send(Err(NetworkError::Dial {
                        peer_id,
                        reason: reason.clone(),
                    }));
                }
            }
        }
    }

    fn spawn_open_stream(
        &self,
        peer_id: PeerId,
        protocol: StreamProtocol,
        outcome: oneshot::Sender<Result<Stream, NetworkError>>,
    ) {
        let mut control = self.control.clone();

        drop(spawn(async move {
            let result = match control.open_stream(peer_id, protocol.clone()).await {
                Ok(stream) => Ok(Stream::new(stream, peer_id, protocol)),
                Err(OpenStreamError::UnsupportedProtocol(protocol)) => {
                    Err(NetworkError::UnsupportedProtocol { peer_id, protocol })
                }
                Err(err) => Err(NetworkError::OpenStream {
                    peer_id,
                    reason: err.to_string(),
                }),
            };

            let _ignored = outcome.send(result);
        }));
    }
}

use echo_network_primitives::error::NetworkError;
use echo_network_primitives::messages::NetworkEvent;
use libp2p::swarm::SwarmEvent;
use libp2p::Multiaddr;
use tracing::{debug, info, warn};

use crate::{BehaviourEvent, EventLoop};

impl EventLoop {
    pub(crate) async fn handle_swarm_event(&mut self, event: SwarmEvent<BehaviourEvent>) {
        match event {
            SwarmEvent::NewListenAddr {
                listener_id,
                address,
            } => {
                info!(%address, "Listening on");

                if let Some(outcome) = self.pending_listen.remove(&listener_id) {
                    let _ignored = outcome.send(Ok(address.clone()));
                }

                self.publish(NetworkEvent::ListeningOn { address }).await;
            }
            SwarmEvent::ListenerClosed {
                listener_id,
                addresses,
                reason,
            } => {
                debug!(?addresses, ?reason, "Listener closed");

                if let Some(outcome) = self.pending_listen.remove(&listener_id) {
                    let _ignored = outcome.send(Err(NetworkError::Listen {
                        addr: addresses.into_iter().next().unwrap_or_else(Multiaddr::empty),
                        reason: format!("listener closed: {reason:?}"),
                    }));
                }
            }
            SwarmEvent::ListenerError { listener_id, error } => {
                warn!(%error, "Listener error");

                if let Some(outcome) = self.pending_listen.remove(&listener_id) {
                    let _ignored = outcome.send(Err(NetworkError::Listen {
                        addr: Multiaddr::empty(),
                        reason: error.to_string(),
                    }));
                }
            }
            SwarmEvent::ConnectionEstablished {
                peer_id, endpoint, ..
            } => {
                let address = endpoint.get_remote_address().clone();
                debug!(%peer_id, %address, "Connection established");

                self.resolve_pending_dial(peer_id, Ok(()));

                self.publish(NetworkEvent::PeerConnected { peer_id, address })
                    .await;
            }
            SwarmEvent::ConnectionClosed {
                peer_id,
                num_established,
                cause,
                ..
            } => {
                debug!(%peer_id, ?cause, "Connection closed");

                if num_established == 0 {
                    self.publish(NetworkEvent::PeerDisconnected { peer_id }).await;
                }
            }
            SwarmEvent::OutgoingConnectionError {
                peer_id: Some(peer_id),
                error,
                ..
            } => {
                warn!(%peer_id, %error, "Failed to dial peer");

                if !self.swarm.is_connected(&peer_id) {
                    self.resolve_pending_dial(peer_id, Err(error.to_string()));
                }
            }
            SwarmEvent::IncomingConnectionError {
                send_back_addr,
                error,
                ..
            } => {
                debug!(%send_back_addr, %error, "Incoming connection failed");
            }
            _ => {}
        }
    }

    async fn publish(&mut self, event: NetworkEvent) {
        // Nobody listening for events is not an error.
        let _ignored = self.event_sender.send(event).await;
    }
}

use core::fmt;

use echo_network::run;
use echo_network_primitives::client::NetworkClient;
use echo_network_primitives::config::{NetworkConfig, SwarmConfig, TransportSecurity};
use echo_network_primitives::identity;
use echo_network_primitives::messages::NetworkEvent;
use echo_network_primitives::peer::full_address;
use echo_network_primitives::stream::ECHO_PROTOCOL;
use eyre::{eyre, Result as EyreResult};
use libp2p::multiaddr::Protocol;
use libp2p::{Multiaddr, PeerId};
use tokio::spawn;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::EchoError;

pub mod echo;
pub mod error;
pub mod listener;
pub mod sender;

#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub struct NodeConfig {
    /// Loopback TCP port to listen on. `0` lets the OS pick one.
    pub listen_port: u16,
    pub security: TransportSecurity,
    /// `0` selects a fresh random identity.
    pub seed: u64,
}

impl NodeConfig {
    #[must_use]
    pub const fn new(listen_port: u16, security: TransportSecurity, seed: u64) -> Self {
        Self {
            listen_port,
            security,
            seed,
        }
    }
}

/// Which side of an exchange a node plays. Both sides serve the echo protocol.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    Listener,
    Sender,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Listener => "listener",
            Self::Sender => "sender",
        })
    }
}

#[derive(Debug)]
pub struct EchoNode {
    client: NetworkClient,
    full_address: Multiaddr,
    listen_port: u16,
    security: TransportSecurity,
}

impl EchoNode {
    /// Builds the host, listens on loopback and resolves once the listen
    /// address is bound.
    pub async fn start(config: NodeConfig) -> EyreResult<Self> {
        let identity = identity::from_seed(config.seed)?;

        let network_config = NetworkConfig::new(
            identity,
            SwarmConfig::loopback(config.listen_port),
            config.security,
        );

        let (client, events) = run(&network_config).await?;

        drop(spawn(log_events(events)));

        let Some(bound) = client.listen_addrs().await?.into_iter().next() else {
            return Err(eyre!("host is not listening on any address"));
        };

        let listen_port = bound
            .iter()
            .find_map(|protocol| match protocol {
                Protocol::Tcp(port) => Some(port),
                _ => None,
            })
            .ok_or_else(|| eyre!("listen address {bound} has no TCP port"))?;

        let full_address = full_address(&bound, client.local_peer_id());

        Ok(Self {
            client,
            full_address,
            listen_port,
            security: config.security,
        })
    }

    #[must_use]
    pub const fn client(&self) -> &NetworkClient {
        &self.client
    }

    #[must_use]
    pub const fn peer_id(&self) -> PeerId {
        self.client.local_peer_id()
    }

    /// Listen address with the `/p2p/<peer id>` suffix, ready to be dialed.
    #[must_use]
    pub const fn full_address(&self) -> &Multiaddr {
        &self.full_address
    }

    #[must_use]
    pub const fn listen_port(&self) -> u16 {
        self.listen_port
    }

    #[must_use]
    pub const fn security(&self) -> TransportSecurity {
        self.security
    }

    /// Serves the echo protocol on this node's host.
    pub async fn register_echo_handler(&self, role: Role) -> Result<(), EchoError> {
        self.client
            .set_stream_handler(ECHO_PROTOCOL, move |stream| async move {
                info!(
                    %role,
                    peer_id = %stream.peer_id(),
                    protocol = %stream.protocol(),
                    "Received new stream"
                );

                let termination = echo::serve(stream).await;
                debug!(%role, ?termination, "Echo stream finished");
            })
            .await
            .map_err(EchoError::Register)
    }
}

async fn log_events(mut events: mpsc::Receiver<NetworkEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            NetworkEvent::ListeningOn { address } => debug!(%address, "Listening"),
            NetworkEvent::PeerConnected { peer_id, address } => {
                info!(%peer_id, %address, "Peer connected");
            }
            NetworkEvent::PeerDisconnected { peer_id } => info!(%peer_id, "Peer disconnected"),
            _ => {}
        }
    }
}

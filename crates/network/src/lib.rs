use core::convert::Infallible;
use std::collections::hash_map::HashMap;
use std::sync::Arc;

use echo_network_primitives::client::{NetworkClient, NetworkMessage};
use echo_network_primitives::config::{NetworkConfig, TransportSecurity};
use echo_network_primitives::error::NetworkError;
use echo_network_primitives::messages::NetworkEvent;
use echo_network_primitives::stream::Stream;
use eyre::Result as EyreResult;
use futures_util::StreamExt;
use libp2p::core::transport::ListenerId;
use libp2p::identity::Keypair;
use libp2p::noise::Config as NoiseConfig;
use libp2p::plaintext::Config as PlaintextConfig;
use libp2p::swarm::{NetworkBehaviour, Swarm};
use libp2p::tcp::Config as TcpConfig;
use libp2p::yamux::Config as YamuxConfig;
use libp2p::{Multiaddr, PeerId, StreamProtocol, SwarmBuilder};
use libp2p_stream::{Behaviour as StreamBehaviour, Control};
use tokio::sync::{mpsc, oneshot};
use tokio::{select, spawn};
use tracing::{debug, info};

use crate::address_book::AddressBook;
use crate::stream::StreamHandlers;

mod address_book;
mod handler;
mod stream;

#[derive(NetworkBehaviour)]
struct Behaviour {
    stream: StreamBehaviour,
}

impl Behaviour {
    fn new(_key: &Keypair) -> Self {
        Self {
            stream: StreamBehaviour::new(),
        }
    }
}

/// Starts the host and listens on every configured address.
///
/// The host keeps running until every clone of the returned client has been
/// dropped.
pub async fn run(
    config: &NetworkConfig,
) -> EyreResult<(NetworkClient, mpsc::Receiver<NetworkEvent>)> {
    let (client, event_receiver, event_loop) = init(config)?;

    drop(spawn(event_loop.run()));

    for addr in &config.swarm.listen {
        let _bound = client.listen_on(addr.clone()).await?;
    }

    Ok((client, event_receiver))
}

fn init(
    config: &NetworkConfig,
) -> EyreResult<(NetworkClient, mpsc::Receiver<NetworkEvent>, EventLoop)> {
    let peer_id = config.identity.public().to_peer_id();
    let idle_timeout = config.idle_connection_timeout;

    let builder = SwarmBuilder::with_existing_identity(config.identity.clone()).with_tokio();

    let swarm = match config.security {
        TransportSecurity::Noise => builder
            .with_tcp(
                TcpConfig::default().nodelay(true),
                NoiseConfig::new,
                YamuxConfig::default,
            )?
            .with_behaviour(Behaviour::new)?
            .with_swarm_config(|cfg| cfg.with_idle_connection_timeout(idle_timeout))
            .build(),
        TransportSecurity::Plaintext => builder
            .with_tcp(
                TcpConfig::default().nodelay(true),
                plaintext,
                YamuxConfig::default,
            )?
            .with_behaviour(Behaviour::new)?
            .with_swarm_config(|cfg| cfg.with_idle_connection_timeout(idle_timeout))
            .build(),
    };

    info!(%peer_id, security = ?config.security, "Host initialized");

    let (command_sender, command_receiver) = mpsc::channel(32);
    let (event_sender, event_receiver) = mpsc::channel(32);

    let client = NetworkClient::new(peer_id, command_sender);

    let event_loop = EventLoop::new(swarm, command_receiver, event_sender);

    Ok((client, event_receiver, event_loop))
}

fn plaintext(key: &Keypair) -> Result<PlaintextConfig, Infallible> {
    Ok(PlaintextConfig::new(key))
}

type PendingStream = (
    StreamProtocol,
    oneshot::Sender<Result<Stream, NetworkError>>,
);

pub(crate) struct EventLoop {
    swarm: Box<Swarm<Behaviour>>,
    control: Control,
    command_receiver: mpsc::Receiver<NetworkMessage>,
    event_sender: mpsc::Sender<NetworkEvent>,
    address_book: AddressBook,
    stream_handlers: StreamHandlers,
    pending_listen: HashMap<ListenerId, oneshot::Sender<Result<Multiaddr, NetworkError>>>,
    pending_dial: HashMap<PeerId, Vec<PendingStream>>,
}

impl EventLoop {
    fn new(
        swarm: Swarm<Behaviour>,
        command_receiver: mpsc::Receiver<NetworkMessage>,
        event_sender: mpsc::Sender<NetworkEvent>,
    ) -> Self {
        let control = swarm.behaviour().stream.new_control();

        Self {
            swarm: Box::new(swarm),
            control,
            command_receiver,
            event_sender,
            address_book: AddressBook::default(),
            stream_handlers: Arc::default(),
            pending_listen: HashMap::default(),
            pending_dial: HashMap::default(),
        }
    }

    pub(crate) async fn run(mut self) {
        #[expect(clippy::redundant_pub_crate, reason = "Needed for Tokio code")]
        loop {
            select! {
                Some(event) = self.swarm.next() => {
                    self.handle_swarm_event(event).await;
                },
                command = self.command_receiver.recv() => {
                    let Some(command) = command else { break };
                    self.handle_command(command);
                },
            }
        }

        debug!("All clients dropped, shutting down the host");
    }
}

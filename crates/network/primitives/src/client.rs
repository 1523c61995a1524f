use core::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use libp2p::{Multiaddr, PeerId, StreamProtocol};
use tokio::sync::{mpsc, oneshot};

use crate::error::NetworkError;
use crate::messages::{AddAddresses, ListenAddrs, ListenOn, OpenStream, SetStreamHandler};
use crate::peer::AddressTtl;
use crate::stream::{Stream, StreamHandler};

/// Handle to a running host. Cheap to clone; the host shuts down once every
/// clone has been dropped.
#[derive(Clone, Debug)]
pub struct NetworkClient {
    peer_id: PeerId,
    sender: mpsc::Sender<NetworkMessage>,
}

#[derive(Debug)]
pub enum NetworkMessage {
    ListenOn {
        request: ListenOn,
        outcome: oneshot::Sender<Result<Multiaddr, NetworkError>>,
    },
    ListenAddrs {
        request: ListenAddrs,
        outcome: oneshot::Sender<Vec<Multiaddr>>,
    },
    AddAddresses {
        request: AddAddresses,
        outcome: oneshot::Sender<()>,
    },
    OpenStream {
        request: OpenStream,
        outcome: oneshot::Sender<Result<Stream, NetworkError>>,
    },
    SetStreamHandler {
        request: SetStreamHandler,
        outcome: oneshot::Sender<Result<(), NetworkError>>,
    },
}

impl NetworkClient {
    #[must_use]
    pub const fn new(peer_id: PeerId, sender: mpsc::Sender<NetworkMessage>) -> Self {
        Self { peer_id, sender }
    }

    #[must_use]
    pub const fn local_peer_id(&self) -> PeerId {
        self.peer_id
    }

    /// Starts listening and resolves with the address actually bound, which
    /// differs from `addr` when it asks for port 0.
    pub async fn listen_on(&self, addr: Multiaddr) -> Result<Multiaddr, NetworkError> {
        self.request(|outcome| NetworkMessage::ListenOn {
            request: ListenOn::from(addr),
            outcome,
        })
        .await?
    }

    pub async fn listen_addrs(&self) -> Result<Vec<Multiaddr>, NetworkError> {
        self.request(|outcome| NetworkMessage::ListenAddrs {
            request: ListenAddrs,
            outcome,
        })
        .await
    }

    pub async fn add_addresses(
        &self,
        peer_id: PeerId,
        addrs: Vec<Multiaddr>,
        ttl: AddressTtl,
    ) -> Result<(), NetworkError> {
        self.request(|outcome| NetworkMessage::AddAddresses {
            request: AddAddresses {
                peer_id,
                addrs,
                ttl,
            },
            outcome,
        })
        .await
    }

    /// Opens a new outbound stream, dialing the peer first if there is no
    /// connection to it yet.
    pub async fn open_stream(
        &self,
        peer_id: PeerId,
        protocol: StreamProtocol,
    ) -> Result<Stream, NetworkError> {
        self.request(|outcome| NetworkMessage::OpenStream {
            request: OpenStream::from((peer_id, protocol)),
            outcome,
        })
        .await?
    }

    /// Routes every inbound stream of `protocol` to `handler`, replacing any
    /// handler previously set for it.
    pub async fn set_stream_handler<F, Fut>(
        &self,
        protocol: StreamProtocol,
        handler: F,
    ) -> Result<(), NetworkError>
    where
        F: Fn(Stream) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: StreamHandler = Arc::new(move |stream| handler(stream).boxed());

        self.request(|outcome| NetworkMessage::SetStreamHandler {
            request: SetStreamHandler { protocol, handler },
            outcome,
        })
        .await?
    }

    async fn request<T>(
        &self,
        message: impl FnOnce(oneshot::Sender<T>) -> NetworkMessage,
    ) -> Result<T, NetworkError> {
        let (tx, rx) = oneshot::channel();

        self.sender
            .send(message(tx))
            .await
            .map_err(|_| NetworkError::HostClosed)?;

        rx.await.map_err(|_| NetworkError::HostClosed)
    }
}

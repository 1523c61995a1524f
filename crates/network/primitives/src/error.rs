use libp2p::{Multiaddr, PeerId, StreamProtocol};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NetworkError {
    #[error("the network host has shut down")]
    HostClosed,
    #[error("failed to listen on {addr}: {reason}")]
    Listen { addr: Multiaddr, reason: String },
    #[error("no known addresses for peer {peer_id}")]
    NoAddresses { peer_id: PeerId },
    #[error("failed to dial peer {peer_id}: {reason}")]
    Dial { peer_id: PeerId, reason: String },
    #[error("peer {peer_id} does not support protocol {protocol}")]
    UnsupportedProtocol {
        peer_id: PeerId,
        protocol: StreamProtocol,
    },
    #[error("failed to open stream to {peer_id}: {reason}")]
    OpenStream { peer_id: PeerId, reason: String },
    #[error("protocol {protocol} is already accepted elsewhere")]
    AlreadyRegistered { protocol: StreamProtocol },
}

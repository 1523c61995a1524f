use core::fmt::{self, Debug, Formatter};

use libp2p::{Multiaddr, PeerId, StreamProtocol};

use crate::peer::AddressTtl;
use crate::stream::StreamHandler;

#[derive(Clone, Debug)]
pub struct ListenOn(pub Multiaddr);

impl From<Multiaddr> for ListenOn {
    fn from(addr: Multiaddr) -> Self {
        Self(addr)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ListenAddrs;

#[derive(Clone, Debug)]
pub struct AddAddresses {
    pub peer_id: PeerId,
    pub addrs: Vec<Multiaddr>,
    pub ttl: AddressTtl,
}

#[derive(Clone, Debug)]
pub struct OpenStream {
    pub peer_id: PeerId,
    pub protocol: StreamProtocol,
}

impl From<(PeerId, StreamProtocol)> for OpenStream {
    fn from((peer_id, protocol): (PeerId, StreamProtocol)) -> Self {
        Self { peer_id, protocol }
    }
}

#[derive(Clone)]
pub struct SetStreamHandler {
    pub protocol: StreamProtocol,
    pub handler: StreamHandler,
}

impl Debug for SetStreamHandler {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetStreamHandler")
            .field("protocol", &self.protocol)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum NetworkEvent {
    ListeningOn { address: Multiaddr },
    PeerConnected { peer_id: PeerId, address: Multiaddr },
    PeerDisconnected { peer_id: PeerId },
}

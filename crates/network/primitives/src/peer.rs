use core::fmt::{self, Display, Formatter};
use core::str::FromStr;
use core::time::Duration;

use libp2p::PeerId;
use multiaddr::{Error as MultiaddrError, Multiaddr, Protocol};
use thiserror::Error;

/// How long an address stays in the address book.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddressTtl {
    /// Never expires.
    Permanent,
    Temporary(Duration),
}

/// A peer identity together with the addresses it can be reached on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddrInfo {
    pub peer_id: PeerId,
    pub addrs: Vec<Multiaddr>,
}

#[derive(Debug, Error)]
pub enum AddrInfoError {
    #[error("malformed multiaddr {input:?}: {source}")]
    Multiaddr {
        input: String,
        #[source]
        source: MultiaddrError,
    },
    #[error("address {0} does not end with a /p2p peer identity")]
    MissingPeerId(Multiaddr),
}

impl AddrInfo {
    /// Splits `/…/p2p/<peer id>` into the peer id and its transport address.
    ///
    /// The transport part may be empty, in which case the record carries no
    /// dialable address.
    pub fn from_p2p_addr(addr: Multiaddr) -> Result<Self, AddrInfoError> {
        let mut transport = addr.clone();

        let Some(Protocol::P2p(peer_id)) = transport.pop() else {
            return Err(AddrInfoError::MissingPeerId(addr));
        };

        let addrs = if transport.is_empty() {
            vec![]
        } else {
            vec![transport]
        };

        Ok(Self { peer_id, addrs })
    }
}

impl FromStr for AddrInfo {
    type Err = AddrInfoError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let addr = input
            .parse::<Multiaddr>()
            .map_err(|source| AddrInfoError::Multiaddr {
                input: input.to_owned(),
                source,
            })?;

        Self::from_p2p_addr(addr)
    }
}

impl Display for AddrInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}: [", self.peer_id)?;
        for (i, addr) in self.addrs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{addr}")?;
        }
        f.write_str("]}")
    }
}

/// Appends `/p2p/<peer id>` to a transport address, producing the address an
/// operator hands to a dialing peer.
#[must_use]
pub fn full_address(addr: &Multiaddr, peer_id: PeerId) -> Multiaddr {
    addr.clone().with(Protocol::P2p(peer_id))
}

#[cfg(test)]
mod tests {
    use libp2p::identity::Keypair;

    use super::*;

    fn peer() -> PeerId {
        Keypair::generate_ed25519().public().to_peer_id()
    }

    #[test]
    fn test_parse_full_address() {
        let peer_id = peer();
        let input = format!("/ip4/127.0.0.1/tcp/4001/p2p/{peer_id}");

        let info: AddrInfo = input.parse().unwrap();

        assert_eq!(info.peer_id, peer_id, "peer id must be extracted");
        assert_eq!(
            info.addrs,
            vec!["/ip4/127.0.0.1/tcp/4001".parse::<Multiaddr>().unwrap()],
            "transport part must become the only address"
        );
    }

    #[test]
    fn test_parse_bare_peer_id() {
        let peer_id = peer();

        let info: AddrInfo = format!("/p2p/{peer_id}").parse().unwrap();

        assert_eq!(info.peer_id, peer_id, "peer id must be extracted");
        assert!(info.addrs.is_empty(), "no transport means no addresses");
    }

    #[test]
    fn test_missing_peer_id() {
        let err = "/ip4/127.0.0.1/tcp/4001".parse::<AddrInfo>().unwrap_err();

        assert!(
            matches!(err, AddrInfoError::MissingPeerId(_)),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_malformed_multiaddr() {
        let err = "not-a-multiaddr".parse::<AddrInfo>().unwrap_err();

        assert!(
            matches!(err, AddrInfoError::Multiaddr { .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_display_lists_peer_and_addresses() {
        let peer_id = peer();
        let info = AddrInfo {
            peer_id,
            addrs: vec![
                "/ip4/127.0.0.1/tcp/4001".parse().unwrap(),
                "/ip4/10.0.0.1/tcp/4002".parse().unwrap(),
            ],
        };

        assert_eq!(
            info.to_string(),
            format!("{{{peer_id}: [/ip4/127.0.0.1/tcp/4001 /ip4/10.0.0.1/tcp/4002]}}"),
            "display must show the peer id and every address"
        );
    }

    #[test]
    fn test_display_without_addresses() {
        let peer_id = peer();
        let info: AddrInfo = format!("/p2p/{peer_id}").parse().unwrap();

        assert_eq!(
            info.to_string(),
            format!("{{{peer_id}: []}}"),
            "an empty address list must still render"
        );
    }

    #[test]
    fn test_full_address_round_trips() {
        let peer_id = peer();
        let addr: Multiaddr = "/ip4/127.0.0.1/tcp/4001".parse().unwrap();

        let info = AddrInfo::from_p2p_addr(full_address(&addr, peer_id)).unwrap();

        assert_eq!(
            info,
            AddrInfo {
                peer_id,
                addrs: vec![addr]
            },
            "full address must parse back into the same record"
        );
    }
}

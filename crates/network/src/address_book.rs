#[cfg(test)]
#[path = "tests/address_book.rs"]
mod tests;

use std::collections::BTreeMap;
use std::time::Instant;

use echo_network_primitives::peer::AddressTtl;
use libp2p::{Multiaddr, PeerId};

/// Known dialable addresses per peer.
///
/// Entries carry an expiry; `None` means the address never expires. Adding an
/// address that is already known keeps whichever expiry lies further out.
#[derive(Debug, Default)]
pub(crate) struct AddressBook {
    peers: BTreeMap<PeerId, Vec<AddressEntry>>,
}

#[derive(Clone, Debug)]
struct AddressEntry {
    addr: Multiaddr,
    expires_at: Option<Instant>,
}

impl AddressEntry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

impl AddressBook {
    pub(crate) fn add_addrs(
        &mut self,
        peer_id: PeerId,
        addrs: impl IntoIterator<Item = Multiaddr>,
        ttl: AddressTtl,
        now: Instant,
    ) {
        let expires_at = match ttl {
            AddressTtl::Permanent => None,
            AddressTtl::Temporary(duration) => Some(now + duration),
        };

        let entries = self.peers.entry(peer_id).or_default();

        for addr in addrs {
            match entries.iter_mut().find(|entry| entry.addr == addr) {
                Some(entry) => {
                    entry.expires_at = match (entry.expires_at, expires_at) {
                        (None, _) | (_, None) => None,
                        (Some(current), Some(new)) => Some(current.max(new)),
                    };
                }
                None => entries.push(AddressEntry { addr, expires_at }),
            }
        }
    }

    /// Live addresses for `peer_id`, in insertion order. Expired entries are
    /// dropped as a side effect.
    pub(crate) fn addresses(&mut self, peer_id: &PeerId, now: Instant) -> Vec<Multiaddr> {
        let Some(entries) = self.peers.get_mut(peer_id) else {
            return vec![];
        };

        entries.retain(|entry| !entry.is_expired(now));

        if entries.is_empty() {
            drop(self.peers.remove(peer_id));
            return vec![];
        }

        entries.iter().map(|entry| entry.addr.clone()).collect()
    }
}

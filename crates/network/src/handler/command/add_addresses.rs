use std::time::Instant;

use echo_network_primitives::messages::AddAddresses;
use tracing::debug;

use crate::EventLoop;

impl EventLoop {
    pub(super) fn add_addresses(&mut self, request: AddAddresses) {
        let AddAddresses {
            peer_id,
            addrs,
            ttl,
        } = request;

        debug!(%peer_id, ?addrs, ?ttl, "Adding peer addresses");

        self.address_book
            .add_addrs(peer_id, addrs, ttl, Instant::now());
    }
}

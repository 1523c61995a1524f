use echo_network_primitives::error::NetworkError;
use echo_network_primitives::messages::ListenOn;
use libp2p::Multiaddr;
use tokio::sync::oneshot;

use crate::EventLoop;

impl EventLoop {
    /// The outcome resolves once the swarm reports the bound address, or the
    /// listener fails.
    pub(super) fn listen_on(
        &mut self,
        ListenOn(addr): ListenOn,
        outcome: oneshot::Sender<Result<Multiaddr, NetworkError>>,
    ) {
        match self.swarm.listen_on(addr.clone()) {
            Ok(listener_id) => drop(self.pending_listen.insert(listener_id, outcome)),
            Err(err) => {
                let _ignored = outcome.send(Err(NetworkError::Listen {
                    addr,
                    reason: err.to_string(),
                }));
            }
        }
    }
}

use echo_network_primitives::client::NetworkMessage;

use crate::EventLoop;

mod add_addresses;
mod listen;
mod open_stream;
mod set_stream_handler;

impl EventLoop {
    pub(crate) fn handle_command(&mut self, command: NetworkMessage) {
        match command {
            NetworkMessage::ListenOn { request, outcome } => self.listen_on(request, outcome),
            NetworkMessage::ListenAddrs { outcome, .. } => {
                let _ignored = outcome.send(self.swarm.listeners().cloned().collect());
            }
            NetworkMessage::AddAddresses { request, outcome } => {
                self.add_addresses(request);
                let _ignored = outcome.send(());
            }
            NetworkMessage::OpenStream { request, outcome } => self.open_stream(request, outcome),
            NetworkMessage::SetStreamHandler { request, outcome } => {
                let _ignored = outcome.send(self.set_stream_handler(request));
            }
        }
    }
}

use core::str::FromStr;

use echo_network_primitives::peer::{AddrInfo, AddressTtl};
use echo_network_primitives::stream::ECHO_PROTOCOL;
use tracing::{debug, info};

use crate::echo::{request, GREETING};
use crate::error::EchoError;
use crate::{EchoNode, Role};

impl EchoNode {
    /// Sends the greeting to `target` and returns whatever the remote wrote
    /// back before closing its side.
    ///
    /// `target` must be a multiaddress ending in `/p2p/<peer id>`.
    pub async fn run_sender(&self, target: &str) -> Result<Vec<u8>, EchoError> {
        info!("I am {}", self.full_address());

        self.register_echo_handler(Role::Sender).await?;

        let target = AddrInfo::from_str(target)?;

        debug!(%target, "Parsed target");

        self.client()
            .add_addresses(target.peer_id, target.addrs, AddressTtl::Permanent)
            .await
            .map_err(EchoError::Dial)?;

        info!(peer_id = %target.peer_id, "Opening stream");

        let mut stream = self
            .client()
            .open_stream(target.peer_id, ECHO_PROTOCOL)
            .await
            .map_err(EchoError::Dial)?;

        let reply = request(&mut stream, GREETING).await?;

        info!(reply = %reply.escape_ascii(), "Read reply");

        if let Err(err) = stream.close().await {
            debug!(%err, "Failed to close stream");
        }

        Ok(reply)
    }
}

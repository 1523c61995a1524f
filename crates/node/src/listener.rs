use tracing::info;

use crate::error::EchoError;
use crate::{EchoNode, Role};

impl EchoNode {
    /// Registers the echo handler and announces how to reach this node.
    ///
    /// Returns immediately; the caller keeps the node alive for as long as it
    /// should keep answering.
    pub async fn start_listener(&self) -> Result<(), EchoError> {
        info!("I am {}", self.full_address());

        self.register_echo_handler(Role::Listener).await?;

        info!("Listening for connections");
        info!("Now run \"{}\" on a different terminal", self.sender_hint());

        Ok(())
    }

    /// The command a second process runs to exchange a message with this one.
    #[must_use]
    pub fn sender_hint(&self) -> String {
        let mut hint = format!(
            "./echo -l {} -d {}",
            self.listen_port().saturating_add(1),
            self.full_address()
        );

        if self.security().is_insecure() {
            hint.push_str(" --insecure");
        }

        hint
    }
}

use core::net::Ipv4Addr;
use core::time::Duration;

use libp2p::identity::Keypair;
use multiaddr::{Multiaddr, Protocol};

pub const DEFAULT_IDLE_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
#[non_exhaustive]
pub struct NetworkConfig {
    pub identity: Keypair,

    pub swarm: SwarmConfig,
    pub security: TransportSecurity,
    pub idle_connection_timeout: Duration,
}

impl NetworkConfig {
    #[must_use]
    pub const fn new(identity: Keypair, swarm: SwarmConfig, security: TransportSecurity) -> Self {
        Self {
            identity,
            swarm,
            security,
            idle_connection_timeout: DEFAULT_IDLE_CONNECTION_TIMEOUT,
        }
    }
}

#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct SwarmConfig {
    pub listen: Vec<Multiaddr>,
}

impl SwarmConfig {
    #[must_use]
    pub const fn new(listen: Vec<Multiaddr>) -> Self {
        Self { listen }
    }

    /// A single TCP listener on the IPv4 loopback interface.
    #[must_use]
    pub fn loopback(port: u16) -> Self {
        Self::new(vec![tcp_addr(Ipv4Addr::LOCALHOST, port)])
    }

    /// A single TCP listener on every IPv4 interface, port picked by the OS.
    #[must_use]
    pub fn any() -> Self {
        Self::new(vec![tcp_addr(Ipv4Addr::UNSPECIFIED, 0)])
    }
}

/// How connections are secured once the TCP handshake completes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TransportSecurity {
    #[default]
    Noise,
    /// No encryption or authentication of the remote key; for local testing.
    Plaintext,
}

impl TransportSecurity {
    #[must_use]
    pub const fn from_insecure(insecure: bool) -> Self {
        if insecure {
            Self::Plaintext
        } else {
            Self::Noise
        }
    }

    #[must_use]
    pub const fn is_insecure(self) -> bool {
        matches!(self, Self::Plaintext)
    }
}

fn tcp_addr(ip: Ipv4Addr, port: u16) -> Multiaddr {
    Multiaddr::empty()
        .with(Protocol::Ip4(ip))
        .with(Protocol::Tcp(port))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_listen_addr() {
        let config = SwarmConfig::loopback(4001);

        assert_eq!(
            config.listen,
            vec!["/ip4/127.0.0.1/tcp/4001".parse::<Multiaddr>().unwrap()],
            "loopback config should bind a single 127.0.0.1 TCP address"
        );
    }

    #[test]
    fn test_transport_security_from_flag() {
        assert_eq!(
            TransportSecurity::from_insecure(true),
            TransportSecurity::Plaintext,
            "insecure flag selects plaintext"
        );
        assert_eq!(
            TransportSecurity::from_insecure(false),
            TransportSecurity::Noise,
            "noise is the default"
        );
        assert!(
            TransportSecurity::Plaintext.is_insecure(),
            "plaintext reports insecure"
        );
    }
}

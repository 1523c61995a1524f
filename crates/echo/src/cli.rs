use clap::{value_parser, Parser};
use const_format::concatcp;
use echo_network_primitives::config::TransportSecurity;
use echo_node::{EchoNode, NodeConfig};
use eyre::Result as EyreResult;
use tokio::signal::ctrl_c;
use tracing::{error, info};

pub const EXAMPLES: &str = r"
  # Wait for a peer to send a greeting
  $ echo -l 10000

  # Greet the peer printed by the command above
  $ echo -l 10001 -d /ip4/127.0.0.1/tcp/10000/p2p/<PEER ID>

  # Same exchange without transport encryption, on both sides
  $ echo -l 10000 --insecure
  $ echo -l 10001 --insecure -d /ip4/127.0.0.1/tcp/10000/p2p/<PEER ID>
";

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(after_help = concatcp!(
    "Environment variables:\n",
    "  RUST_LOG    Log directives, takes precedence over --log-level\n\n",
    "Examples:",
    EXAMPLES
))]
pub struct RootCommand {
    /// Loopback TCP port to listen on
    #[arg(short = 'l', long = "listen", value_name = "PORT")]
    #[arg(value_parser = value_parser!(u16).range(1..))]
    pub listen_port: u16,

    /// Address of the peer to greet, ending in /p2p/<PEER ID>. Without it the
    /// node waits for others to connect
    #[arg(short = 'd', long = "dial", value_name = "MULTIADDR")]
    pub target: Option<String>,

    /// Use an unencrypted transport
    #[arg(long)]
    pub insecure: bool,

    /// Seed for a deterministic identity, 0 for a random one
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    pub seed: u64,

    /// Log directives used when RUST_LOG is not set
    #[arg(long, value_name = "DIRECTIVES", default_value = "info")]
    pub log_level: String,
}

impl RootCommand {
    pub async fn run(self) -> EyreResult<()> {
        let config = NodeConfig::new(
            self.listen_port,
            TransportSecurity::from_insecure(self.insecure),
            self.seed,
        );

        let node = EchoNode::start(config).await?;

        let Some(target) = self.target else {
            node.start_listener().await?;

            ctrl_c().await?;

            info!("Shutting down");

            return Ok(());
        };

        if let Err(err) = node.run_sender(&target).await {
            error!(%err, "Echo exchange failed");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command_is_well_formed() {
        RootCommand::command().debug_assert();
    }

    #[test]
    fn test_listener_defaults() {
        let command = RootCommand::try_parse_from(["echo", "-l", "10000"]).unwrap();

        assert_eq!(command.listen_port, 10000, "port must be taken from -l");
        assert_eq!(command.target, None, "no -d means listener role");
        assert!(!command.insecure, "transport security is on by default");
        assert_eq!(command.seed, 0, "random identity by default");
        assert_eq!(command.log_level, "info", "info level by default");
    }

    #[test]
    fn test_sender_flags() {
        let command = RootCommand::try_parse_from([
            "echo",
            "--listen",
            "10001",
            "--dial",
            "/ip4/127.0.0.1/tcp/10000/p2p/QmExample",
            "--insecure",
            "--seed",
            "7",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(command.listen_port, 10001, "long form of -l");
        assert_eq!(
            command.target.as_deref(),
            Some("/ip4/127.0.0.1/tcp/10000/p2p/QmExample"),
            "target is passed through unparsed"
        );
        assert!(command.insecure, "--insecure must be honoured");
        assert_eq!(command.seed, 7, "--seed must be honoured");
        assert_eq!(command.log_level, "debug", "--log-level must be honoured");
    }

    #[test]
    fn test_port_is_required() {
        let err = RootCommand::try_parse_from(["echo"]).unwrap_err();

        assert_eq!(
            err.kind(),
            ErrorKind::MissingRequiredArgument,
            "a missing port is a configuration error"
        );
    }

    #[test]
    fn test_port_zero_is_rejected() {
        let err = RootCommand::try_parse_from(["echo", "-l", "0"]).unwrap_err();

        assert_eq!(
            err.kind(),
            ErrorKind::ValueValidation,
            "port 0 is a configuration error"
        );
    }

    #[test]
    fn test_port_out_of_range_is_rejected() {
        let err = RootCommand::try_parse_from(["echo", "-l", "65536"]).unwrap_err();

        assert_eq!(
            err.kind(),
            ErrorKind::ValueValidation,
            "ports above 65535 are a configuration error"
        );
    }
}

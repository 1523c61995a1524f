use std::env::var;

use echo_network::run;
use echo_network_primitives::config::{NetworkConfig, SwarmConfig, TransportSecurity};
use eyre::Result as EyreResult;
use libp2p::identity::Keypair;
use tracing::debug;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{registry, EnvFilter};

#[tokio::main]
async fn main() -> EyreResult<()> {
    setup()?;

    let config = NetworkConfig::new(
        Keypair::generate_ed25519(),
        SwarmConfig::any(),
        TransportSecurity::default(),
    );

    let (client, _events) = run(&config).await?;

    println!("Hello World, my hosts ID is {}", client.local_peer_id());

    drop(client);

    debug!("Host closed");

    Ok(())
}

fn setup() -> EyreResult<()> {
    let directives = match var("RUST_LOG") {
        Ok(value) if !value.trim().is_empty() => value,
        _ => "warn".to_owned(),
    };

    registry()
        .with(EnvFilter::builder().parse(directives)?)
        .with(layer())
        .init();

    color_eyre::install()?;

    Ok(())
}

use std::io;

use echo_network_primitives::error::NetworkError;
use echo_network_primitives::peer::AddrInfoError;
use thiserror::Error;

/// Failures of a single echo exchange. None of them is fatal to the process.
#[derive(Debug, Error)]
pub enum EchoError {
    #[error("invalid target address: {0}")]
    AddressParse(#[from] AddrInfoError),
    #[error("failed to reach peer: {0}")]
    Dial(#[source] NetworkError),
    #[error("failed to register stream handler: {0}")]
    Register(#[source] NetworkError),
    #[error("failed to read from stream: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write to stream: {0}")]
    Write(#[source] io::Error),
}

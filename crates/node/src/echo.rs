use std::io;

use echo_network_primitives::stream::Stream;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::error::EchoError;

/// What a sender writes to start an exchange.
pub const GREETING: &[u8] = b"Hello, world!\n";

/// How `serve` ended a stream.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub enum Termination {
    Closed,
    Reset,
}

/// Reads one newline-terminated line and writes the same bytes back.
///
/// Running out of input before a newline is a read error, and nothing is
/// written in that case.
pub async fn handle<S>(stream: &mut S) -> Result<(), EchoError>
where
    S: AsyncBufRead + AsyncWrite + Unpin,
{
    let mut line = Vec::new();

    let _read = stream
        .read_until(b'\n', &mut line)
        .await
        .map_err(EchoError::Read)?;

    if line.last() != Some(&b'\n') {
        return Err(EchoError::Read(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stream ended before a newline",
        )));
    }

    info!(line = %line.escape_ascii(), "Read");

    stream.write_all(&line).await.map_err(EchoError::Write)?;
    stream.flush().await.map_err(EchoError::Write)
}

/// Runs `handle` on an inbound stream, then closes it on success or resets it
/// on failure.
pub async fn serve(mut stream: Stream) -> Termination {
    let peer_id = stream.peer_id();

    match handle(&mut stream).await {
        Ok(()) => {
            if let Err(err) = stream.close().await {
                debug!(%peer_id, %err, "Failed to close stream");
            }
            Termination::Closed
        }
        Err(err) => {
            warn!(%peer_id, %err, "Echo failed, resetting stream");
            stream.reset();
            Termination::Reset
        }
    }
}

/// Writes `message` and collects everything the remote sends until it closes
/// its side of the stream.
pub async fn request<S>(stream: &mut S, message: &[u8]) -> Result<Vec<u8>, EchoError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    stream.write_all(message).await.map_err(EchoError::Write)?;
    stream.flush().await.map_err(EchoError::Write)?;

    let mut reply = Vec::new();
    let _read = stream
        .read_to_end(&mut reply)
        .await
        .map_err(EchoError::Read)?;

    Ok(reply)
}

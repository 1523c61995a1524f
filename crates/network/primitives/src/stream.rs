use core::pin::Pin;
use core::task::{Context, Poll};
use std::io;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use libp2p::{PeerId, Stream as P2pStream, StreamProtocol};
use tokio::io::{AsyncBufRead, AsyncRead, AsyncWrite, AsyncWriteExt, BufStream, ReadBuf};
use tokio_util::compat::{Compat, FuturesAsyncReadCompatExt};

pub const ECHO_PROTOCOL: StreamProtocol = StreamProtocol::new("/echo/1.0.0");

/// Callback the host invokes, on its own task, for every inbound stream of
/// the protocol it was registered for.
pub type StreamHandler = Arc<dyn Fn(Stream) -> BoxFuture<'static, ()> + Send + Sync>;

/// A buffered, bidirectional byte stream to a single remote peer.
#[derive(Debug)]
pub struct Stream {
    inner: BufStream<Compat<P2pStream>>,
    peer_id: PeerId,
    protocol: StreamProtocol,
}

impl Stream {
    #[must_use]
    pub fn new(stream: P2pStream, peer_id: PeerId, protocol: StreamProtocol) -> Self {
        Self {
            inner: BufStream::new(stream.compat()),
            peer_id,
            protocol,
        }
    }

    #[must_use]
    pub const fn peer_id(&self) -> PeerId {
        self.peer_id
    }

    #[must_use]
    pub const fn protocol(&self) -> &StreamProtocol {
        &self.protocol
    }

    /// Flushes pending writes and half-closes the stream.
    pub async fn close(mut self) -> io::Result<()> {
        self.inner.shutdown().await
    }

    /// Aborts the stream, discarding anything still buffered.
    ///
    /// The substream is dropped without being closed, which the multiplexer
    /// reports to the remote as a reset.
    pub fn reset(self) {
        drop(self.inner);
    }
}

impl AsyncRead for Stream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_read(cx, buf)
    }
}

impl AsyncBufRead for Stream {
    fn poll_fill_buf(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        Pin::new(&mut self.get_mut().inner).poll_fill_buf(cx)
    }

    fn consume(mut self: Pin<&mut Self>, amt: usize) {
        Pin::new(&mut self.inner).consume(amt);
    }
}

impl AsyncWrite for Stream {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        Pin::new(&mut self.inner).poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Pin::new(&mut self.inner).poll_shutdown(cx)
    }
}

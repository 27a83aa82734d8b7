//! Response sinks that controllers hand to the SSE encoder.

use async_stream::stream;
use axum::body::Body;
use axum::http::HeaderMap;
use axum::response::Response;
use bytes::Bytes;
use log::*;
use sse::Flushable;
use std::convert::Infallible;
use std::io;
use tokio::sync::mpsc::{self, UnboundedSender};

/// A response whose body is fed chunk by chunk while it is being sent.
///
/// Upgrade it with [`sse::Upgrader`], then split it with [`into_parts`]:
/// the `Response` goes back to axum and the [`ChannelSink`] goes to whoever
/// produces the events.
///
/// [`into_parts`]: StreamingResponse::into_parts
pub struct StreamingResponse {
    headers: HeaderMap,
    sink: ChannelSink,
    body: Body,
}

impl StreamingResponse {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Bytes>();

        // Ends once every sink is dropped; dropping the body closes the sink.
        let chunks = stream! {
            while let Some(chunk) = receiver.recv().await {
                yield Ok::<_, Infallible>(chunk);
            }
        };

        Self {
            headers: HeaderMap::new(),
            sink: ChannelSink {
                buffer: Vec::new(),
                sender,
            },
            body: Body::from_stream(chunks),
        }
    }

    pub fn into_parts(self) -> (Response, ChannelSink) {
        let mut response = Response::new(self.body);
        *response.headers_mut() = self.headers;
        (response, self.sink)
    }
}

impl Default for StreamingResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl Flushable for StreamingResponse {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn supports_flush(&self) -> bool {
        true
    }
}

/// Write half of a [`StreamingResponse`].
///
/// Writes are buffered; each `flush` sends the buffer to the client as one
/// body chunk. Both fail with `BrokenPipe` once the client has gone away.
pub struct ChannelSink {
    buffer: Vec<u8>,
    sender: UnboundedSender<Bytes>,
}

impl ChannelSink {
    fn check_open(&self) -> io::Result<()> {
        if self.sender.is_closed() {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "client disconnected",
            ));
        }
        Ok(())
    }
}

impl io::Write for ChannelSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.check_open()?;
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.check_open()?;
        if self.buffer.is_empty() {
            return Ok(());
        }

        let chunk = Bytes::from(std::mem::take(&mut self.buffer));
        trace!("Flushing {} byte chunk to client", chunk.len());
        self.sender
            .send(chunk)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "client disconnected"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use sse::error::ErrorKind;
    use sse::{write_event, Event, Upgrader};
    use std::io::Write;

    /// Collects the whole body up front, so it can't stream.
    struct BufferedResponse {
        headers: HeaderMap,
    }

    impl Flushable for BufferedResponse {
        fn headers_mut(&mut self) -> &mut HeaderMap {
            &mut self.headers
        }

        fn supports_flush(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn test_flushed_events_reach_the_body() {
        let (response, mut sink) = StreamingResponse::new().into_parts();

        write_event(&mut sink, &Event::new("one")).unwrap();
        sink.flush().unwrap();
        write_event(&mut sink, &Event::new("two").with_id("2")).unwrap();
        sink.flush().unwrap();
        drop(sink);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"data:one\n\nid:2\ndata:two\n\n");
    }

    #[tokio::test]
    async fn test_unflushed_bytes_are_not_sent() {
        let (response, mut sink) = StreamingResponse::new().into_parts();

        write_event(&mut sink, &Event::new("pending")).unwrap();
        drop(sink);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty(), "nothing was flushed, got {body:?}");
    }

    #[test]
    fn test_sink_fails_after_client_disconnects() {
        let (response, mut sink) = StreamingResponse::new().into_parts();
        drop(response);

        let err = write_event(&mut sink, &Event::new("late")).unwrap_err();
        assert_eq!(err.error_kind, ErrorKind::Io);

        let err = sink.flush().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_streaming_response_accepts_upgrade() {
        let mut streaming = StreamingResponse::new();
        Upgrader::new().upgrade(&mut streaming).unwrap();

        let (response, _sink) = streaming.into_parts();
        assert_eq!(response.headers()["content-type"], "text/event-stream");
        assert_eq!(response.headers()["cache-control"], "no-cache");
        assert_eq!(response.headers()["connection"], "keep-alive");
    }

    #[tokio::test]
    async fn test_buffered_response_upgrade_maps_to_server_error() {
        let mut buffered = BufferedResponse {
            headers: HeaderMap::new(),
        };

        let err: Error = Upgrader::new().upgrade(&mut buffered).unwrap_err().into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"streaming unsupported");
        assert!(buffered.headers.is_empty());
    }
}

use crate::error::{Error, Result};
use axum::http::header::{CACHE_CONTROL, CONNECTION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue};
use log::*;

/// A response sink that an [`Upgrader`] can prepare for event delivery.
pub trait Flushable {
    /// Headers that will be sent with the response.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Whether each flush reaches the client as soon as it happens.
    fn supports_flush(&self) -> bool;
}

/// Prepares an HTTP response for `text/event-stream` delivery.
///
/// Holds no state, so a single instance can be shared and used concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct Upgrader;

impl Upgrader {
    pub fn new() -> Self {
        Self
    }

    /// Checks that `transport` can flush incrementally and sets the SSE
    /// response headers on it. Headers are left untouched on failure.
    pub fn upgrade<T: Flushable + ?Sized>(&self, transport: &mut T) -> Result<()> {
        if !transport.supports_flush() {
            warn!("Refusing SSE upgrade: transport does not support incremental flush");
            return Err(Error::streaming_unsupported());
        }

        let headers = transport.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/event-stream"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

        debug!("Upgraded response to SSE stream");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct FakeTransport {
        headers: HeaderMap,
        flushable: bool,
    }

    impl FakeTransport {
        fn new(flushable: bool) -> Self {
            Self {
                headers: HeaderMap::new(),
                flushable,
            }
        }
    }

    impl Flushable for FakeTransport {
        fn headers_mut(&mut self) -> &mut HeaderMap {
            &mut self.headers
        }

        fn supports_flush(&self) -> bool {
            self.flushable
        }
    }

    #[test]
    fn test_upgrade_sets_sse_headers() {
        let mut transport = FakeTransport::new(true);

        Upgrader::new().upgrade(&mut transport).unwrap();

        assert_eq!(transport.headers.len(), 3);
        assert_eq!(transport.headers[CONTENT_TYPE], "text/event-stream");
        assert_eq!(transport.headers[CACHE_CONTROL], "no-cache");
        assert_eq!(transport.headers[CONNECTION], "keep-alive");
    }

    #[test]
    fn test_upgrade_replaces_existing_content_type() {
        let mut transport = FakeTransport::new(true);
        transport
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        Upgrader::default().upgrade(&mut transport).unwrap();

        assert_eq!(
            transport.headers.get_all(CONTENT_TYPE).iter().count(),
            1,
            "content type should be replaced, not appended"
        );
        assert_eq!(transport.headers[CONTENT_TYPE], "text/event-stream");
    }

    #[test]
    fn test_upgrade_fails_without_flush_support() {
        let mut transport = FakeTransport::new(false);

        let err = Upgrader::new().upgrade(&mut transport).unwrap_err();

        assert_eq!(err.error_kind, ErrorKind::StreamingUnsupported);
        assert!(
            transport.headers.is_empty(),
            "headers should not be set on failure"
        );
    }
}

//! Server-Sent Events (SSE) encoding for streaming HTTP responses.
//!
//! This crate turns application events into the `text/event-stream` wire
//! format and prepares HTTP responses to carry it.
//!
//! # Architecture
//!
//! - **Event records**: [`Event`] is a plain holder of up to four raw byte
//!   fields (`id`, `event`, `retry`, `data`). It does no validation.
//! - **Stateless encoder**: [`write_event`] and [`write_event_async`] serialize
//!   a record into one buffer and hand it to the sink in a single write. Empty
//!   `id`/`event` and invalid or zero `retry` values are dropped, never
//!   reported as errors. Multi-line payloads become one `data:` line per line.
//! - **Caller-owned flushing**: the encoder never flushes. Callers flush once
//!   per logical message and serialize writes that share a sink.
//! - **Upgrader**: [`Upgrader`] refuses transports that can't flush
//!   incrementally and sets the `Content-Type`, `Cache-Control` and
//!   `Connection` headers SSE clients expect.
//!
//! # Example: Writing an event
//!
//! ```rust
//! use sse::{write_event, Event};
//!
//! let mut sink: Vec<u8> = Vec::new();
//! let event = Event::new("hello").with_id("1").with_event("greeting");
//!
//! write_event(&mut sink, &event).unwrap();
//! assert_eq!(sink, b"id:1\nevent:greeting\ndata:hello\n\n");
//! ```
//!
//! # Modules
//!
//! - `event`: the `Event` record
//! - `encoder`: wire format serialization for sync and async sinks
//! - `upgrader`: the `Flushable` transport trait and `Upgrader`
//! - `error`: crate error type with `Io` and `StreamingUnsupported` kinds

pub mod encoder;
pub mod error;
pub mod event;
pub mod upgrader;

pub use encoder::{encode, write_event, write_event_async};
pub use error::{Error, Result};
pub use event::Event;
pub use upgrader::{Flushable, Upgrader};

//! Serializes an [`Event`] into the `text/event-stream` wire format.
//!
//! Fields are emitted in the order `id`, `event`, `retry`, `data`, each as a
//! `<name>:<value>\n` line, followed by a blank line that ends the record.
//! The whole record is assembled in memory first and handed to the sink in a
//! single `write_all`, so a sink never sees a partially assembled record. The
//! sink is never flushed here.

use crate::error::Result;
use crate::event::Event;
use bytes::{BufMut, Bytes, BytesMut};
use log::*;
use std::io::Write;
use tokio::io::{AsyncWrite, AsyncWriteExt};

const ID: &[u8] = b"id:";
const EVENT: &[u8] = b"event:";
const RETRY: &[u8] = b"retry:";
const DATA: &[u8] = b"data:";
const LF: u8 = b'\n';
const CR: u8 = b'\r';

/// Encodes `event` into a complete SSE record, blank line included.
pub fn encode(event: &Event) -> Bytes {
    let mut buf = BytesMut::new();

    if let Some(id) = non_empty(&event.id) {
        put_field(&mut buf, ID, id);
    }
    if let Some(event_type) = non_empty(&event.event) {
        put_field(&mut buf, EVENT, event_type);
    }
    if let Some(retry) = valid_retry(&event.retry) {
        put_field(&mut buf, RETRY, retry);
    }
    put_data(&mut buf, event.data.as_deref().unwrap_or_default());

    buf.put_u8(LF);
    buf.freeze()
}

/// Encodes `event` and writes it to `sink` with a single `write_all`.
///
/// Fails only when the sink fails; the caller decides whether to retry. Once
/// the sink returns an error nothing more is written, except that
/// `ErrorKind::Interrupted` is retried by `write_all` as usual.
pub fn write_event<W: Write + ?Sized>(sink: &mut W, event: &Event) -> Result<()> {
    let record = encode(event);
    trace!("Writing SSE record ({} bytes)", record.len());

    sink.write_all(&record)?;
    Ok(())
}

/// Async counterpart of [`write_event`] for tokio sinks.
pub async fn write_event_async<W: AsyncWrite + Unpin + ?Sized>(
    sink: &mut W,
    event: &Event,
) -> Result<()> {
    let record = encode(event);
    trace!("Writing SSE record ({} bytes)", record.len());

    sink.write_all(&record).await?;
    Ok(())
}

fn non_empty(field: &Option<Bytes>) -> Option<&[u8]> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Returns the raw retry bytes when they are a base-10 `u64` other than zero.
fn valid_retry(retry: &Option<Bytes>) -> Option<&[u8]> {
    let raw = retry.as_deref()?;
    if raw.is_empty() || !raw.iter().all(u8::is_ascii_digit) {
        return None;
    }

    // Digits only, so this can only fail on overflow.
    let millis: u64 = std::str::from_utf8(raw).ok()?.parse().ok()?;
    (millis != 0).then_some(raw)
}

fn put_field(buf: &mut BytesMut, name: &[u8], value: &[u8]) {
    buf.reserve(name.len() + value.len() + 1);
    buf.put_slice(name);
    buf.put_slice(value);
    buf.put_u8(LF);
}

/// Writes one `data:` line per LF-terminated payload line. A CR directly
/// before the LF is dropped; any other CR is payload.
fn put_data(buf: &mut BytesMut, data: &[u8]) {
    let mut rest = data;
    while let Some(pos) = rest.iter().position(|&b| b == LF) {
        let line = &rest[..pos];
        put_field(buf, DATA, line.strip_suffix(&[CR]).unwrap_or(line));
        rest = &rest[pos + 1..];
    }
    put_field(buf, DATA, rest);
}

use crate::response::{ChannelSink, StreamingResponse};
use crate::Result;
use axum::extract::State;
use axum::response::Response;
use bytes::Bytes;
use log::*;
use service::AppState;
use sse::{write_event, Event, Upgrader};
use std::io::Write;
use std::time::Duration;

/// POST a name and receive a short greeting back as a stream of events.
///
/// The response is upgraded before anything is written, so a transport that
/// can't stream fails with a plain 500. The events themselves are produced on
/// a separate task, one flush per event, `echo_interval` apart.
pub async fn echo(State(app_state): State<AppState>, name: Bytes) -> Result<Response> {
    let mut streaming = StreamingResponse::new();
    Upgrader::new().upgrade(&mut streaming)?;

    let (response, sink) = streaming.into_parts();
    let interval = app_state.config.echo_interval();
    debug!("Echoing {} byte name every {:?}", name.len(), interval);

    tokio::spawn(stream_greeting(sink, name, interval));

    Ok(response)
}

async fn stream_greeting(mut sink: ChannelSink, name: Bytes, interval: Duration) {
    let payloads = greeting(&name);
    let last = payloads.len() - 1;

    for (i, payload) in payloads.into_iter().enumerate() {
        if let Err(e) = send(&mut sink, &Event::new(payload)) {
            warn!("Echo stream ended early: {e}");
            return;
        }
        if i < last {
            tokio::time::sleep(interval).await;
        }
    }

    debug!("Echo stream complete");
}

fn greeting(name: &[u8]) -> [Bytes; 4] {
    [
        Bytes::from([&b"Hi "[..], name, &b", "[..]].concat()),
        Bytes::from_static(b"Happy "),
        Bytes::from_static(b"New "),
        Bytes::from_static(b"Year!"),
    ]
}

fn send(sink: &mut ChannelSink, event: &Event) -> sse::Result<()> {
    write_event(sink, event)?;
    sink.flush()?;
    Ok(())
}

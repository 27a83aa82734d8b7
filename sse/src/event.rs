use bytes::Bytes;

/// A single Server-Sent Event record.
///
/// All four fields are optional raw byte strings. Nothing is validated here;
/// the encoder decides which fields make it onto the wire (see
/// [`crate::encoder::encode`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Event {
    /// Event identifier, sent as the `id:` field.
    pub id: Option<Bytes>,
    /// Event type label, sent as the `event:` field.
    pub event: Option<Bytes>,
    /// Reconnection interval in milliseconds, as base-10 text.
    pub retry: Option<Bytes>,
    /// Payload, sent as one or more `data:` lines.
    pub data: Option<Bytes>,
}

impl Event {
    /// Creates an event carrying only a payload.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: Some(data.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<Bytes>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_event(mut self, event: impl Into<Bytes>) -> Self {
        self.event = Some(event.into());
        self
    }

    pub fn with_retry(mut self, retry: impl Into<Bytes>) -> Self {
        self.retry = Some(retry.into());
        self
    }
}

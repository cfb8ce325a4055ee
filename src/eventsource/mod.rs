use async_stream::try_stream;
use futures::{pin_mut, Stream, StreamExt};
use std::pin::Pin;
use std::{
    fmt::{self, Display, Formatter},
    time::Duration,
};
use thiserror::Error;

use crate::core::StreamError;
use crate::gemini::ResponseChunk;

const EVENT_DELIMITERS: [&[u8]; 2] = [b"\r\n\r\n", b"\n\n"];
const LONGEST_DELIMITER: usize = 4;
const FIELD_SEPARATOR: char = ':';

/// Possible errors that can occur while parsing SSE events
#[derive(Error, Debug)]
pub enum EventError {
    #[error("invalid event format: event contains no data")]
    InvalidFormat,
}

/// A Server-Sent Event as emitted by `streamGenerateContent?alt=sse`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Event {
    pub id: Option<String>,
    /// Type of the event, `None` for the default `message` type
    pub event_type: Option<String>,
    pub data: String,
    /// Reconnection time in case of connection failure
    pub retry: Option<Duration>,
}

impl Display for Event {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Event {{ id: {:?}, event_type: {:?}, data: {}, retry: {:?} }}",
            self.id, self.event_type, self.data, self.retry
        )
    }
}

impl Event {
    /// Parses one SSE event block.
    ///
    /// Multiple `data` lines are joined with `\n`. Unknown fields, comment lines
    /// and a non-numeric `retry` are ignored. A block without any `data` line is
    /// [`EventError::InvalidFormat`].
    pub fn parse(input: &str) -> Result<Self, EventError> {
        let mut event = Self::default();
        let mut data_lines = Vec::new();

        for line in input.lines() {
            if line.is_empty() {
                continue;
            }

            if let Some((field, value)) = line.split_once(FIELD_SEPARATOR) {
                let value = value.strip_prefix(' ').unwrap_or(value);
                match field {
                    "id" => event.id = Some(value.to_string()),
                    "event" => event.event_type = Some(value.to_string()),
                    "data" => data_lines.push(value),
                    "retry" => {
                        if let Ok(ms) = value.parse::<u64>() {
                            event.retry = Some(Duration::from_millis(ms));
                        }
                    }
                    _ => {}
                }
            }
        }

        if data_lines.is_empty() {
            return Err(EventError::InvalidFormat);
        }

        event.data = data_lines.join("\n");
        Ok(event)
    }
}

/// Finds the end of the first complete event block starting at or after `from`,
/// and the length of its delimiter.
fn find_event_end(buffer: &[u8], from: usize) -> Option<(usize, usize)> {
    let tail = buffer.get(from..)?;
    EVENT_DELIMITERS
        .iter()
        .filter_map(|delimiter| {
            tail.windows(delimiter.len())
                .position(|window| window == *delimiter)
                .map(|end| (from + end, delimiter.len()))
        })
        .min_by_key(|(end, _)| *end)
}

pub type EventStream<E> = Pin<Box<dyn Stream<Item = Result<Event, E>> + Send>>;

/// Extension trait for turning a stream of raw byte chunks into SSE events.
pub trait EventSourceExt<E> {
    /// Bytes are buffered until a full event block arrives, so a multi-byte
    /// character split across chunks is decoded intact.
    fn events(self) -> EventStream<E>;
}

impl<S, B, E> EventSourceExt<E> for S
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Send + 'static,
{
    fn events(self) -> EventStream<E> {
        Box::pin(try_stream! {
            let stream = self;
            pin_mut!(stream);
            let mut buffer: Vec<u8> = Vec::with_capacity(1024);
            // Bytes before this offset hold no delimiter start.
            let mut scanned = 0;

            while let Some(chunk) = stream.next().await {
                buffer.extend_from_slice(chunk?.as_ref());

                while let Some((event_end, delimiter_len)) = find_event_end(&buffer, scanned) {
                    let parsed = Event::parse(&String::from_utf8_lossy(&buffer[..event_end]));
                    buffer.drain(..event_end + delimiter_len);
                    scanned = 0;
                    match parsed {
                        Ok(event) => {
                            yield event;
                        }
                        Err(EventError::InvalidFormat) => {}
                    }
                }
                scanned = buffer.len().saturating_sub(LONGEST_DELIMITER - 1);
            }

            if !buffer.is_empty() {
                match Event::parse(&String::from_utf8_lossy(&buffer)) {
                    Ok(event) => {
                        yield event;
                    }
                    Err(EventError::InvalidFormat) => {}
                }
            }
        })
    }
}

impl TryFrom<Event> for ResponseChunk {
    type Error = StreamError;

    fn try_from(event: Event) -> Result<Self, StreamError> {
        if event.data.trim().is_empty() {
            return Err(StreamError::Event(EventError::InvalidFormat));
        }
        Ok(serde_json::from_str(&event.data)?)
    }
}

/// Decodes a recorded or live SSE byte stream into response chunks.
pub fn chunk_stream<S, B, E>(
    bytes: S,
) -> impl Stream<Item = Result<ResponseChunk, StreamError>> + Send
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<StreamError> + Send + 'static,
{
    bytes.events().map(|event| {
        event
            .map_err(Into::into)
            .and_then(ResponseChunk::try_from)
    })
}

//! JSON-lines decoding
//! ===================
//!
//! Long-running endpoints answer with a sequence of JSON objects, one per
//! line, written as work progresses. Two decoders live here:
//!
//! * [`decode_status_stream`] – drains a model-lifecycle stream (pull, push,
//!   create, ...) into its ordered `status` strings, bounded by a maximum
//!   message count.
//! * [`ResponseStream`] – a lazy iterator over inference chunks
//!   (generate, chat) that stops after the chunk marked `done`.
//!
//! Both treat an object carrying an `error` field as a server-side failure.

use std::{io::Read, marker::PhantomData, time::Duration};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    error::{OllamaError, OllamaResult},
    transport::{BodyReader, error::{ClientError, error_field}},
};

/// One progress object of a model-lifecycle stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Human readable step, e.g. `"pulling manifest"` or `"success"`.
    #[serde(default)]
    pub status: String,

    /// Layer currently being transferred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,

    /// Size of the layer in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// Bytes of the layer transferred so far.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StatusUpdate {
    /// Fraction of the current layer transferred, when the server reports it.
    pub fn progress(&self) -> Option<f64> {
        match (self.completed, self.total) {
            (Some(completed), Some(total)) if total > 0 => Some(completed as f64 / total as f64),
            _ => None,
        }
    }
}

/// Reads status objects from `reader` until end of body and returns their
/// `status` strings in arrival order. `on_update` sees every object first.
///
/// At most `limit` messages are accepted: once `limit` have been read the
/// call fails with [`OllamaError::StreamLimit`], even when the body would
/// have ended right there. An empty body yields no messages. A failed read
/// is [`ClientError::Io`] (kind `TimedOut` for a read that ran out of
/// time), never a decode error.
pub fn decode_status_stream<R, F>(reader: R, limit: usize, mut on_update: F) -> OllamaResult<Vec<String>>
where
    R: Read,
    F: FnMut(&StatusUpdate),
{
    let mut updates = serde_json::Deserializer::from_reader(reader).into_iter::<StatusUpdate>();
    let mut messages = Vec::new();

    while messages.len() < limit {
        let Some(update) = updates.next() else {
            return Ok(messages);
        };
        let update = update.map_err(ClientError::from_stream)?;
        if let Some(message) = update.error {
            return Err(OllamaError::Stream { message });
        }
        on_update(&update);
        messages.push(update.status);
    }

    crate::warn!(limit, "status stream hit the message limit");
    Err(OllamaError::StreamLimit { limit })
}

/// Chunks that mark the end of their stream.
pub trait StreamChunk {
    fn is_done(&self) -> bool;
}

/// Lazy iterator over the chunks of a streamed inference response.
///
/// Iteration ends after the first chunk whose [`StreamChunk::is_done`] is
/// true, at end of body, or after the first error.
pub struct ResponseStream<T> {
    lines: serde_json::StreamDeserializer<'static, serde_json::de::IoRead<BodyReader>, serde_json::Value>,
    finished: bool,
    timeout: Option<Duration>,
    _chunk: PhantomData<fn() -> T>,
}

impl<T> ResponseStream<T> {
    pub fn new(reader: BodyReader) -> Self {
        Self {
            lines: serde_json::Deserializer::from_reader(reader).into_iter(),
            finished: false,
            timeout: None,
            _chunk: PhantomData,
        }
    }

    /// Reports a read that runs out of time as
    /// [`ClientError::Timeout`]`(timeout)` instead of a bare I/O error.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl<T> std::fmt::Debug for ResponseStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStream")
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl<T: DeserializeOwned + StreamChunk> Iterator for ResponseStream<T> {
    type Item = OllamaResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = match self.lines.next() {
            None => {
                self.finished = true;
                return None;
            }
            Some(Err(e)) => {
                let err = ClientError::from_stream(e);
                Err(match self.timeout {
                    Some(limit) => err.timed_out(limit),
                    None => err,
                }
                .into())
            }
            Some(Ok(line)) => match error_field(&line) {
                Some(message) => Err(OllamaError::Stream { message }),
                None => serde_json::from_value::<T>(line).map_err(|e| ClientError::from(e).into()),
            },
        };

        match &item {
            Ok(chunk) if !chunk.is_done() => {}
            _ => {
                self.finished = true;
                crate::trace!("response stream finished");
            }
        }
        Some(item)
    }
}

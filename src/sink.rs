use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::core::{OutputFormat, StreamError};
use crate::gemini::ResponseChunk;

/// Push-based downstream for forwarded chunks.
#[async_trait]
pub trait ChunkSink: Send {
    /// Accepts the next chunk in stream order.
    async fn send(&mut self, chunk: ResponseChunk) -> Result<(), StreamError>;

    /// Upstream is exhausted; no further chunks follow.
    async fn close(&mut self) -> Result<(), StreamError>;

    /// The stream failed; no further chunks follow.
    async fn abort(&mut self, error: &StreamError);
}

/// Buffers forwarded chunks in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    chunks: Vec<ResponseChunk>,
    closed: bool,
    failure: Option<String>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunks(&self) -> &[ResponseChunk] {
        &self.chunks
    }

    pub fn into_chunks(self) -> Vec<ResponseChunk> {
        self.chunks
    }

    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }
}

#[async_trait]
impl ChunkSink for VecSink {
    async fn send(&mut self, chunk: ResponseChunk) -> Result<(), StreamError> {
        if self.closed {
            return Err(StreamError::Sink("send after close".to_string()));
        }
        self.chunks.push(chunk);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), StreamError> {
        self.closed = true;
        Ok(())
    }

    async fn abort(&mut self, error: &StreamError) {
        self.failure = Some(error.to_string());
    }
}

/// Writes forwarded chunks to an async writer, either as JSON lines or as the
/// first candidate's text.
pub struct WriterSink<W> {
    writer: W,
    format: OutputFormat,
}

impl<W> WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub const fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[async_trait]
impl<W> ChunkSink for WriterSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, chunk: ResponseChunk) -> Result<(), StreamError> {
        match self.format {
            OutputFormat::Json => {
                let mut line = serde_json::to_vec(&chunk)?;
                line.push(b'\n');
                self.writer.write_all(&line).await?;
            }
            OutputFormat::Text => {
                if let Some(text) = chunk.text() {
                    self.writer.write_all(text.as_bytes()).await?;
                }
            }
        }
        self.writer.flush().await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), StreamError> {
        if self.format == OutputFormat::Text {
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    async fn abort(&mut self, _error: &StreamError) {
        let _ = self.writer.flush().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::Part;
    use serde_json::Map;

    fn chunks() -> Vec<ResponseChunk> {
        vec![
            ResponseChunk::from_parts(vec![Part::from_text("Hello, ")]),
            ResponseChunk::from_parts(vec![Part::function_call("f", Map::new())]),
            ResponseChunk::from_parts(vec![Part::from_text("world")]),
        ]
    }

    #[tokio::test]
    async fn test_writer_sink_json_lines() {
        let mut sink = WriterSink::new(Vec::new(), OutputFormat::Json);
        for chunk in chunks() {
            sink.send(chunk).await.unwrap();
        }
        sink.close().await.unwrap();

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let decoded: Vec<ResponseChunk> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(decoded, chunks());
    }

    #[tokio::test]
    async fn test_writer_sink_text() {
        let mut sink = WriterSink::new(Vec::new(), OutputFormat::Text);
        for chunk in chunks() {
            sink.send(chunk).await.unwrap();
        }
        sink.close().await.unwrap();

        assert_eq!(sink.into_inner(), b"Hello, world\n");
    }

    #[tokio::test]
    async fn test_vec_sink_rejects_send_after_close() {
        let mut sink = VecSink::new();
        sink.close().await.unwrap();
        let err = sink.send(ResponseChunk::default()).await.unwrap_err();
        assert!(matches!(err, StreamError::Sink(_)));
    }
}

//! Server-Sent Events (SSE) parser for DeepSeek streaming responses

use bytes::Bytes;
use futures::stream::Stream;
use futures::StreamExt;
use std::pin::Pin;

use super::error::LlmError;
use super::types::StreamChunk;

/// Parse a stream of bytes as chat-completion SSE chunks
///
/// The OpenAI-compatible SSE format is a sequence of data-only frames:
/// ```text
/// data: {"choices":[{"delta":{"content":"Hi"}}]}
///
/// data: [DONE]
/// ```
///
/// This parser:
/// 1. Buffers incoming bytes
/// 2. Scans for frame boundaries (double newline)
/// 3. Extracts and parses JSON from `data:` lines
/// 4. Ends the stream at the `[DONE]` sentinel
pub fn parse_sse_stream(
    byte_stream: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send + Sync>>,
) -> Pin<Box<dyn Stream<Item = Result<StreamChunk, LlmError>> + Send + Sync>> {
    // Buffer raw bytes; network chunks split at arbitrary byte boundaries,
    // including mid-character, so only complete frames are decoded as UTF-8
    let mut buffer: Vec<u8> = Vec::new();
    let mut finished = false;

    let chunk_stream = byte_stream.flat_map(move |chunk_result| {
        if finished {
            return futures::stream::iter(Vec::new());
        }

        let chunk = match chunk_result {
            Ok(bytes) => bytes,
            Err(e) => {
                return futures::stream::iter(vec![Err(LlmError::Stream(e.to_string()))]);
            }
        };

        buffer.extend_from_slice(&chunk);

        // Process complete frames (delimited by \n\n)
        let mut chunks = Vec::new();
        while let Some(frame_end) = find_frame_boundary(&buffer) {
            let frame_bytes: Vec<u8> = buffer.drain(..frame_end + 2).collect();

            let frame_text = match std::str::from_utf8(&frame_bytes[..frame_end]) {
                Ok(t) => t,
                Err(e) => {
                    chunks.push(Err(LlmError::Stream(format!(
                        "Invalid UTF-8 in stream: {}",
                        e
                    ))));
                    continue;
                }
            };

            match parse_frame(frame_text) {
                Some(SseFrame::Done) => {
                    finished = true;
                    break;
                }
                Some(SseFrame::Chunk(parsed)) => chunks.push(parsed),
                None => {}
            }
        }

        futures::stream::iter(chunks)
    });

    Box::pin(chunk_stream)
}

fn find_frame_boundary(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|pair| pair == b"\n\n")
}

enum SseFrame {
    Chunk(Result<StreamChunk, LlmError>),
    Done,
}

/// Parse a single SSE frame from its text representation
fn parse_frame(frame_text: &str) -> Option<SseFrame> {
    let mut data: Option<String> = None;

    for line in frame_text.lines() {
        let line = line.trim();

        // Skip empty lines and keep-alive comments
        if line.is_empty() || line.starts_with(':') {
            continue;
        }

        if let Some(data_val) = line.strip_prefix("data:") {
            data = Some(data_val.trim().to_string());
        }
    }

    let data = data?;

    if data.is_empty() {
        return None;
    }

    if data == "[DONE]" {
        return Some(SseFrame::Done);
    }

    match serde_json::from_str::<StreamChunk>(&data) {
        Ok(chunk) => Some(SseFrame::Chunk(Ok(chunk))),
        Err(e) => Some(SseFrame::Chunk(Err(LlmError::Serialization(format!(
            "Failed to parse SSE chunk: {}. Data: {}",
            e, data
        ))))),
    }
}

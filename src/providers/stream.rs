/*!
 * Helpers for consuming streamed HTTP responses.
 *
 * Both generation backends stream line-oriented bodies (SSE for Gemini,
 * NDJSON for Ollama). `lines` reassembles complete lines from arbitrary byte
 * chunks, and `collect_text` buffers a whole fragment stream.
 */

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use std::collections::VecDeque;
use std::fmt::Display;

use crate::errors::ProviderError;

struct LineState<S> {
    inner: S,
    buffer: Vec<u8>,
    pending: VecDeque<String>,
    finished: bool,
}

impl<S> LineState<S> {
    fn drain_complete_lines(&mut self) {
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let mut line: Vec<u8> = self.buffer.drain(..=pos).collect();
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            self.pending.push_back(String::from_utf8_lossy(&line).into_owned());
        }
    }
}

/// Split a byte stream into lines without the trailing `\n` / `\r\n`.
///
/// Multi-byte characters split across chunks are reassembled before decoding.
/// A final unterminated line is emitted when the stream ends.
pub fn lines<S, E>(inner: S) -> impl Stream<Item = Result<String, ProviderError>>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Display,
{
    let state = LineState {
        inner,
        buffer: Vec::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(line) = state.pending.pop_front() {
                return Some((Ok(line), state));
            }
            if state.finished {
                return None;
            }
            match state.inner.next().await {
                Some(Ok(chunk)) => {
                    state.buffer.extend_from_slice(&chunk);
                    state.drain_complete_lines();
                }
                Some(Err(e)) => {
                    state.finished = true;
                    return Some((Err(ProviderError::ConnectionError(e.to_string())), state));
                }
                None => {
                    state.finished = true;
                    if !state.buffer.is_empty() {
                        let rest = std::mem::take(&mut state.buffer);
                        state.pending.push_back(String::from_utf8_lossy(&rest).into_owned());
                    }
                }
            }
        }
    })
}

/// Concatenate every fragment of a text stream, skipping empty ones
pub async fn collect_text<S>(mut fragments: S) -> Result<String, ProviderError>
where
    S: Stream<Item = Result<String, ProviderError>> + Unpin,
{
    let mut output = String::new();
    let mut count = 0usize;
    while let Some(fragment) = fragments.next().await {
        let fragment = fragment?;
        if fragment.is_empty() {
            continue;
        }
        count += 1;
        output.push_str(&fragment);
    }
    log::debug!("Received {} fragments ({} bytes)", count, output.len());
    Ok(output)
}

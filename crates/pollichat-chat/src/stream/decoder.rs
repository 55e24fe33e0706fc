use async_stream::try_stream;
use futures::{Stream, StreamExt};
use std::mem;

/// Incremental UTF-8 line splitter.
///
/// Bytes arrive in arbitrary pieces: a multi-byte character or a line may be
/// cut anywhere. Incomplete characters wait in `partial`, incomplete lines in
/// `buffer`, and only newline-terminated lines are ever returned.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    buffer: String,
    partial: Vec<u8>,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every line it completes, in order.
    ///
    /// Lines come back without their terminator; a `\r` before the `\n` is
    /// dropped as well. Invalid byte sequences decode to U+FFFD.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode(chunk);
        self.drain_lines()
    }

    /// Text still waiting for a terminator (not yet returned by `push`)
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Consume the decoder at end of stream.
    ///
    /// The unterminated tail is never parsed; it is handed back only so the
    /// caller can log what was dropped.
    pub fn finish(self) -> Option<String> {
        let mut rest = self.buffer;
        if !self.partial.is_empty() {
            rest.push_str(&String::from_utf8_lossy(&self.partial));
        }
        if rest.is_empty() {
            None
        } else {
            Some(rest)
        }
    }

    fn decode(&mut self, chunk: &[u8]) {
        let mut bytes = mem::take(&mut self.partial);
        bytes.extend_from_slice(chunk);

        let mut rest: &[u8] = &bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    self.buffer.push_str(text);
                    return;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    self.buffer.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            self.buffer.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            // Truncated sequence at the end: wait for more bytes
                            self.partial = after.to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }

    fn drain_lines(&mut self) -> Vec<String> {
        let Some(last_newline) = self.buffer.rfind('\n') else {
            return Vec::new();
        };

        let tail = self.buffer.split_off(last_newline + 1);
        let complete = mem::replace(&mut self.buffer, tail);

        complete[..complete.len() - 1]
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect()
    }
}

/// Turn a stream of byte chunks into a stream of complete lines.
///
/// A transport error is yielded once and ends the stream.
pub fn decode_lines<S, E>(chunks: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<Vec<u8>, E>> + Unpin,
{
    try_stream! {
        let mut chunks = chunks;
        let mut decoder = ChunkDecoder::new();

        while let Some(chunk) = chunks.next().await {
            let chunk = chunk?;
            for line in decoder.push(&chunk) {
                yield line;
            }
        }

        if let Some(rest) = decoder.finish() {
            log::debug!("discarding {} unterminated bytes at end of stream", rest.len());
        }
    }
}

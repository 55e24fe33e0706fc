use serde_json::Value;

use pollichat_logging::log_stream_chunk;
use pollichat_models::StreamChunk;

/// Prefix of lines that carry an event payload
pub const DATA_PREFIX: &str = "data: ";

/// Payload that ends the stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// What a single line contributes to the reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    Token(String),
    Done,
    Ignored,
}

type Extractor = fn(&StreamChunk) -> Option<&str>;

/// Candidate token locations, first non-empty one wins
const EXTRACTORS: [Extractor; 3] = [
    StreamChunk::delta_content,
    StreamChunk::choice_text,
    StreamChunk::top_level_content,
];

/// Classify one decoded line. Anything not starting with `data: ` is ignored.
pub fn parse_line(line: &str) -> StreamEvent {
    match line.strip_prefix(DATA_PREFIX) {
        Some(payload) => parse_payload(payload),
        None => StreamEvent::Ignored,
    }
}

/// Classify the payload of a `data:` line.
///
/// JSON payloads yield the first non-empty text among the known token
/// locations. Payloads that are not JSON are passed through as plain text
/// after trimming, so no line ever aborts the stream.
pub fn parse_payload(payload: &str) -> StreamEvent {
    if payload == DONE_SENTINEL {
        return StreamEvent::Done;
    }

    match serde_json::from_str::<Value>(payload) {
        Ok(value) => {
            let chunk = StreamChunk::from(value);
            EXTRACTORS
                .iter()
                .filter_map(|extract| extract(&chunk))
                .find(|text| !text.is_empty())
                .map(|text| StreamEvent::Token(text.to_string()))
                .unwrap_or(StreamEvent::Ignored)
        }
        Err(_) => match payload.trim() {
            "" => StreamEvent::Ignored,
            DONE_SENTINEL => StreamEvent::Done,
            text => StreamEvent::Token(text.to_string()),
        },
    }
}

/// Line parser for one response, logging each payload in verbose mode
#[derive(Debug, Default)]
pub struct EventParser {
    verbose: bool,
    data_lines: usize,
}

impl EventParser {
    pub fn new(verbose: bool) -> Self {
        Self { verbose, data_lines: 0 }
    }

    pub fn parse(&mut self, line: &str) -> StreamEvent {
        if let Some(payload) = line.strip_prefix(DATA_PREFIX) {
            self.data_lines += 1;
            log_stream_chunk(self.data_lines, payload, self.verbose);
        }
        parse_line(line)
    }

    /// Number of `data:` lines seen so far
    pub fn data_lines(&self) -> usize {
        self.data_lines
    }
}

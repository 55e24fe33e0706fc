//! Response body handling: bytes to lines, lines to events.

mod decoder;
mod parser;

pub use decoder::{decode_lines, ChunkDecoder};
pub use parser::{parse_line, parse_payload, EventParser, StreamEvent, DATA_PREFIX, DONE_SENTINEL};

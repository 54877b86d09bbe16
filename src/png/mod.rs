//! PNG container parsing: signature, chunk stream, known-chunk field schemas.
//!
//! Chunks are walked without CRC validation or pixel decoding; payloads are
//! recorded as spans and known chunk names are additionally decoded through
//! the declarative schemas in [`crate::schema`].

mod chunks;

pub use chunks::{known_schema, parse_png, Chunk, ChunkName, PngFile, PNG_SIGNATURE};

//! ICC color profile parsing.
//!
//! Operates on an already-inflated profile payload (PNG `iCCP` callers run
//! their DEFLATE decompressor first). Header attributes and the known tag
//! table entries are decoded into a flat keyword map.

mod reader;

pub use reader::{parse_icc, IccProfile, IccValue};

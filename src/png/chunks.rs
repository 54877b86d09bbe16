//! PNG chunk stream walker.

use core::fmt;

use crate::cursor::{ByteCursor, Endian};
use crate::error::ParseError;
use crate::schema::{read_record, FieldKind, FieldMap, RecordSchema};
use crate::span::Span;

/// The 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Four-byte ASCII chunk name.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkName(pub [u8; 4]);

impl ChunkName {
    /// The name as a string, for display and schema lookup.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl fmt::Debug for ChunkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for ChunkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ChunkName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One chunk of the stream.
///
/// `parsed_fields` is present exactly when the name has a known schema;
/// unknown (ancillary) chunks are preserved undecoded, per the PNG spec's
/// allowance for private chunks.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Chunk {
    pub name: ChunkName,
    /// Payload span, excluding the 12 bytes of framing (length, name, CRC).
    pub raw_data: Span,
    /// Declared CRC. Recorded, not validated.
    pub crc: u32,
    pub parsed_fields: Option<FieldMap>,
}

/// A parsed PNG file: the signature span plus every chunk in stream order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PngFile {
    /// Always covers the first 8 bytes.
    pub header_span: Span,
    pub chunks: Vec<Chunk>,
}

impl PngFile {
    /// Human-readable structure dump, one line per chunk.
    pub fn summary(&self, data: &[u8]) -> Vec<String> {
        let mut lines = vec![format!("{} chunk(s)", self.chunks.len())];
        for chunk in &self.chunks {
            let mut line = format!(
                "{} [{}..{}) {} bytes",
                chunk.name, chunk.raw_data.start, chunk.raw_data.end, chunk.raw_data.len()
            );
            if let Some(fields) = &chunk.parsed_fields {
                use crate::schema::FieldValue;
                let rendered: Vec<String> = fields
                    .iter()
                    .map(|(name, value)| match value {
                        FieldValue::U8(v) => format!("{name}={v}"),
                        FieldValue::U16(v) => format!("{name}={v}"),
                        FieldValue::U32(v) => format!("{name}={v}"),
                        FieldValue::Str(s) => format!(
                            "{name}={:?}",
                            String::from_utf8_lossy(s.bytes(data)).trim_end_matches('\0')
                        ),
                        FieldValue::Bytes(s) => format!("{name}=<{} bytes>", s.len()),
                    })
                    .collect();
                line.push_str(&format!(" {{{}}}", rendered.join(", ")));
            }
            lines.push(line);
        }
        lines
    }
}

const IHDR: RecordSchema = &[
    ("width", FieldKind::U32),
    ("height", FieldKind::U32),
    ("bit_depth", FieldKind::U8),
    ("color_type", FieldKind::U8),
    ("compression_method", FieldKind::U8),
    ("filter_method", FieldKind::U8),
    ("interlace_method", FieldKind::U8),
];
const IDAT: RecordSchema = &[("buffer", FieldKind::Rest)];
const IEND: RecordSchema = &[];
const PHYS: RecordSchema = &[
    ("ppu_x", FieldKind::U32),
    ("ppu_y", FieldKind::U32),
    ("unit", FieldKind::U8),
];
const CHRM: RecordSchema = &[
    ("wpx", FieldKind::U32),
    ("wpy", FieldKind::U32),
    ("rx", FieldKind::U32),
    ("ry", FieldKind::U32),
    ("gx", FieldKind::U32),
    ("gy", FieldKind::U32),
    ("bx", FieldKind::U32),
    ("by", FieldKind::U32),
];
const ICCP: RecordSchema = &[
    ("profile_name", FieldKind::NullTerminated),
    ("compression_method", FieldKind::U8),
    ("compressed_profile", FieldKind::Rest),
];
const ZTXT: RecordSchema = &[
    ("keyword", FieldKind::NullTerminated),
    ("compression_method", FieldKind::U8),
    ("compressed_text", FieldKind::Rest),
];
const EXIF: RecordSchema = &[("buffer", FieldKind::Rest)];
const TEXT: RecordSchema = &[
    ("keyword", FieldKind::NullTerminated),
    ("text", FieldKind::Rest),
];
const TIME: RecordSchema = &[
    ("year", FieldKind::U16),
    ("month", FieldKind::U8),
    ("day", FieldKind::U8),
    ("hour", FieldKind::U8),
    ("minute", FieldKind::U8),
    ("second", FieldKind::U8),
];
const GAMA: RecordSchema = &[("gamma", FieldKind::U32)];
const SRGB: RecordSchema = &[("rendering_intent", FieldKind::U8)];

/// Schema for a known chunk name, or `None` for chunks that are kept
/// undecoded.
pub fn known_schema(name: ChunkName) -> Option<RecordSchema> {
    match &name.0 {
        b"IHDR" => Some(IHDR),
        b"IDAT" => Some(IDAT),
        b"IEND" => Some(IEND),
        b"pHYs" => Some(PHYS),
        b"cHRM" => Some(CHRM),
        b"iCCP" => Some(ICCP),
        b"zTXt" => Some(ZTXT),
        b"eXIf" => Some(EXIF),
        b"tEXt" => Some(TEXT),
        b"tIME" => Some(TIME),
        b"gAMA" => Some(GAMA),
        b"sRGB" => Some(SRGB),
        _ => None,
    }
}

/// Parse a PNG byte stream. `data` must begin with the 8-byte signature.
pub fn parse_png(data: &[u8]) -> Result<PngFile, ParseError> {
    if data.len() < PNG_SIGNATURE.len() {
        return Err(ParseError::EndOfInput);
    }
    // Network byte order throughout.
    let mut cursor = ByteCursor::new(data, Endian::Big);
    if !cursor.consume_if_equals(&PNG_SIGNATURE) {
        return Err(ParseError::BadSignature { format: "PNG" });
    }
    let header_span = Span::new(0, PNG_SIGNATURE.len());

    let mut chunks = Vec::new();
    while !cursor.at_end() {
        chunks.push(read_chunk(&mut cursor)?);
    }
    Ok(PngFile { header_span, chunks })
}

fn read_chunk(cursor: &mut ByteCursor<'_>) -> Result<Chunk, ParseError> {
    let length = cursor.read_u32()? as usize;
    let name_span = cursor.get_span(4)?;
    let name_bytes = cursor.bytes_for_span(name_span);
    let name = ChunkName([name_bytes[0], name_bytes[1], name_bytes[2], name_bytes[3]]);
    let raw_data = cursor.get_span(length)?;

    let parsed_fields = match known_schema(name) {
        Some(schema) => {
            // Re-walk the payload span with the schema; a failure here means
            // the chunk body contradicts its declared layout.
            let mut sub = cursor.clone();
            sub.seek(raw_data.start)?;
            let fields = read_record(&mut sub, raw_data.end, schema).map_err(|_| {
                ParseError::SchemaMismatch { chunk_name: name.as_str().to_string() }
            })?;
            Some(fields)
        }
        None => None,
    };

    let crc = cursor.read_u32()?;
    Ok(Chunk { name, raw_data, crc, parsed_fields })
}

//! # rasterlens
//!
//! Library to parse raster image container formats — PNG, GIF, BMP, ZIP,
//! EXIF/TIFF IFDs and ICC color profiles — into structured, inspectable
//! records. Every parsed field keeps the half-open `[start, end)` byte range
//! it was read from, so a result can be cross-referenced against the input
//! byte-for-byte.
//!
//! Designed for **high throughput**: slice-based parsing with no I/O, no
//! interior caches, and results that hold plain data (spans, not borrowed
//! slices), so disjoint inputs parse freely in parallel.
//!
//! ## Supported formats
//!
//! - **PNG** — chunk stream with declarative per-chunk field schemas;
//!   unknown chunk names are preserved undecoded. CRCs are recorded, not
//!   validated.
//! - **GIF** — logical screen descriptor, color tables, all four extension
//!   kinds, image descriptors, and LZW image data (decoded on demand into a
//!   palette index stream).
//! - **BMP** — BITMAPINFOHEADER / BITMAPV5HEADER dispatch, palette, pixel
//!   data span.
//! - **ZIP** — End-of-Central-Directory located by reverse scan, then the
//!   Central Directory File Headers.
//! - **EXIF/TIFF** — root, EXIF and GPS IFDs with typed values and the
//!   inline-vs-pointer storage rule; byte order honors the `II`/`MM` marker.
//! - **ICC** — header attributes plus `desc`/`text`/`mluc`/`XYZ` tag types;
//!   callers inflate compressed profiles first (`iCCP` payloads are
//!   DEFLATE-compressed).
//!
//! ## Example
//!
//! ```no_run
//! let bytes = std::fs::read("photo.png").unwrap();
//! match rasterlens::parse(&bytes) {
//!     Ok(parsed) => println!("{}", parsed.summary(&bytes).join("\n")),
//!     Err(err) => eprintln!("unparseable: {err}"),
//! }
//! ```

mod bits;
mod cursor;
mod error;
mod schema;
mod span;

pub mod bmp;
pub mod exif;
pub mod gif;
pub mod icc;
pub mod png;
pub mod zip;

pub use bits::BitCursor;
pub use cursor::{ByteCursor, Endian};
pub use error::ParseError;
pub use schema::{read_record, FieldKind, FieldMap, FieldValue, RecordSchema};
pub use span::Span;

pub use bmp::parse_bmp;
pub use exif::parse_exif;
pub use gif::{decode_gif_image, parse_gif};
pub use icc::parse_icc;
pub use png::parse_png;
pub use zip::parse_zip;

/// File type hint for routing (by magic bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FileType {
    Png,
    Gif,
    Bmp,
    Zip,
    Tiff,
    Icc,
    Unknown,
}

impl FileType {
    /// Preferred extension for this type (e.g. "png"); `None` for Unknown.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            FileType::Png => Some("png"),
            FileType::Gif => Some("gif"),
            FileType::Bmp => Some("bmp"),
            FileType::Zip => Some("zip"),
            FileType::Tiff => Some("tif"),
            FileType::Icc => Some("icc"),
            FileType::Unknown => None,
        }
    }

    /// Short label for display (e.g. "PNG", "EXIF/TIFF").
    pub fn label(self) -> &'static str {
        match self {
            FileType::Png => "PNG",
            FileType::Gif => "GIF",
            FileType::Bmp => "BMP",
            FileType::Zip => "ZIP",
            FileType::Tiff => "EXIF/TIFF",
            FileType::Icc => "ICC",
            FileType::Unknown => "unknown",
        }
    }
}

/// Detect file type from magic bytes (no extension needed).
/// Use this to guess format when the path has no extension or to validate content.
#[inline]
pub fn detect_file_type(data: &[u8]) -> FileType {
    if data.starts_with(&png::PNG_SIGNATURE) {
        return FileType::Png;
    }
    if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        return FileType::Gif;
    }
    if data.starts_with(b"BM") {
        return FileType::Bmp;
    }
    if data.starts_with(b"PK\x03\x04") || data.starts_with(b"PK\x05\x06") {
        return FileType::Zip;
    }
    if data.starts_with(b"II\x2A\x00") || data.starts_with(b"MM\x00\x2A") {
        return FileType::Tiff;
    }
    if data.len() >= 40 && &data[36..40] == b"acsp" {
        return FileType::Icc;
    }
    FileType::Unknown
}

/// A parse result for any supported container.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParsedFile {
    Png(png::PngFile),
    Gif(gif::GifFile),
    Bmp(bmp::BmpFile),
    Zip(zip::ZipArchive),
    Exif(exif::ExifData),
    Icc(icc::IccProfile),
}

impl ParsedFile {
    pub fn file_type(&self) -> FileType {
        match self {
            ParsedFile::Png(_) => FileType::Png,
            ParsedFile::Gif(_) => FileType::Gif,
            ParsedFile::Bmp(_) => FileType::Bmp,
            ParsedFile::Zip(_) => FileType::Zip,
            ParsedFile::Exif(_) => FileType::Tiff,
            ParsedFile::Icc(_) => FileType::Icc,
        }
    }

    /// Human-readable structure dump. `data` must be the buffer the record
    /// was parsed from; spans are resolved against it.
    pub fn summary(&self, data: &[u8]) -> Vec<String> {
        match self {
            ParsedFile::Png(f) => f.summary(data),
            ParsedFile::Gif(f) => f.summary(),
            ParsedFile::Bmp(f) => f.summary(data),
            ParsedFile::Zip(f) => f.summary(data),
            ParsedFile::Exif(f) => f.summary(),
            ParsedFile::Icc(f) => f.summary(),
        }
    }
}

/// Parse file bytes, dispatching by format from the magic bytes.
#[inline]
pub fn parse(data: &[u8]) -> Result<ParsedFile, ParseError> {
    match detect_file_type(data) {
        FileType::Png => Ok(ParsedFile::Png(parse_png(data)?)),
        FileType::Gif => Ok(ParsedFile::Gif(parse_gif(data)?)),
        FileType::Bmp => Ok(ParsedFile::Bmp(parse_bmp(data)?)),
        FileType::Zip => Ok(ParsedFile::Zip(parse_zip(data)?)),
        FileType::Tiff => Ok(ParsedFile::Exif(parse_exif(data)?)),
        FileType::Icc => Ok(ParsedFile::Icc(parse_icc(data)?)),
        FileType::Unknown => {
            if data.is_empty() {
                Err(ParseError::EndOfInput)
            } else {
                Err(ParseError::BadSignature { format: "raster container" })
            }
        }
    }
}

/// Result of parsing one item in a batch (path or index + parse result).
#[derive(Debug, Clone)]
pub struct BatchItem<T> {
    pub path_or_id: T,
    pub result: Result<ParsedFile, ParseError>,
}

/// Parse many buffers in sequence. For parallel throughput enable the
/// `parallel` feature and use [`parse_batch_parallel`].
pub fn parse_batch<I, B>(items: I) -> Vec<BatchItem<B>>
where
    I: IntoIterator<Item = (B, Vec<u8>)>,
    B: Clone,
{
    items
        .into_iter()
        .map(|(path_or_id, bytes)| BatchItem { path_or_id, result: parse(&bytes) })
        .collect()
}

/// Parse many buffers on the rayon thread pool. Parsers share no mutable
/// state, so inputs split freely across workers.
#[cfg(feature = "parallel")]
pub fn parse_batch_parallel<B>(items: Vec<(B, Vec<u8>)>) -> Vec<BatchItem<B>>
where
    B: Clone + Send,
{
    use rayon::prelude::*;
    items
        .into_par_iter()
        .map(|(path_or_id, bytes)| BatchItem { path_or_id, result: parse(&bytes) })
        .collect()
}

//! GIF header, logical screen descriptor, extensions and image stream.
//! All multi-byte integers are little-endian.

use crate::cursor::{ByteCursor, Endian};
use crate::error::ParseError;
use crate::gif::lzw::decode_lzw;
use crate::span::Span;

/// Marks the end of the data stream.
pub const GIF_TRAILER: u8 = 0x3B;
/// Introduces an image descriptor.
pub const IMAGE_SEPARATOR: u8 = 0x2C;
/// Introduces an extension block.
pub const EXTENSION_INTRODUCER: u8 = 0x21;

/// Logical Screen Descriptor: canvas geometry plus the packed flag byte and
/// its derived bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LogicalScreenDescriptor {
    pub width: u16,
    pub height: u16,
    pub packed: u8,
    pub bg_color_index: u8,
    pub pixel_aspect_ratio: u8,
    pub span: Span,
    pub has_gct: bool,
    pub sorted: bool,
    /// 3-bit size field; the table holds `2^(gct_size+1)` entries.
    pub gct_size: u8,
    pub color_resolution: u8,
}

/// A global or local color table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColorTable {
    pub colors: Vec<(u8, u8, u8)>,
    pub span: Span,
}

/// Image Descriptor: placement, geometry and the packed flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ImageDescriptor {
    pub left: u16,
    pub top: u16,
    pub width: u16,
    pub height: u16,
    pub packed: u8,
    pub span: Span,
    pub has_lct: bool,
    pub interlaced: bool,
    pub sorted: bool,
    pub lct_size: u8,
}

/// Graphics Control Extension (label 0xF9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GraphicsControlExt {
    pub block_size: u8,
    pub packed: u8,
    pub delay_time: u16,
    pub transparent_color_index: u8,
    pub block_terminator: u8,
    pub span: Span,
    pub reserved: u8,
    pub disposal: u8,
    pub wait_for_input: bool,
    pub has_transparent_color: bool,
}

/// Application Extension (label 0xFF), e.g. `NETSCAPE2.0` looping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ApplicationExt {
    pub block_length: u8,
    pub identifier: Span,
    pub sub_index: u8,
    pub num_executions: u16,
    pub terminator: u16,
    pub span: Span,
}

/// Comment Extension (label 0xFE): the sub-block stream as bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommentExt {
    pub text: Vec<u8>,
    pub span: Span,
}

/// Plain Text Extension (label 0x01).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlainTextExt {
    pub num_bytes_to_skip: u8,
    pub skipped: Span,
    pub text: Vec<u8>,
    pub span: Span,
}

/// One extension block, discriminated by its label byte.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Extension {
    GraphicsControl(GraphicsControlExt),
    Application(ApplicationExt),
    Comment(CommentExt),
    PlainText(PlainTextExt),
}

/// One image: the extensions preceding it, its descriptor, optional local
/// color table, and the concatenated LZW data.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GifImage {
    pub descriptor: ImageDescriptor,
    pub local_color_table: Option<ColorTable>,
    pub extensions: Vec<Extension>,
    pub min_code_size: u8,
    /// Sub-block payloads, concatenated; still LZW-compressed.
    pub data: Vec<u8>,
    /// From the first extension (or descriptor) through the sub-block
    /// terminator. The byte at `span.end` of the last image is the trailer.
    pub span: Span,
}

/// A parsed GIF file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GifFile {
    /// The 6-byte `GIF87a`/`GIF89a` header.
    pub header: Span,
    pub lsd: LogicalScreenDescriptor,
    pub global_color_table: Option<ColorTable>,
    pub images: Vec<GifImage>,
}

impl GifFile {
    /// Human-readable structure dump.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "canvas {}x{}, color resolution {}",
            self.lsd.width, self.lsd.height, self.lsd.color_resolution
        )];
        match &self.global_color_table {
            Some(table) => lines.push(format!("global color table: {} entries", table.colors.len())),
            None => lines.push("no global color table".to_string()),
        }
        for (i, image) in self.images.iter().enumerate() {
            let d = &image.descriptor;
            lines.push(format!(
                "image {}: {}x{} at ({},{}), {} extension(s), {} data bytes{}",
                i,
                d.width,
                d.height,
                d.left,
                d.top,
                image.extensions.len(),
                image.data.len(),
                if image.local_color_table.is_some() { ", local color table" } else { "" },
            ));
        }
        lines
    }
}

/// Parse a GIF byte stream. `data` must begin with `GIF87a` or `GIF89a`.
pub fn parse_gif(data: &[u8]) -> Result<GifFile, ParseError> {
    if data.len() < 6 {
        return Err(ParseError::EndOfInput);
    }
    let mut cursor = ByteCursor::new(data, Endian::Little);
    if !cursor.consume_if_equals(b"GIF87a") && !cursor.consume_if_equals(b"GIF89a") {
        return Err(ParseError::BadSignature { format: "GIF" });
    }
    let header = Span::new(0, 6);

    let lsd = read_lsd(&mut cursor)?;
    let global_color_table = if lsd.has_gct {
        Some(read_color_table(&mut cursor, 3 * (1usize << (lsd.gct_size + 1)))?)
    } else {
        None
    };

    let mut images = Vec::new();
    while cursor.peek() != Some(GIF_TRAILER) {
        images.push(read_image(&mut cursor)?);
    }
    cursor.expect_byte(GIF_TRAILER)?;
    if !cursor.at_end() {
        return Err(ParseError::TrailingBytes);
    }

    Ok(GifFile { header, lsd, global_color_table, images })
}

/// Decode an image's LZW data into its palette index stream.
///
/// Decoding requires a reachable palette — the image's local color table or
/// the file's global one; with neither there is nothing the indices could
/// refer to and the stream is left undecoded (empty output).
pub fn decode_gif_image(gif: &GifFile, image: &GifImage) -> Result<Vec<u8>, ParseError> {
    if image.local_color_table.is_none() && gif.global_color_table.is_none() {
        return Ok(Vec::new());
    }
    decode_lzw(image.min_code_size, &image.data)
}

fn read_lsd(cursor: &mut ByteCursor<'_>) -> Result<LogicalScreenDescriptor, ParseError> {
    let start = cursor.position();
    let width = cursor.read_u16()?;
    let height = cursor.read_u16()?;
    let packed = cursor.next()?;
    let bg_color_index = cursor.next()?;
    let pixel_aspect_ratio = cursor.next()?;
    Ok(LogicalScreenDescriptor {
        width,
        height,
        packed,
        bg_color_index,
        pixel_aspect_ratio,
        span: Span::new(start, cursor.position()),
        has_gct: packed & 0x80 != 0,
        sorted: packed & 0x08 != 0,
        gct_size: packed & 0b111,
        color_resolution: (packed >> 4) & 0b111,
    })
}

fn read_color_table(cursor: &mut ByteCursor<'_>, byte_len: usize) -> Result<ColorTable, ParseError> {
    if byte_len % 3 != 0 {
        return Err(ParseError::InvalidColorTableLength { len: byte_len });
    }
    let span = cursor.get_span(byte_len)?;
    let colors = cursor
        .bytes_for_span(span)
        .chunks_exact(3)
        .map(|rgb| (rgb[0], rgb[1], rgb[2]))
        .collect();
    Ok(ColorTable { colors, span })
}

fn read_image(cursor: &mut ByteCursor<'_>) -> Result<GifImage, ParseError> {
    let start = cursor.position();

    let mut extensions = Vec::new();
    while cursor.peek() == Some(EXTENSION_INTRODUCER) {
        extensions.push(read_extension(cursor)?);
    }

    let descriptor = read_image_descriptor(cursor)?;
    let local_color_table = if descriptor.has_lct {
        Some(read_color_table(cursor, 3 * (1usize << (descriptor.lct_size + 1)))?)
    } else {
        None
    };
    let min_code_size = cursor.next()?;
    let data = read_sub_blocks(cursor)?;

    Ok(GifImage {
        descriptor,
        local_color_table,
        extensions,
        min_code_size,
        data,
        span: Span::new(start, cursor.position()),
    })
}

fn read_image_descriptor(cursor: &mut ByteCursor<'_>) -> Result<ImageDescriptor, ParseError> {
    let start = cursor.position();
    cursor.expect_byte(IMAGE_SEPARATOR)?;
    let left = cursor.read_u16()?;
    let top = cursor.read_u16()?;
    let width = cursor.read_u16()?;
    let height = cursor.read_u16()?;
    let packed = cursor.next()?;
    Ok(ImageDescriptor {
        left,
        top,
        width,
        height,
        packed,
        span: Span::new(start, cursor.position()),
        has_lct: packed & 0x80 != 0,
        interlaced: packed & 0x40 != 0,
        sorted: packed & 0x20 != 0,
        lct_size: packed & 0b111,
    })
}

fn read_extension(cursor: &mut ByteCursor<'_>) -> Result<Extension, ParseError> {
    let start = cursor.position();
    cursor.expect_byte(EXTENSION_INTRODUCER)?;
    let label = cursor.next()?;
    match label {
        0xF9 => {
            let block_size = cursor.next()?;
            let packed = cursor.next()?;
            let delay_time = cursor.read_u16()?;
            let transparent_color_index = cursor.next()?;
            let block_terminator = cursor.next()?;
            Ok(Extension::GraphicsControl(GraphicsControlExt {
                block_size,
                packed,
                delay_time,
                transparent_color_index,
                block_terminator,
                span: Span::new(start, cursor.position()),
                reserved: (packed >> 5) & 0b111,
                disposal: (packed >> 2) & 0b111,
                wait_for_input: packed & 0b10 != 0,
                has_transparent_color: packed & 0b1 != 0,
            }))
        }
        0xFF => {
            let block_length = cursor.next()?;
            let identifier = cursor.get_span(usize::from(block_length))?;
            let sub_index = cursor.next()?;
            let num_executions = cursor.read_u16()?;
            let terminator = cursor.read_u16()?;
            Ok(Extension::Application(ApplicationExt {
                block_length,
                identifier,
                sub_index,
                num_executions,
                terminator,
                span: Span::new(start, cursor.position()),
            }))
        }
        0xFE => {
            let text = read_sub_blocks(cursor)?;
            Ok(Extension::Comment(CommentExt {
                text,
                span: Span::new(start, cursor.position()),
            }))
        }
        0x01 => {
            let num_bytes_to_skip = cursor.next()?;
            let skipped = cursor.get_span(usize::from(num_bytes_to_skip))?;
            let text = read_sub_blocks(cursor)?;
            Ok(Extension::PlainText(PlainTextExt {
                num_bytes_to_skip,
                skipped,
                text,
                span: Span::new(start, cursor.position()),
            }))
        }
        _ => Err(ParseError::UnexpectedExtension { label }),
    }
}

/// Concatenate a sub-block stream: 1-byte length prefixes followed by that
/// many bytes, terminated by a zero-length block (which is consumed).
fn read_sub_blocks(cursor: &mut ByteCursor<'_>) -> Result<Vec<u8>, ParseError> {
    let mut data = Vec::new();
    loop {
        let len = cursor.next()?;
        if len == 0 {
            return Ok(data);
        }
        let span = cursor.get_span(usize::from(len))?;
        data.extend_from_slice(cursor.bytes_for_span(span));
    }
}

//! BMP file header and DIB header reader. All values little-endian.

use crate::cursor::{ByteCursor, Endian};
use crate::error::ParseError;
use crate::span::Span;

/// BITMAPINFOHEADER size.
const INFO_HEADER_SIZE: u32 = 40;
/// BITMAPV5HEADER size.
const V5_HEADER_SIZE: u32 = 124;

/// BITMAPFILEHEADER: signature, file size and the offset of the pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileHeader {
    /// The 2-byte `BM` signature.
    pub signature: Span,
    pub file_size: u32,
    pub reserved: u32,
    pub data_offset: u32,
    pub span: Span,
}

/// BITMAPINFOHEADER (40 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub ppm_x: i32,
    pub ppm_y: i32,
    pub colors_used: u32,
    pub important_colors: u32,
    pub span: Span,
}

/// BITMAPV5HEADER (124 bytes): the info header fields plus masks, color
/// space and ICC profile plumbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct V5Header {
    pub info: InfoHeader,
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
    /// Four-byte color space tag; the on-disk bytes are reversed relative to
    /// the mnemonic (`"BGRs"` for sRGB), so displays reverse them back.
    pub color_space: Span,
    /// CIEXYZTRIPLE endpoints, nine fixed-point values.
    pub endpoints: [u32; 9],
    pub gamma_red: u32,
    pub gamma_green: u32,
    pub gamma_blue: u32,
    pub intent: u32,
    pub profile_data_offset: u32,
    pub profile_size: u32,
    pub reserved: u32,
    pub span: Span,
}

/// The DIB header variant, dispatched on the leading size field. Sizes other
/// than 40 and 124 are rejected rather than guessed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DibHeader {
    Info(InfoHeader),
    V5(V5Header),
}

impl DibHeader {
    pub fn info(&self) -> &InfoHeader {
        match self {
            DibHeader::Info(h) => h,
            DibHeader::V5(h) => &h.info,
        }
    }
}

/// One palette entry, reordered from the on-disk BGRA layout.
pub type PaletteEntry = (u8, u8, u8, u8);

/// A parsed BMP file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BmpFile {
    pub header: FileHeader,
    pub dib: DibHeader,
    /// Present for 4- and 8-bit images.
    pub color_table: Option<Vec<PaletteEntry>>,
    /// From `data_offset` to the end of the buffer.
    pub pixels: Span,
}

impl BmpFile {
    /// Human-readable structure dump.
    pub fn summary(&self, data: &[u8]) -> Vec<String> {
        let info = self.dib.info();
        let mut lines = vec![
            format!(
                "{}x{} px, {} bpp, compression {}",
                info.width, info.height, info.bits_per_pixel, info.compression
            ),
            format!("pixel data [{}..{})", self.pixels.start, self.pixels.end),
        ];
        if let Some(table) = &self.color_table {
            lines.push(format!("palette: {} entries", table.len()));
        }
        if let DibHeader::V5(v5) = &self.dib {
            let mut tag: Vec<u8> = v5.color_space.bytes(data).to_vec();
            tag.reverse();
            lines.push(format!("V5 color space {:?}", String::from_utf8_lossy(&tag)));
        }
        lines
    }
}

/// Parse a BMP byte stream. `data` must begin with `BM`.
pub fn parse_bmp(data: &[u8]) -> Result<BmpFile, ParseError> {
    if data.len() < 2 {
        return Err(ParseError::EndOfInput);
    }
    let mut cursor = ByteCursor::new(data, Endian::Little);
    let header = read_file_header(&mut cursor)?;
    let dib = read_dib_header(&mut cursor)?;

    let info = dib.info();
    let color_table = if matches!(info.bits_per_pixel, 4 | 8) {
        Some(read_palette(&mut cursor, info.colors_used as usize * 4)?)
    } else {
        None
    };

    cursor.seek(header.data_offset as usize)?;
    let pixels = cursor.get_span_to(data.len())?;
    Ok(BmpFile { header, dib, color_table, pixels })
}

fn read_file_header(cursor: &mut ByteCursor<'_>) -> Result<FileHeader, ParseError> {
    let start = cursor.position();
    if !cursor.consume_if_equals(b"BM") {
        return Err(ParseError::BadSignature { format: "BMP" });
    }
    let signature = Span::new(start, start + 2);
    let file_size = cursor.read_u32()?;
    let reserved = cursor.read_u32()?;
    let data_offset = cursor.read_u32()?;
    Ok(FileHeader {
        signature,
        file_size,
        reserved,
        data_offset,
        span: Span::new(start, cursor.position()),
    })
}

fn read_dib_header(cursor: &mut ByteCursor<'_>) -> Result<DibHeader, ParseError> {
    let start = cursor.position();
    let header_size = cursor.read_u32()?;
    match header_size {
        INFO_HEADER_SIZE => Ok(DibHeader::Info(read_info_fields(cursor, header_size, start)?)),
        V5_HEADER_SIZE => {
            let info = read_info_fields(cursor, header_size, start)?;
            let red_mask = cursor.read_u32()?;
            let green_mask = cursor.read_u32()?;
            let blue_mask = cursor.read_u32()?;
            let alpha_mask = cursor.read_u32()?;
            let color_space = cursor.get_span(4)?;
            let mut endpoints = [0u32; 9];
            for endpoint in &mut endpoints {
                *endpoint = cursor.read_u32()?;
            }
            let gamma_red = cursor.read_u32()?;
            let gamma_green = cursor.read_u32()?;
            let gamma_blue = cursor.read_u32()?;
            let intent = cursor.read_u32()?;
            let profile_data_offset = cursor.read_u32()?;
            let profile_size = cursor.read_u32()?;
            let reserved = cursor.read_u32()?;
            Ok(DibHeader::V5(V5Header {
                info,
                red_mask,
                green_mask,
                blue_mask,
                alpha_mask,
                color_space,
                endpoints,
                gamma_red,
                gamma_green,
                gamma_blue,
                intent,
                profile_data_offset,
                profile_size,
                reserved,
                span: Span::new(start, cursor.position()),
            }))
        }
        size => Err(ParseError::UnsupportedDibHeader { size }),
    }
}

/// The ten fields shared by the info and V5 layouts, after the size field.
fn read_info_fields(
    cursor: &mut ByteCursor<'_>,
    header_size: u32,
    start: usize,
) -> Result<InfoHeader, ParseError> {
    let width = cursor.read_i32()?;
    let height = cursor.read_i32()?;
    let planes = cursor.read_u16()?;
    let bits_per_pixel = cursor.read_u16()?;
    let compression = cursor.read_u32()?;
    let image_size = cursor.read_u32()?;
    let ppm_x = cursor.read_i32()?;
    let ppm_y = cursor.read_i32()?;
    let colors_used = cursor.read_u32()?;
    let important_colors = cursor.read_u32()?;
    Ok(InfoHeader {
        header_size,
        width,
        height,
        planes,
        bits_per_pixel,
        compression,
        image_size,
        ppm_x,
        ppm_y,
        colors_used,
        important_colors,
        span: Span::new(start, cursor.position()),
    })
}

fn read_palette(
    cursor: &mut ByteCursor<'_>,
    byte_len: usize,
) -> Result<Vec<PaletteEntry>, ParseError> {
    if byte_len % 4 != 0 {
        return Err(ParseError::InvalidColorTableLength { len: byte_len });
    }
    let span = cursor.get_span(byte_len)?;
    Ok(cursor
        .bytes_for_span(span)
        .chunks_exact(4)
        .map(|bgra| (bgra[2], bgra[1], bgra[0], bgra[3]))
        .collect())
}

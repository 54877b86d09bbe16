//! End-of-Central-Directory location and Central Directory walk.
//! All values little-endian.

use crate::cursor::{ByteCursor, Endian};
use crate::error::ParseError;
use crate::span::Span;

/// End-of-Central-Directory signature, `PK\x05\x06`.
pub const EOCD_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];
/// Central Directory File Header signature, `PK\x01\x02`.
pub const CDFH_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x01, 0x02];

/// The trailing record anchoring the central directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EndOfCentralDirectory {
    pub disk_num: u16,
    pub disk_of_cd: u16,
    pub disk_entries: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
    pub comment_len: u16,
    pub comment: Span,
    pub span: Span,
}

/// One archive member's central directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CentralDirectoryFileHeader {
    pub os: u8,
    pub zip_version: u8,
    pub version_needed: u16,
    pub flags: u16,
    pub compression: u16,
    pub mtime: u32,
    pub crc: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub name_len: u16,
    pub extra_len: u16,
    pub comment_len: u16,
    pub disk_start: u16,
    pub internal_attrs: u16,
    pub external_attrs: u32,
    pub local_header_offset: u32,
    pub name: Span,
    pub extra: Span,
    pub comment: Span,
    pub span: Span,
}

/// A parsed ZIP archive: central directory entries plus the EoCD record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ZipArchive {
    pub file_headers: Vec<CentralDirectoryFileHeader>,
    pub end: EndOfCentralDirectory,
}

impl ZipArchive {
    /// Human-readable structure dump, one line per member.
    pub fn summary(&self, data: &[u8]) -> Vec<String> {
        let mut lines = vec![format!(
            "{} entr{} declared, central directory at {} ({} bytes)",
            self.end.total_entries,
            if self.end.total_entries == 1 { "y" } else { "ies" },
            self.end.cd_offset,
            self.end.cd_size
        )];
        for header in &self.file_headers {
            lines.push(format!(
                "{}: {} -> {} bytes, compression {}, local header at {}",
                String::from_utf8_lossy(header.name.bytes(data)),
                header.compressed_size,
                header.uncompressed_size,
                header.compression,
                header.local_header_offset
            ));
        }
        lines
    }
}

/// Parse a ZIP archive by locating the EoCD record and walking the central
/// directory it points at.
pub fn parse_zip(data: &[u8]) -> Result<ZipArchive, ParseError> {
    if data.len() < EOCD_SIGNATURE.len() {
        return Err(ParseError::EndOfInput);
    }
    let mut cursor = ByteCursor::new(data, Endian::Little);

    // Reverse scan from the last byte; the EoCD may be followed only by its
    // own variable-length comment, so the match closest to the tail wins.
    let mut pos = data.len();
    let eocd_start = loop {
        if pos == 0 {
            return Err(ParseError::MissingCentralDirectory);
        }
        pos -= 1;
        cursor.seek(pos)?;
        if cursor.consume_if_equals(&EOCD_SIGNATURE) {
            break pos;
        }
    };
    let end = read_eocd(&mut cursor, eocd_start)?;
    if !cursor.at_end() {
        return Err(ParseError::TrailingBytes);
    }

    cursor.seek(end.cd_offset as usize)?;
    let mut file_headers = Vec::new();
    while cursor.consume_if_equals(&CDFH_SIGNATURE) {
        file_headers.push(read_cdfh(&mut cursor)?);
    }

    Ok(ZipArchive { file_headers, end })
}

fn read_eocd(
    cursor: &mut ByteCursor<'_>,
    start: usize,
) -> Result<EndOfCentralDirectory, ParseError> {
    let disk_num = cursor.read_u16()?;
    let disk_of_cd = cursor.read_u16()?;
    let disk_entries = cursor.read_u16()?;
    let total_entries = cursor.read_u16()?;
    let cd_size = cursor.read_u32()?;
    let cd_offset = cursor.read_u32()?;
    let comment_len = cursor.read_u16()?;
    let comment = cursor.get_span(usize::from(comment_len))?;
    Ok(EndOfCentralDirectory {
        disk_num,
        disk_of_cd,
        disk_entries,
        total_entries,
        cd_size,
        cd_offset,
        comment_len,
        comment,
        span: Span::new(start, cursor.position()),
    })
}

fn read_cdfh(cursor: &mut ByteCursor<'_>) -> Result<CentralDirectoryFileHeader, ParseError> {
    let start = cursor.position() - CDFH_SIGNATURE.len();
    let os = cursor.next()?;
    let zip_version = cursor.next()?;
    let version_needed = cursor.read_u16()?;
    let flags = cursor.read_u16()?;
    let compression = cursor.read_u16()?;
    let mtime = cursor.read_u32()?;
    let crc = cursor.read_u32()?;
    let compressed_size = cursor.read_u32()?;
    let uncompressed_size = cursor.read_u32()?;
    let name_len = cursor.read_u16()?;
    let extra_len = cursor.read_u16()?;
    let comment_len = cursor.read_u16()?;
    let disk_start = cursor.read_u16()?;
    let internal_attrs = cursor.read_u16()?;
    let external_attrs = cursor.read_u32()?;
    let local_header_offset = cursor.read_u32()?;
    let name = cursor.get_span(usize::from(name_len))?;
    let extra = cursor.get_span(usize::from(extra_len))?;
    let comment = cursor.get_span(usize::from(comment_len))?;
    Ok(CentralDirectoryFileHeader {
        os,
        zip_version,
        version_needed,
        flags,
        compression,
        mtime,
        crc,
        compressed_size,
        uncompressed_size,
        name_len,
        extra_len,
        comment_len,
        disk_start,
        internal_attrs,
        external_attrs,
        local_header_offset,
        name,
        extra,
        comment,
        span: Span::new(start, cursor.position()),
    })
}

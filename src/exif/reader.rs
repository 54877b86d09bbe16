//! TIFF header and IFD field reader.

use crate::cursor::{ByteCursor, Endian};
use crate::error::ParseError;
use crate::exif::tags::lookup_tag;

/// Little-endian byte order marker, `II`.
pub const TIFF_LITTLE: u16 = 0x4949;
/// Big-endian byte order marker, `MM`.
pub const TIFF_BIG: u16 = 0x4D4D;
/// TIFF magic number after the byte order marker.
pub const TIFF_MAGIC: u16 = 42;
/// Size of one IFD field entry in bytes.
pub const IFD_ENTRY_LEN: usize = 12;

/// Pointer to the EXIF sub-IFD.
pub const TAG_EXIF_IFD: u16 = 34665;
/// Pointer to the GPS sub-IFD.
pub const TAG_GPS_IFD: u16 = 34853;

pub const TYPE_BYTE: u16 = 1;
pub const TYPE_ASCII: u16 = 2;
pub const TYPE_SHORT: u16 = 3;
pub const TYPE_LONG: u16 = 4;
pub const TYPE_RATIONAL: u16 = 5;
pub const TYPE_UNDEFINED: u16 = 7;
pub const TYPE_SLONG: u16 = 9;
pub const TYPE_SRATIONAL: u16 = 10;

/// Width in bytes of one value of a TIFF field type, or `None` for types
/// outside the supported set.
#[inline]
pub fn type_width(type_code: u16) -> Option<usize> {
    match type_code {
        TYPE_BYTE | TYPE_ASCII | TYPE_UNDEFINED => Some(1),
        TYPE_SHORT => Some(2),
        TYPE_LONG | TYPE_SLONG => Some(4),
        TYPE_RATIONAL | TYPE_SRATIONAL => Some(8),
        _ => None,
    }
}

/// Unsigned rational, numerator over denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Rational {
    pub num: u32,
    pub den: u32,
}

/// Signed rational.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SRational {
    pub num: i32,
    pub den: i32,
}

/// A decoded field value. Scalar variants are used when `count == 1`,
/// sequence variants otherwise. BYTE, ASCII and UNDEFINED all decode as
/// bytes; ASCII rendering is left to the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum ExifValue {
    Byte(u8),
    Bytes(Vec<u8>),
    Short(u16),
    Shorts(Vec<u16>),
    Long(u32),
    Longs(Vec<u32>),
    SLong(i32),
    SLongs(Vec<i32>),
    Rational(Rational),
    Rationals(Vec<Rational>),
    SRational(SRational),
    SRationals(Vec<SRational>),
}

/// One IFD field: the raw entry header plus the decoded value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExifField {
    pub tag: u16,
    /// Human-readable tag name when the dictionary knows it.
    pub name: Option<&'static str>,
    pub type_code: u16,
    pub count: u32,
    /// The raw 4-byte value/offset cell, decoded with the file's byte order.
    pub value_offset: u32,
    pub value: ExifValue,
}

impl ExifField {
    /// Render the value for display.
    pub fn render_value(&self) -> String {
        if self.type_code == TYPE_ASCII {
            let bytes = match &self.value {
                ExifValue::Byte(b) => vec![*b],
                ExifValue::Bytes(b) => b.clone(),
                _ => Vec::new(),
            };
            return format!("{:?}", String::from_utf8_lossy(&bytes).trim_end_matches('\0'));
        }
        match &self.value {
            ExifValue::Byte(v) => v.to_string(),
            ExifValue::Bytes(v) => format!("{v:?}"),
            ExifValue::Short(v) => v.to_string(),
            ExifValue::Shorts(v) => format!("{v:?}"),
            ExifValue::Long(v) => v.to_string(),
            ExifValue::Longs(v) => format!("{v:?}"),
            ExifValue::SLong(v) => v.to_string(),
            ExifValue::SLongs(v) => format!("{v:?}"),
            ExifValue::Rational(r) => format!("{}/{}", r.num, r.den),
            ExifValue::Rationals(v) => {
                let parts: Vec<String> = v.iter().map(|r| format!("{}/{}", r.num, r.den)).collect();
                format!("[{}]", parts.join(", "))
            }
            ExifValue::SRational(r) => format!("{}/{}", r.num, r.den),
            ExifValue::SRationals(v) => {
                let parts: Vec<String> = v.iter().map(|r| format!("{}/{}", r.num, r.den)).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }
}

/// All fields of the root IFD, followed by the EXIF and GPS sub-IFD fields
/// when those pointers are present.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExifData {
    pub fields: Vec<ExifField>,
}

impl ExifData {
    /// Look up the first field with the given tag number.
    pub fn field(&self, tag: u16) -> Option<&ExifField> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Human-readable structure dump, one line per field.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![format!("{} field(s)", self.fields.len())];
        for f in &self.fields {
            let name = f.name.unwrap_or("?");
            lines.push(format!(
                "tag {} ({}) type={} count={} value={}",
                f.tag,
                name,
                f.type_code,
                f.count,
                f.render_value()
            ));
        }
        lines
    }
}

/// Parse a TIFF/EXIF block. `data` must begin with the TIFF header; the
/// `II`/`MM` marker selects the byte order for everything that follows.
pub fn parse_exif(data: &[u8]) -> Result<ExifData, ParseError> {
    if data.len() < 2 {
        return Err(ParseError::EndOfInput);
    }
    let endian = match &data[0..2] {
        b"II" => Endian::Little,
        b"MM" => Endian::Big,
        _ => return Err(ParseError::BadSignature { format: "TIFF" }),
    };
    let mut cursor = ByteCursor::new(data, endian);
    cursor.seek(2)?;
    if cursor.read_u16()? != TIFF_MAGIC {
        return Err(ParseError::BadSignature { format: "TIFF" });
    }
    let root_offset = cursor.read_u32()?;
    cursor.seek(root_offset as usize)?;
    let mut fields = read_ifd(&mut cursor)?;

    // Append the sub-IFDs' fields to the root list, EXIF first then GPS.
    for tag in [TAG_EXIF_IFD, TAG_GPS_IFD] {
        let pointer = fields.iter().find(|f| f.tag == tag).and_then(|f| match f.value {
            ExifValue::Long(v) => Some(v),
            ExifValue::Short(v) => Some(u32::from(v)),
            _ => None,
        });
        if let Some(offset) = pointer {
            cursor.seek(offset as usize)?;
            fields.extend(read_ifd(&mut cursor)?);
        }
    }
    Ok(ExifData { fields })
}

/// Read one IFD at the cursor: field count, that many entries, and the
/// trailing next-IFD offset (read and ignored).
fn read_ifd(cursor: &mut ByteCursor<'_>) -> Result<Vec<ExifField>, ParseError> {
    let count = cursor.read_u16()?;
    let mut fields = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        fields.push(read_field(cursor)?);
    }
    let _next_ifd = cursor.read_u32()?;
    Ok(fields)
}

fn read_field(cursor: &mut ByteCursor<'_>) -> Result<ExifField, ParseError> {
    let tag = cursor.read_u16()?;
    let type_code = cursor.read_u16()?;
    let count = cursor.read_u32()?;
    let value_offset = cursor.read_u32()?;
    let value = decode_value(cursor, type_code, count, value_offset)?;
    Ok(ExifField {
        tag,
        name: lookup_tag(tag).map(|t| t.name),
        type_code,
        count,
        value_offset,
        value,
    })
}

/// Decode a field's value. Payloads of at most four bytes are packed inline
/// in the value/offset cell; larger ones sit behind the pointer and are read
/// with a save-and-restore seek.
fn decode_value(
    cursor: &mut ByteCursor<'_>,
    type_code: u16,
    count: u32,
    value_offset: u32,
) -> Result<ExifValue, ParseError> {
    let width = type_width(type_code).ok_or(ParseError::UnknownExifType { type_code })?;
    let size = width as u64 * u64::from(count);
    if size <= 4 {
        // Recover the cell's bytes in file order; inline values are laid out
        // exactly as they would be at an out-of-line position.
        let raw = match cursor.endian() {
            Endian::Little => value_offset.to_le_bytes(),
            Endian::Big => value_offset.to_be_bytes(),
        };
        return Ok(decode_inline(cursor.endian(), type_code, count, value_offset, raw));
    }

    let saved = cursor.position();
    cursor.seek(value_offset as usize)?;
    let value = read_pointed(cursor, type_code, count)?;
    cursor.seek(saved)?;
    Ok(value)
}

fn decode_inline(
    endian: Endian,
    type_code: u16,
    count: u32,
    value_offset: u32,
    raw: [u8; 4],
) -> ExifValue {
    match type_code {
        TYPE_BYTE | TYPE_ASCII | TYPE_UNDEFINED => {
            if count == 1 {
                ExifValue::Byte(raw[0])
            } else {
                ExifValue::Bytes(raw[..count as usize].to_vec())
            }
        }
        TYPE_SHORT => {
            let at = |i: usize| {
                let pair = [raw[2 * i], raw[2 * i + 1]];
                match endian {
                    Endian::Little => u16::from_le_bytes(pair),
                    Endian::Big => u16::from_be_bytes(pair),
                }
            };
            if count == 1 {
                ExifValue::Short(at(0))
            } else {
                ExifValue::Shorts((0..count as usize).map(at).collect())
            }
        }
        TYPE_LONG => {
            if count == 1 {
                ExifValue::Long(value_offset)
            } else {
                ExifValue::Longs(Vec::new())
            }
        }
        TYPE_SLONG => {
            if count == 1 {
                ExifValue::SLong(value_offset as i32)
            } else {
                ExifValue::SLongs(Vec::new())
            }
        }
        TYPE_RATIONAL => ExifValue::Rationals(Vec::new()),
        TYPE_SRATIONAL => ExifValue::SRationals(Vec::new()),
        // type_width already rejected everything else.
        _ => unreachable!(),
    }
}

fn read_pointed(
    cursor: &mut ByteCursor<'_>,
    type_code: u16,
    count: u32,
) -> Result<ExifValue, ParseError> {
    let n = count as usize;
    Ok(match type_code {
        TYPE_BYTE | TYPE_ASCII | TYPE_UNDEFINED => {
            let span = cursor.get_span(n)?;
            ExifValue::Bytes(cursor.bytes_for_span(span).to_vec())
        }
        TYPE_SHORT => {
            let mut values = Vec::with_capacity(n);
            for _ in 0..n {
                values.push(cursor.read_u16()?);
            }
            ExifValue::Shorts(values)
        }
        TYPE_LONG => {
            let mut values = Vec::with_capacity(n);
            for _ in 0..n {
                values.push(cursor.read_u32()?);
            }
            ExifValue::Longs(values)
        }
        TYPE_SLONG => {
            let mut values = Vec::with_capacity(n);
            for _ in 0..n {
                values.push(cursor.read_i32()?);
            }
            ExifValue::SLongs(values)
        }
        TYPE_RATIONAL => {
            let mut values = Vec::with_capacity(n);
            for _ in 0..n {
                let num = cursor.read_u32()?;
                let den = cursor.read_u32()?;
                values.push(Rational { num, den });
            }
            if n == 1 {
                ExifValue::Rational(values[0])
            } else {
                ExifValue::Rationals(values)
            }
        }
        TYPE_SRATIONAL => {
            let mut values = Vec::with_capacity(n);
            for _ in 0..n {
                let num = cursor.read_i32()?;
                let den = cursor.read_i32()?;
                values.push(SRational { num, den });
            }
            if n == 1 {
                ExifValue::SRational(values[0])
            } else {
                ExifValue::SRationals(values)
            }
        }
        _ => unreachable!(),
    })
}

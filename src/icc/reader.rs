//! ICC profile header and tag table reader. Big-endian throughout.

use indexmap::IndexMap;

use crate::cursor::{ByteCursor, Endian};
use crate::error::ParseError;

/// Offset of the `acsp` profile signature.
const SIGNATURE_OFFSET: usize = 36;
/// Offset of the tag count; tag entries follow at a 12-byte stride.
const TAG_TABLE_OFFSET: usize = 128;

/// A decoded attribute or tag value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum IccValue {
    Text(String),
    /// CIE XYZ triple decoded from Q16.16 fixed point.
    Xyz([f64; 3]),
}

/// Flat keyword map of everything the reader understood. Unknown tag
/// signatures are skipped, not errors.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IccProfile {
    pub entries: IndexMap<String, IccValue>,
}

impl IccProfile {
    pub fn get(&self, keyword: &str) -> Option<&IccValue> {
        self.entries.get(keyword)
    }

    /// Human-readable structure dump, one line per entry.
    pub fn summary(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(keyword, value)| match value {
                IccValue::Text(text) => format!("{keyword} = {text}"),
                IccValue::Xyz([x, y, z]) => format!("{keyword} = [{x:.4}, {y:.4}, {z:.4}]"),
            })
            .collect()
    }
}

/// Fixed-offset header attributes holding a four-byte ASCII code.
const ASCII_ATTRIBUTES: &[(usize, &str)] = &[
    (4, "cmm"),
    (12, "deviceClass"),
    (16, "colorSpace"),
    (20, "connectionSpace"),
    (40, "platform"),
    (48, "manufacturer"),
    (52, "model"),
    (80, "creator"),
];

/// Known profile versions; anything else leaves `version` absent.
const VERSIONS: &[(u32, &str)] = &[
    (0x0200_0000, "2.0"),
    (0x0210_0000, "2.1"),
    (0x0220_0000, "2.2"),
    (0x0230_0000, "2.3"),
    (0x0240_0000, "2.4"),
    (0x0400_0000, "4.0"),
    (0x0420_0000, "4.2"),
    (0x0430_0000, "4.3"),
    (0x0440_0000, "4.4"),
];

const INTENTS: &[(u32, &str)] = &[
    (0, "Perceptual"),
    (1, "Relative Colorimetric"),
    (2, "Saturation"),
    (3, "Absolute Colorimetric"),
];

/// Display labels for well-known four-byte codes; anything else passes
/// through as the trimmed code itself.
fn fourcc_label(code: &str) -> String {
    let label = match code {
        "scnr" => "Scanner",
        "mntr" => "Monitor",
        "prtr" => "Printer",
        "link" => "DeviceLink",
        "spac" => "ColorSpace",
        "abst" => "Abstract",
        "nmcl" => "NamedColor",
        "APPL" | "appl" => "Apple",
        "MSFT" => "Microsoft",
        "SGI " => "Silicon Graphics",
        "SUNW" => "Sun Microsystems",
        "ADBE" | "adbe" => "Adobe",
        "lcms" => "Little CMS",
        "argl" => "ArgyllCMS",
        "KODA" => "Kodak",
        "RGB " => "RGB",
        "GRAY" => "Grayscale",
        "CMYK" => "CMYK",
        "Lab " => "Lab",
        "XYZ " => "XYZ",
        other => return other.trim_matches(|c| c == ' ' || c == '\0').to_string(),
    };
    label.to_string()
}

/// Tag signatures the reader decodes, with their output keywords.
fn known_tag_keyword(signature: &[u8]) -> Option<&'static str> {
    match signature {
        b"desc" => Some("description"),
        b"cprt" => Some("copyright"),
        b"dmdd" => Some("deviceModelDescription"),
        b"vued" => Some("viewingConditionsDescription"),
        b"wtpt" => Some("whitepoint"),
        _ => None,
    }
}

/// Parse an inflated ICC profile.
pub fn parse_icc(data: &[u8]) -> Result<IccProfile, ParseError> {
    let mut cursor = ByteCursor::new(data, Endian::Big);

    let profile_size = cursor.read_u32()?;
    if profile_size as usize != data.len() {
        return Err(ParseError::InvalidIcc("length mismatch"));
    }
    cursor.seek(SIGNATURE_OFFSET)?;
    if !cursor.consume_if_equals(b"acsp") {
        return Err(ParseError::InvalidIcc("missing signature"));
    }

    let mut entries = IndexMap::new();

    let version = read_u32_at(&mut cursor, 8)?;
    if let Some(&(_, label)) = VERSIONS.iter().find(|&&(v, _)| v == version) {
        entries.insert("version".to_string(), IccValue::Text(label.to_string()));
    }
    let intent = read_u32_at(&mut cursor, 64)?;
    if let Some(&(_, label)) = INTENTS.iter().find(|&&(v, _)| v == intent) {
        entries.insert("intent".to_string(), IccValue::Text(label.to_string()));
    }

    for &(offset, keyword) in ASCII_ATTRIBUTES {
        if read_u32_at(&mut cursor, offset)? != 0 {
            cursor.seek(offset)?;
            let span = cursor.get_span(4)?;
            let code = cursor.string_for_span(span);
            entries.insert(keyword.to_string(), IccValue::Text(fourcc_label(&code)));
        }
    }

    let tag_count = read_u32_at(&mut cursor, TAG_TABLE_OFFSET)?;
    for i in 0..tag_count as usize {
        cursor.seek(TAG_TABLE_OFFSET + 4 + 12 * i)?;
        let signature_span = cursor.get_span(4)?;
        let tag_offset = cursor.read_u32()? as usize;
        let tag_size = cursor.read_u32()? as usize;

        let Some(keyword) = known_tag_keyword(cursor.bytes_for_span(signature_span)) else {
            continue;
        };
        if tag_offset.checked_add(tag_size).map_or(true, |end| end > data.len()) {
            return Err(ParseError::InvalidIcc("tag offset out of bounds"));
        }
        if let Some(value) = decode_tag(&mut cursor, tag_offset, tag_size)? {
            entries.insert(keyword.to_string(), value);
        }
    }

    Ok(IccProfile { entries })
}

/// Decode one known tag by its *type* signature (the first four bytes of the
/// tag data). Types outside {desc, text, mluc, XYZ} yield `None`.
fn decode_tag(
    cursor: &mut ByteCursor<'_>,
    offset: usize,
    size: usize,
) -> Result<Option<IccValue>, ParseError> {
    cursor.seek(offset)?;
    let type_span = cursor.get_span(4)?;
    match cursor.bytes_for_span(type_span) {
        b"desc" => {
            let text_size = read_u32_at(cursor, offset + 8)? as usize;
            if text_size > size {
                return Err(ParseError::InvalidIcc("description length mismatch"));
            }
            if text_size == 0 {
                return Ok(Some(IccValue::Text(String::new())));
            }
            cursor.seek(offset + 12)?;
            let span = cursor.get_span(text_size - 1)?;
            Ok(Some(IccValue::Text(cursor.string_for_span(span))))
        }
        b"text" => {
            let end = (offset + size).checked_sub(7).ok_or(ParseError::InvalidIcc(
                "text length mismatch",
            ))?;
            cursor.seek(offset + 8)?;
            let span = cursor.get_span_to(end).map_err(|_| {
                ParseError::InvalidIcc("text length mismatch")
            })?;
            Ok(Some(IccValue::Text(cursor.string_for_span(span))))
        }
        b"mluc" => {
            let num_names = read_u32_at(cursor, offset + 8)?;
            let record_size = read_u32_at(cursor, offset + 12)?;
            if record_size != 12 {
                return Err(ParseError::InvalidIcc("mluc record size"));
            }
            if num_names == 0 {
                return Ok(None);
            }
            // First record: language u16, country u16, then byte length and
            // offset of the UTF-16 BE name, relative to the tag start.
            let name_length = read_u32_at(cursor, offset + 20)? as usize;
            let name_offset = read_u32_at(cursor, offset + 24)? as usize;
            cursor.seek(offset + name_offset)?;
            let span = cursor.get_span(name_length)?;
            let bytes = cursor.bytes_for_span(span);
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            Ok(Some(IccValue::Text(String::from_utf16_lossy(&units))))
        }
        b"XYZ " => {
            cursor.seek(offset + 8)?;
            let x = cursor.read_i32()?;
            let y = cursor.read_i32()?;
            let z = cursor.read_i32()?;
            let q = |v: i32| f64::from(v) / 65536.0;
            Ok(Some(IccValue::Xyz([q(x), q(y), q(z)])))
        }
        _ => Ok(None),
    }
}

fn read_u32_at(cursor: &mut ByteCursor<'_>, offset: usize) -> Result<u32, ParseError> {
    cursor.seek(offset)?;
    cursor.read_u32()
}

//! ICC profile reader tests.

use rasterlens::icc::{parse_icc, IccValue};
use rasterlens::ParseError;

fn put_u32_at(v: &mut [u8], offset: usize, x: u32) {
    v[offset..offset + 4].copy_from_slice(&x.to_be_bytes());
}

/// A 132-byte header (through the tag count) with the `acsp` signature and
/// the declared size patched in. Extend and re-patch the size for tag data.
fn bare_profile(total_len: usize) -> Vec<u8> {
    let mut v = vec![0u8; 132.max(total_len)];
    put_u32_at(&mut v, 0, total_len as u32);
    v[36..40].copy_from_slice(b"acsp");
    v
}

fn with_tag(signature: &[u8; 4], tag_data: &[u8]) -> Vec<u8> {
    let tag_offset = 144usize;
    let total = tag_offset + tag_data.len();
    let mut v = bare_profile(total);
    put_u32_at(&mut v, 128, 1);
    v[132..136].copy_from_slice(signature);
    put_u32_at(&mut v, 136, tag_offset as u32);
    put_u32_at(&mut v, 140, tag_data.len() as u32);
    v.truncate(tag_offset);
    v.extend_from_slice(tag_data);
    v
}

#[test]
fn version_4_3() {
    let mut v = bare_profile(132);
    put_u32_at(&mut v, 8, 0x0430_0000);
    let parsed = parse_icc(&v).unwrap();
    assert_eq!(parsed.get("version"), Some(&IccValue::Text("4.3".to_string())));
}

#[test]
fn unknown_version_left_absent() {
    let mut v = bare_profile(132);
    put_u32_at(&mut v, 8, 0x0123_0000);
    let parsed = parse_icc(&v).unwrap();
    assert!(parsed.get("version").is_none());
}

#[test]
fn rendering_intent_mapping() {
    let mut v = bare_profile(132);
    put_u32_at(&mut v, 64, 1);
    let parsed = parse_icc(&v).unwrap();
    assert_eq!(
        parsed.get("intent"),
        Some(&IccValue::Text("Relative Colorimetric".to_string()))
    );
}

#[test]
fn header_attributes_with_dictionary_and_passthrough() {
    let mut v = bare_profile(132);
    v[12..16].copy_from_slice(b"mntr");
    v[16..20].copy_from_slice(b"RGB ");
    v[48..52].copy_from_slice(b"ZZ9 ");
    let parsed = parse_icc(&v).unwrap();
    assert_eq!(parsed.get("deviceClass"), Some(&IccValue::Text("Monitor".to_string())));
    assert_eq!(parsed.get("colorSpace"), Some(&IccValue::Text("RGB".to_string())));
    // Unknown code passes through, trimmed.
    assert_eq!(parsed.get("manufacturer"), Some(&IccValue::Text("ZZ9".to_string())));
    // Zeroed attributes stay absent.
    assert!(parsed.get("cmm").is_none());
}

#[test]
fn desc_tag_text() {
    let mut tag = Vec::new();
    tag.extend_from_slice(b"desc");
    tag.extend_from_slice(&[0; 4]);
    tag.extend_from_slice(&5u32.to_be_bytes());
    tag.extend_from_slice(b"sRGB\0");
    let v = with_tag(b"desc", &tag);
    let parsed = parse_icc(&v).unwrap();
    assert_eq!(parsed.get("description"), Some(&IccValue::Text("sRGB".to_string())));
}

#[test]
fn desc_size_contradiction() {
    let mut tag = Vec::new();
    tag.extend_from_slice(b"desc");
    tag.extend_from_slice(&[0; 4]);
    tag.extend_from_slice(&500u32.to_be_bytes());
    tag.extend_from_slice(b"x\0");
    let v = with_tag(b"desc", &tag);
    assert_eq!(parse_icc(&v), Err(ParseError::InvalidIcc("description length mismatch")));
}

#[test]
fn copyright_text_tag() {
    // textType: 4-byte signature, 4 reserved, then the string. The decode
    // window is [offset+8, offset+size-7).
    let text = b"CC0 2026";
    let mut tag = Vec::new();
    tag.extend_from_slice(b"text");
    tag.extend_from_slice(&[0; 4]);
    tag.extend_from_slice(text);
    tag.extend_from_slice(&[0; 7]);
    let v = with_tag(b"cprt", &tag);
    let parsed = parse_icc(&v).unwrap();
    assert_eq!(
        parsed.get("copyright"),
        Some(&IccValue::Text("CC0 2026".to_string()))
    );
}

#[test]
fn whitepoint_xyz_q16() {
    let mut tag = Vec::new();
    tag.extend_from_slice(b"XYZ ");
    tag.extend_from_slice(&[0; 4]);
    tag.extend_from_slice(&0x0000_F6D6u32.to_be_bytes());
    tag.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    tag.extend_from_slice(&0x0000_D32Du32.to_be_bytes());
    let v = with_tag(b"wtpt", &tag);
    let parsed = parse_icc(&v).unwrap();
    let Some(IccValue::Xyz([x, y, z])) = parsed.get("whitepoint") else {
        panic!("whitepoint should be an XYZ triple");
    };
    assert!((x - 0.9642).abs() < 1e-4);
    assert!((y - 1.0).abs() < 1e-9);
    assert!((z - 0.8249).abs() < 1e-4);
}

#[test]
fn mluc_first_record_utf16() {
    let mut tag = Vec::new();
    tag.extend_from_slice(b"mluc");
    tag.extend_from_slice(&[0; 4]);
    tag.extend_from_slice(&1u32.to_be_bytes());
    tag.extend_from_slice(&12u32.to_be_bytes());
    tag.extend_from_slice(b"enUS");
    tag.extend_from_slice(&8u32.to_be_bytes());
    tag.extend_from_slice(&28u32.to_be_bytes());
    tag.extend_from_slice(&[0x00, b's', 0x00, b'R', 0x00, b'G', 0x00, b'B']);
    let v = with_tag(b"dmdd", &tag);
    let parsed = parse_icc(&v).unwrap();
    assert_eq!(
        parsed.get("deviceModelDescription"),
        Some(&IccValue::Text("sRGB".to_string()))
    );
}

#[test]
fn mluc_unexpected_record_size() {
    let mut tag = Vec::new();
    tag.extend_from_slice(b"mluc");
    tag.extend_from_slice(&[0; 4]);
    tag.extend_from_slice(&1u32.to_be_bytes());
    tag.extend_from_slice(&16u32.to_be_bytes());
    tag.extend_from_slice(&[0; 16]);
    let v = with_tag(b"vued", &tag);
    assert_eq!(parse_icc(&v), Err(ParseError::InvalidIcc("mluc record size")));
}

#[test]
fn unknown_tag_signature_is_skipped() {
    let mut tag = Vec::new();
    tag.extend_from_slice(b"sf32");
    tag.extend_from_slice(&[0; 12]);
    let v = with_tag(b"A2B0", &tag);
    let parsed = parse_icc(&v).unwrap();
    // Only the header-derived intent (0 maps to Perceptual) shows up; the
    // unknown tag contributes nothing.
    assert_eq!(parsed.entries.len(), 1);
    assert_eq!(parsed.get("intent"), Some(&IccValue::Text("Perceptual".to_string())));
}

#[test]
fn tag_offset_out_of_bounds() {
    let mut v = bare_profile(144);
    put_u32_at(&mut v, 128, 1);
    v[132..136].copy_from_slice(b"desc");
    put_u32_at(&mut v, 136, 4000);
    put_u32_at(&mut v, 140, 20);
    assert_eq!(parse_icc(&v), Err(ParseError::InvalidIcc("tag offset out of bounds")));
}

#[test]
fn declared_size_must_match() {
    let mut v = bare_profile(132);
    put_u32_at(&mut v, 0, 999);
    assert_eq!(parse_icc(&v), Err(ParseError::InvalidIcc("length mismatch")));
}

#[test]
fn missing_acsp_signature() {
    let mut v = vec![0u8; 132];
    put_u32_at(&mut v, 0, 132);
    assert_eq!(parse_icc(&v), Err(ParseError::InvalidIcc("missing signature")));
}

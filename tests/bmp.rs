//! BMP reader tests.

use rasterlens::bmp::{parse_bmp, DibHeader};
use rasterlens::ParseError;

fn put_u16(v: &mut Vec<u8>, x: u16) {
    v.extend_from_slice(&x.to_le_bytes());
}
fn put_u32(v: &mut Vec<u8>, x: u32) {
    v.extend_from_slice(&x.to_le_bytes());
}
fn put_i32(v: &mut Vec<u8>, x: i32) {
    v.extend_from_slice(&x.to_le_bytes());
}

fn file_header(file_size: u32, data_offset: u32) -> Vec<u8> {
    let mut v = b"BM".to_vec();
    put_u32(&mut v, file_size);
    put_u32(&mut v, 0);
    put_u32(&mut v, data_offset);
    v
}

/// The ten fields after the DIB size field.
fn info_fields(v: &mut Vec<u8>, width: i32, height: i32, bpp: u16, colors_used: u32) {
    put_i32(v, width);
    put_i32(v, height);
    put_u16(v, 1);
    put_u16(v, bpp);
    put_u32(v, 0);
    put_u32(v, 0);
    put_i32(v, 2835);
    put_i32(v, 2835);
    put_u32(v, colors_used);
    put_u32(v, 0);
}

#[test]
fn info_header_truecolor() {
    let pixels = [0u8; 24];
    let data_offset = 14 + 40;
    let mut v = file_header(data_offset + pixels.len() as u32, data_offset);
    put_u32(&mut v, 40);
    info_fields(&mut v, 4, 2, 24, 0);
    v.extend_from_slice(&pixels);

    let parsed = parse_bmp(&v).unwrap();
    assert_eq!(parsed.header.data_offset, data_offset);
    let DibHeader::Info(info) = parsed.dib else {
        panic!("expected the 40-byte header variant");
    };
    assert_eq!(info.width, 4);
    assert_eq!(info.height, 2);
    assert_eq!(info.bits_per_pixel, 24);
    assert!(parsed.color_table.is_none());
    assert_eq!(parsed.pixels.start, data_offset as usize);
    assert_eq!(parsed.pixels.end, v.len());
}

#[test]
fn palette_entries_are_reordered_from_bgra() {
    let data_offset = 14 + 40 + 8;
    let mut v = file_header(data_offset + 4, data_offset);
    put_u32(&mut v, 40);
    info_fields(&mut v, 2, 2, 8, 2);
    v.extend_from_slice(&[0x01, 0x02, 0x03, 0x04]);
    v.extend_from_slice(&[0x11, 0x12, 0x13, 0x14]);
    v.extend_from_slice(&[0xAA; 4]);

    let parsed = parse_bmp(&v).unwrap();
    let table = parsed.color_table.as_ref().unwrap();
    assert_eq!(table.len(), 2);
    // On-disk BGRA becomes (r, g, b, a).
    assert_eq!(table[0], (0x03, 0x02, 0x01, 0x04));
    assert_eq!(table[1], (0x13, 0x12, 0x11, 0x14));
}

#[test]
fn zero_colors_used_reads_a_zero_length_palette() {
    // The color table is colors_used * 4 bytes, so zero entries declared
    // means zero bytes read: the table is present for 4 bpp but empty.
    let data_offset = 14 + 40;
    let mut v = file_header(data_offset + 2, data_offset);
    put_u32(&mut v, 40);
    info_fields(&mut v, 2, 1, 4, 0);
    v.extend_from_slice(&[0xFF, 0xFF]);

    let parsed = parse_bmp(&v).unwrap();
    assert_eq!(parsed.color_table, Some(Vec::new()));
    assert_eq!(parsed.pixels.len(), 2);
}

#[test]
fn v5_header_fields() {
    let data_offset = 14 + 124;
    let mut v = file_header(data_offset + 4, data_offset);
    put_u32(&mut v, 124);
    info_fields(&mut v, 1, 1, 32, 0);
    put_u32(&mut v, 0x00FF_0000);
    put_u32(&mut v, 0x0000_FF00);
    put_u32(&mut v, 0x0000_00FF);
    put_u32(&mut v, 0xFF00_0000);
    // LCS_sRGB: mnemonic "sRGB" stored reversed on disk.
    v.extend_from_slice(b"BGRs");
    for _ in 0..9 {
        put_u32(&mut v, 0);
    }
    put_u32(&mut v, 0);
    put_u32(&mut v, 0);
    put_u32(&mut v, 0);
    put_u32(&mut v, 4);
    put_u32(&mut v, 0);
    put_u32(&mut v, 0);
    put_u32(&mut v, 0);
    v.extend_from_slice(&[0; 4]);

    let parsed = parse_bmp(&v).unwrap();
    let DibHeader::V5(v5) = parsed.dib else {
        panic!("expected the 124-byte header variant");
    };
    assert_eq!(v5.info.bits_per_pixel, 32);
    assert_eq!(v5.red_mask, 0x00FF_0000);
    assert_eq!(v5.alpha_mask, 0xFF00_0000);
    assert_eq!(v5.color_space.bytes(&v), b"BGRs");
    assert_eq!(v5.intent, 4);
    assert_eq!(v5.span.len(), 124);
}

#[test]
fn unknown_dib_size_is_rejected() {
    let mut v = file_header(26, 26);
    put_u32(&mut v, 12);
    v.extend_from_slice(&[0; 8]);
    assert_eq!(parse_bmp(&v), Err(ParseError::UnsupportedDibHeader { size: 12 }));
}

#[test]
fn data_offset_past_end() {
    let mut v = file_header(1000, 1000);
    put_u32(&mut v, 40);
    info_fields(&mut v, 1, 1, 24, 0);
    assert_eq!(parse_bmp(&v), Err(ParseError::EndOfInput));
}

#[test]
fn wrong_signature() {
    assert_eq!(
        parse_bmp(b"XX\x00\x00\x00\x00"),
        Err(ParseError::BadSignature { format: "BMP" })
    );
}

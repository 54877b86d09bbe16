//! PNG chunk walker and schema tests.

use rasterlens::png::{known_schema, parse_png, ChunkName, PNG_SIGNATURE};
use rasterlens::{read_record, ByteCursor, Endian, FieldValue, ParseError, Span};

fn chunk(name: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    v.extend_from_slice(name);
    v.extend_from_slice(payload);
    v.extend_from_slice(&0xDEAD_BEEFu32.to_be_bytes());
    v
}

fn png(chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut v = PNG_SIGNATURE.to_vec();
    for c in chunks {
        v.extend_from_slice(c);
    }
    v
}

#[test]
fn ihdr_fields() {
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&10u32.to_be_bytes());
    ihdr.extend_from_slice(&20u32.to_be_bytes());
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);
    let data = png(&[chunk(b"IHDR", &ihdr)]);

    let parsed = parse_png(&data).unwrap();
    assert_eq!(parsed.header_span, Span::new(0, 8));
    assert_eq!(parsed.chunks.len(), 1);
    let c = &parsed.chunks[0];
    assert_eq!(c.name, ChunkName(*b"IHDR"));
    assert_eq!(c.crc, 0xDEAD_BEEF);
    let fields = c.parsed_fields.as_ref().unwrap();
    assert_eq!(fields["width"], FieldValue::U32(10));
    assert_eq!(fields["height"], FieldValue::U32(20));
    assert_eq!(fields["bit_depth"], FieldValue::U8(8));
    assert_eq!(fields["color_type"], FieldValue::U8(2));
    assert_eq!(fields["compression_method"], FieldValue::U8(0));
    assert_eq!(fields["filter_method"], FieldValue::U8(0));
    assert_eq!(fields["interlace_method"], FieldValue::U8(0));
}

#[test]
fn signature_plus_empty_iend() {
    let data = png(&[chunk(b"IEND", &[])]);
    let parsed = parse_png(&data).unwrap();
    assert_eq!(parsed.chunks.len(), 1);
    let fields = parsed.chunks[0].parsed_fields.as_ref().unwrap();
    assert!(fields.is_empty());
}

#[test]
fn chunk_spans_tile_the_file_exactly() {
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&1u32.to_be_bytes());
    ihdr.extend_from_slice(&1u32.to_be_bytes());
    ihdr.extend_from_slice(&[1, 0, 0, 0, 0]);
    let data = png(&[
        chunk(b"IHDR", &ihdr),
        chunk(b"IDAT", &[0xAA; 17]),
        chunk(b"IEND", &[]),
    ]);

    let parsed = parse_png(&data).unwrap();
    // Payload spans plus 12 framing bytes per chunk plus the 8-byte
    // signature cover the file with no gaps and no overlap.
    let payload: usize = parsed.chunks.iter().map(|c| c.raw_data.len()).sum();
    assert_eq!(payload + 12 * parsed.chunks.len() + 8, data.len());
    let mut pos = 8;
    for c in &parsed.chunks {
        assert_eq!(c.raw_data.start, pos + 8);
        pos = c.raw_data.end + 4;
    }
    assert_eq!(pos, data.len());
}

#[test]
fn unknown_chunk_preserved_undecoded() {
    let data = png(&[chunk(b"prVt", &[1, 2, 3])]);
    let parsed = parse_png(&data).unwrap();
    let c = &parsed.chunks[0];
    assert_eq!(c.name.as_str(), "prVt");
    assert!(c.parsed_fields.is_none());
    assert_eq!(c.raw_data.len(), 3);
}

#[test]
fn text_chunk_keyword_and_body() {
    let data = png(&[chunk(b"tEXt", b"Comment\0hello world")]);
    let parsed = parse_png(&data).unwrap();
    let c = &parsed.chunks[0];
    let fields = c.parsed_fields.as_ref().unwrap();
    let FieldValue::Str(keyword) = fields["keyword"] else {
        panic!("keyword should be a string span");
    };
    assert_eq!(keyword.bytes(&data), b"Comment\0");
    let FieldValue::Bytes(text) = fields["text"] else {
        panic!("text should be a byte span");
    };
    assert_eq!(text.bytes(&data), b"hello world");
    assert_eq!(text.end, c.raw_data.end);
}

#[test]
fn ztxt_and_iccp_layouts() {
    let data = png(&[
        chunk(b"zTXt", b"Title\0\0compressed-bytes"),
        chunk(b"iCCP", b"icc-name\0\0profile-bytes"),
    ]);
    let parsed = parse_png(&data).unwrap();

    let ztxt = parsed.chunks[0].parsed_fields.as_ref().unwrap();
    assert_eq!(ztxt["compression_method"], FieldValue::U8(0));
    let FieldValue::Bytes(body) = ztxt["compressed_text"] else {
        panic!("compressed_text should be a byte span");
    };
    assert_eq!(body.bytes(&data), b"compressed-bytes");

    let iccp = parsed.chunks[1].parsed_fields.as_ref().unwrap();
    let FieldValue::Str(name) = iccp["profile_name"] else {
        panic!("profile_name should be a string span");
    };
    assert_eq!(name.bytes(&data), b"icc-name\0");
}

#[test]
fn time_and_phys_fields() {
    let mut time = Vec::new();
    time.extend_from_slice(&2024u16.to_be_bytes());
    time.extend_from_slice(&[6, 15, 12, 30, 59]);
    let mut phys = Vec::new();
    phys.extend_from_slice(&2835u32.to_be_bytes());
    phys.extend_from_slice(&2835u32.to_be_bytes());
    phys.push(1);
    let data = png(&[chunk(b"tIME", &time), chunk(b"pHYs", &phys)]);

    let parsed = parse_png(&data).unwrap();
    let time = parsed.chunks[0].parsed_fields.as_ref().unwrap();
    assert_eq!(time["year"], FieldValue::U16(2024));
    assert_eq!(time["second"], FieldValue::U8(59));
    let phys = parsed.chunks[1].parsed_fields.as_ref().unwrap();
    assert_eq!(phys["ppu_x"], FieldValue::U32(2835));
    assert_eq!(phys["unit"], FieldValue::U8(1));
}

#[test]
fn rewalking_a_chunk_span_reproduces_its_fields() {
    let data = png(&[chunk(b"tEXt", b"Author\0someone")]);
    let parsed = parse_png(&data).unwrap();
    let c = &parsed.chunks[0];
    let original = c.parsed_fields.as_ref().unwrap();

    let mut cursor = ByteCursor::new(&data, Endian::Big);
    cursor.seek(c.raw_data.start).unwrap();
    let schema = known_schema(c.name).unwrap();
    let rewalked = read_record(&mut cursor, c.raw_data.end, schema).unwrap();
    assert_eq!(&rewalked, original);
}

#[test]
fn short_ihdr_is_a_schema_mismatch() {
    let data = png(&[chunk(b"IHDR", &[0, 0, 0, 1])]);
    let err = parse_png(&data).unwrap_err();
    assert_eq!(err, ParseError::SchemaMismatch { chunk_name: "IHDR".to_string() });
}

#[test]
fn truncated_chunk_payload() {
    let mut data = PNG_SIGNATURE.to_vec();
    data.extend_from_slice(&10u32.to_be_bytes());
    data.extend_from_slice(b"IDAT");
    data.extend_from_slice(&[1, 2, 3]);
    assert_eq!(parse_png(&data), Err(ParseError::EndOfInput));
}

#[test]
fn wrong_signature() {
    let err = parse_png(b"NOT A PNG FILE??").unwrap_err();
    assert_eq!(err, ParseError::BadSignature { format: "PNG" });
}

//! GIF-flavor LZW decoder: variable-width codes, LSB-first, with explicit
//! clear and end-of-information codes.

use crate::bits::BitCursor;
use crate::error::ParseError;

/// Code width never grows beyond 12 bits (4096 table entries).
const MAX_CODE_WIDTH: u32 = 12;

/// Decode concatenated GIF sub-block data into the palette index stream.
///
/// The stream must open with a clear code and end with the end-of-information
/// code; any bits after the end code must be zero padding. An empty input
/// decodes to an empty index stream.
pub fn decode_lzw(min_code_size: u8, data: &[u8]) -> Result<Vec<u8>, ParseError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let clear_code = 1u16 << min_code_size;
    let end_code = clear_code + 1;
    let mut bits = BitCursor::new(data);
    let mut width = u32::from(min_code_size) + 1;
    let mut table: Vec<Vec<u8>> = Vec::new();
    let mut prev: Option<u16> = None;
    let mut output = Vec::new();

    loop {
        let code = bits.read_n_bits(width.min(MAX_CODE_WIDTH))? as u16;

        if code == clear_code {
            table.clear();
            table.extend((0..=end_code).map(|k| vec![k as u8]));
            width = u32::from(min_code_size) + 1;
            prev = None;
            continue;
        }
        // The stream must open with a clear code; until one arrives the
        // table is empty and no other code, the end code included, is valid.
        if table.is_empty() {
            return Err(ParseError::UnexpectedLzwCode { code });
        }
        if code == end_code {
            break;
        }

        let index = usize::from(code);
        match prev {
            // First data code after a clear.
            None => {
                if index >= table.len() {
                    return Err(ParseError::UnexpectedLzwCode { code });
                }
                output.push(table[index][0]);
            }
            Some(prev_code) => {
                let prev_index = usize::from(prev_code);
                if index < table.len() {
                    output.extend_from_slice(&table[index]);
                    let mut entry = table[prev_index].clone();
                    entry.push(table[index][0]);
                    table.push(entry);
                } else if index == table.len() {
                    // KwKwK: the code being defined by this very step.
                    let mut entry = table[prev_index].clone();
                    entry.push(table[prev_index][0]);
                    output.extend_from_slice(&entry);
                    table.push(entry);
                } else {
                    return Err(ParseError::UnexpectedLzwCode { code });
                }
                if table.len() == 1 << width && width < MAX_CODE_WIDTH {
                    width += 1;
                }
            }
        }
        prev = Some(code);
    }

    if !bits.at_end() {
        return Err(ParseError::UnexpectedTrailingBits);
    }
    Ok(output)
}

//! Declarative schemas for fixed binary records.
//!
//! A schema is an ordered list of `(field name, field kind)` pairs. Walking
//! one drives a [`ByteCursor`] across a record and yields named field values
//! in declaration order, so new record layouts are added as data rather than
//! as per-record imperative code.

use indexmap::IndexMap;

use crate::cursor::ByteCursor;
use crate::error::ParseError;
use crate::span::Span;

/// How one schema field is read from the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    U16,
    U32,
    /// Null-terminated string; the stored span includes the terminator.
    NullTerminated,
    /// Opaque payload running to the record's end boundary.
    Rest,
}

/// A decoded schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum FieldValue {
    U8(u8),
    U16(u16),
    U32(u32),
    /// Span of a null-terminated string, terminator included.
    Str(Span),
    /// Span of an opaque payload.
    Bytes(Span),
}

/// An ordered record layout.
pub type RecordSchema = &'static [(&'static str, FieldKind)];

/// Named fields decoded from one record, in schema order.
pub type FieldMap = IndexMap<String, FieldValue>;

/// Walk `schema` over `cursor`, treating `end` as the record's end boundary.
///
/// Fixed-width fields must fit before `end`; `NullTerminated` must find its
/// terminator before `end`; `Rest` claims everything up to `end`. The cursor
/// finishes wherever the last field left it, which for schemas ending in
/// `Rest` is exactly `end`.
pub fn read_record(
    cursor: &mut ByteCursor<'_>,
    end: usize,
    schema: RecordSchema,
) -> Result<FieldMap, ParseError> {
    let mut fields = FieldMap::with_capacity(schema.len());
    for &(name, kind) in schema {
        let value = match kind {
            FieldKind::U8 => {
                bounds_check(cursor.position(), 1, end)?;
                FieldValue::U8(cursor.next()?)
            }
            FieldKind::U16 => {
                bounds_check(cursor.position(), 2, end)?;
                FieldValue::U16(cursor.read_u16()?)
            }
            FieldKind::U32 => {
                bounds_check(cursor.position(), 4, end)?;
                FieldValue::U32(cursor.read_u32()?)
            }
            FieldKind::NullTerminated => {
                let start = cursor.position();
                loop {
                    if cursor.position() >= end {
                        return Err(ParseError::EndOfInput);
                    }
                    if cursor.next()? == 0 {
                        break;
                    }
                }
                FieldValue::Str(Span::new(start, cursor.position()))
            }
            FieldKind::Rest => FieldValue::Bytes(cursor.get_span_to(end)?),
        };
        fields.insert(name.to_string(), value);
    }
    Ok(fields)
}

#[inline]
fn bounds_check(pos: usize, width: usize, end: usize) -> Result<(), ParseError> {
    if pos + width > end {
        return Err(ParseError::EndOfInput);
    }
    Ok(())
}
